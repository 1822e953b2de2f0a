//! Wii Remote output report encoding and decoding.
//!
//! All builders are pure and allocation-free. Bit 0 of the first payload byte
//! of every output report drives the rumble motor, so each builder takes the
//! current rumble state and echoes it; omitting it would stop the motor.
//!
//! ```text
//! 0x10  [rumble]
//! 0x11  [leds << 4 | rumble]
//! 0x12  [rumble] [mode]
//! 0x15  [rumble]
//! 0x16  [addr BE x4 | rumble] [size] [data x16]
//! 0x17  [addr BE x4 | rumble] [size BE x2]
//! ```

#![deny(static_mut_refs)]

use crate::extension::ReportMode;
use crate::ids::{WRITE_MEMORY_MAX, output_report_ids, output_report_lens};
use padbridge_hid_common::{ReportBuilder, ReportError, ReportParser, ReportResult};
use serde::Serialize;

/// Only the four player LEDs exist.
pub const LED_MASK: u8 = 0x0F;

/// Rumble bit as it lands in the big-endian address field.
const ADDRESS_RUMBLE_BIT: u32 = 0x0100_0000;

fn rumble_bit(rumble: bool) -> u8 {
    u8::from(rumble)
}

pub fn build_rumble(rumble: bool) -> [u8; output_report_lens::RUMBLE] {
    [output_report_ids::RUMBLE, rumble_bit(rumble)]
}

/// Light player LEDs from a 4-bit mask (bit 0 = LED 1).
pub fn build_player_leds(mask: u8, rumble: bool) -> [u8; output_report_lens::PLAYER_LEDS] {
    [
        output_report_ids::PLAYER_LEDS,
        ((mask & LED_MASK) << 4) | rumble_bit(rumble),
    ]
}

pub fn build_report_mode(mode: ReportMode, rumble: bool) -> [u8; output_report_lens::REPORT_MODE] {
    [output_report_ids::REPORT_MODE, rumble_bit(rumble), mode.id()]
}

pub fn build_status_request(rumble: bool) -> [u8; output_report_lens::STATUS_REQUEST] {
    [output_report_ids::STATUS_REQUEST, rumble_bit(rumble)]
}

/// Write up to 16 bytes at `address`.
///
/// Fails with [`ReportError::Overflow`] for longer data.
pub fn build_write_memory(
    address: u32,
    data: &[u8],
    rumble: bool,
) -> ReportResult<[u8; output_report_lens::WRITE_MEMORY]> {
    let size = u8::try_from(data.len())
        .ok()
        .filter(|&size| usize::from(size) <= WRITE_MEMORY_MAX)
        .ok_or(ReportError::Overflow {
            len: data.len(),
            capacity: WRITE_MEMORY_MAX,
        })?;

    let mut report = ReportBuilder::<{ output_report_lens::WRITE_MEMORY }>::new();
    report
        .write_u8(output_report_ids::WRITE_MEMORY)?
        .write_u32_be(address)?
        .write_u8(size)?
        .write_bytes(data)?
        .fill(0, WRITE_MEMORY_MAX - data.len())?;
    apply_rumble(report.written_mut(1), rumble);
    Ok(to_array(&report))
}

pub fn build_read_memory(
    address: u32,
    size: u16,
    rumble: bool,
) -> ReportResult<[u8; output_report_lens::READ_MEMORY]> {
    let mut report = ReportBuilder::<{ output_report_lens::READ_MEMORY }>::new();
    report
        .write_u8(output_report_ids::READ_MEMORY)?
        .write_u32_be(address)?
        .write_bytes(&size.to_be_bytes())?;
    apply_rumble(report.written_mut(1), rumble);
    Ok(to_array(&report))
}

fn to_array<const N: usize>(report: &ReportBuilder<N>) -> [u8; N] {
    let mut out = [0u8; N];
    if let Some(dst) = out.get_mut(..report.len()) {
        dst.copy_from_slice(report.as_slice());
    }
    out
}

fn apply_rumble(payload: &mut [u8], rumble: bool) {
    if let Some(first) = payload.first_mut() {
        *first |= rumble_bit(rumble);
    }
}

/// A decoded output report, as sent to the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WiiOutputReport {
    Rumble { rumble: bool },
    PlayerLeds { mask: u8, rumble: bool },
    ReportMode { mode: u8, rumble: bool },
    StatusRequest { rumble: bool },
    WriteMemory { address: u32, data: Vec<u8> },
    ReadMemory { address: u32, size: u16 },
}

/// Decode an output report built by this module.
pub fn parse_output_report(data: &[u8]) -> ReportResult<WiiOutputReport> {
    use output_report_ids::*;
    let report_id = data.first().copied().ok_or(ReportError::Empty)?;
    let mut parser = ReportParser::at(data, 1);
    match report_id {
        RUMBLE => Ok(WiiOutputReport::Rumble {
            rumble: parser.read_u8()? & 0x01 != 0,
        }),
        PLAYER_LEDS => {
            let byte = parser.read_u8()?;
            Ok(WiiOutputReport::PlayerLeds {
                mask: byte >> 4,
                rumble: byte & 0x01 != 0,
            })
        }
        REPORT_MODE => {
            let flags = parser.read_u8()?;
            Ok(WiiOutputReport::ReportMode {
                mode: parser.read_u8()?,
                rumble: flags & 0x01 != 0,
            })
        }
        STATUS_REQUEST => Ok(WiiOutputReport::StatusRequest {
            rumble: parser.read_u8()? & 0x01 != 0,
        }),
        WRITE_MEMORY => {
            let address = parser.read_u32_be()? & !ADDRESS_RUMBLE_BIT;
            let size = usize::from(parser.read_u8()?).min(WRITE_MEMORY_MAX);
            Ok(WiiOutputReport::WriteMemory {
                address,
                data: parser.read_bytes(size)?.to_vec(),
            })
        }
        READ_MEMORY => Ok(WiiOutputReport::ReadMemory {
            address: parser.read_u32_be()? & !ADDRESS_RUMBLE_BIT,
            size: parser.read_u16_be()?,
        }),
        other => Err(ReportError::UnknownReport(other)),
    }
}
