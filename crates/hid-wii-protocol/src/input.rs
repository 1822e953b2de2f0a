//! Wii Remote input report views and extension payload decoding.
//!
//! Views borrow the raw report; every accessor reads from a fixed-size array
//! obtained through [`fixed_view`], so a short report fails once at parse
//! time instead of at field access.
//!
//! Core button bits are set while pressed. Extension payload bits are clear
//! while pressed; the decoders below return "pressed" flags either way.

#![deny(static_mut_refs)]

use crate::extension::extension_id_from_bytes;
use crate::ids::{MEMORY_READ_DATA_LEN, extension_registers, input_report_ids, input_report_lens};
use padbridge_hid_common::{ReportError, ReportResult, fixed_view};
use serde::Serialize;

/// The remote's own eleven buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoreButtons {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub up: bool,
    pub plus: bool,
    pub two: bool,
    pub one: bool,
    pub b: bool,
    pub a: bool,
    pub minus: bool,
    pub home: bool,
}

impl CoreButtons {
    /// Decode the two core button bytes at report offsets 1 and 2.
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        let [b1, b2] = bytes;
        let bit = |byte: u8, n: u8| byte & (1 << n) != 0;
        Self {
            left: bit(b1, 0),
            right: bit(b1, 1),
            down: bit(b1, 2),
            up: bit(b1, 3),
            plus: bit(b1, 4),
            two: bit(b2, 0),
            one: bit(b2, 1),
            b: bit(b2, 2),
            a: bit(b2, 3),
            minus: bit(b2, 4),
            home: bit(b2, 7),
        }
    }
}

fn core_buttons<const N: usize>(raw: &[u8; N]) -> CoreButtons {
    match raw.get(1..3) {
        Some(&[b1, b2]) => CoreButtons::from_bytes([b1, b2]),
        _ => CoreButtons::default(),
    }
}

/// `0x20` status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport<'a> {
    raw: &'a [u8; input_report_lens::STATUS],
}

impl<'a> StatusReport<'a> {
    pub fn parse(data: &'a [u8]) -> ReportResult<Self> {
        Ok(Self {
            raw: fixed_view(data)?,
        })
    }

    pub fn buttons(&self) -> CoreButtons {
        core_buttons(self.raw)
    }

    pub fn battery_low(&self) -> bool {
        self.raw[3] & 0x01 != 0
    }

    pub fn extension_connected(&self) -> bool {
        self.raw[3] & 0x02 != 0
    }

    /// Lit player LEDs, bit 0 = LED 1.
    pub fn leds(&self) -> u8 {
        self.raw[3] >> 4
    }

    /// Raw battery level, 0-255.
    pub fn battery_level(&self) -> u8 {
        self.raw[6]
    }
}

/// `0x21` memory/register read reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReadReport<'a> {
    raw: &'a [u8; input_report_lens::MEMORY_READ],
}

impl<'a> MemoryReadReport<'a> {
    pub fn parse(data: &'a [u8]) -> ReportResult<Self> {
        Ok(Self {
            raw: fixed_view(data)?,
        })
    }

    pub fn buttons(&self) -> CoreButtons {
        core_buttons(self.raw)
    }

    /// Number of valid data bytes (1-16).
    pub fn size(&self) -> u8 {
        (self.raw[3] >> 4) + 1
    }

    /// Error nibble; zero on success.
    pub fn error(&self) -> u8 {
        self.raw[3] & 0x0F
    }

    /// Low 16 bits of the address that was read.
    pub fn address(&self) -> u16 {
        u16::from_be_bytes([self.raw[4], self.raw[5]])
    }

    pub fn data(&self) -> &'a [u8] {
        let raw: &'a [u8; input_report_lens::MEMORY_READ] = self.raw;
        raw.get(6..6 + MEMORY_READ_DATA_LEN).unwrap_or_default()
    }

    /// Whether this reply answers the extension identifier read.
    pub fn is_extension_identifier(&self) -> bool {
        self.address() == extension_registers::IDENTIFIER_ECHO
    }

    /// First six data bytes as a 48-bit big-endian identifier.
    pub fn extension_id(&self) -> u64 {
        let [_, _, _, _, _, _, a, b, c, d, e, g, ..] = *self.raw;
        extension_id_from_bytes([a, b, c, d, e, g])
    }
}

/// `0x22` acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckReport<'a> {
    raw: &'a [u8; input_report_lens::ACK],
}

impl<'a> AckReport<'a> {
    pub fn parse(data: &'a [u8]) -> ReportResult<Self> {
        Ok(Self {
            raw: fixed_view(data)?,
        })
    }

    pub fn acknowledged_report(&self) -> u8 {
        self.raw[3]
    }

    pub fn error_code(&self) -> u8 {
        self.raw[4]
    }
}

/// `0x30`/`0x31`: core buttons, optionally followed by accelerometer bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreReport<'a> {
    raw: &'a [u8; input_report_lens::CORE_BUTTONS],
    accel: Option<[u8; 3]>,
}

impl<'a> CoreReport<'a> {
    pub fn parse(data: &'a [u8]) -> ReportResult<Self> {
        let raw = fixed_view(data)?;
        let accel = if raw[0] == input_report_ids::CORE_ACCEL {
            let full: &[u8; input_report_lens::CORE_ACCEL] = fixed_view(data)?;
            Some([full[3], full[4], full[5]])
        } else {
            None
        };
        Ok(Self { raw, accel })
    }

    pub fn report_id(&self) -> u8 {
        self.raw[0]
    }

    pub fn buttons(&self) -> CoreButtons {
        core_buttons(self.raw)
    }

    /// Raw accelerometer bytes of a `0x31` report; not interpreted.
    pub fn accel(&self) -> Option<[u8; 3]> {
        self.accel
    }
}

/// `0x32`/`0x34`: core buttons followed by extension bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionReport<'a> {
    data: &'a [u8],
}

impl<'a> ExtensionReport<'a> {
    pub fn parse(data: &'a [u8]) -> ReportResult<Self> {
        let report_id = *data.first().ok_or(ReportError::Empty)?;
        let len = match report_id {
            input_report_ids::CORE_EXTENSION_19 => input_report_lens::CORE_EXTENSION_19,
            _ => input_report_lens::CORE_EXTENSION_8,
        };
        let data = data.get(..len).ok_or(ReportError::Malformed {
            report_id,
            expected: len,
            actual: data.len(),
        })?;
        Ok(Self { data })
    }

    pub fn report_id(&self) -> u8 {
        self.data.first().copied().unwrap_or_default()
    }

    pub fn buttons(&self) -> CoreButtons {
        match self.data.get(1..3) {
            Some(&[b1, b2]) => CoreButtons::from_bytes([b1, b2]),
            _ => CoreButtons::default(),
        }
    }

    /// Extension bytes (8 for `0x32`, 19 for `0x34`).
    pub fn payload(&self) -> &'a [u8] {
        let data: &'a [u8] = self.data;
        data.get(3..).unwrap_or_default()
    }

    /// First `N` extension bytes, or `Malformed` if the report carries fewer.
    pub fn extension<const N: usize>(&self) -> ReportResult<&'a [u8; N]> {
        self.payload()
            .first_chunk::<N>()
            .ok_or(ReportError::Malformed {
                report_id: self.report_id(),
                expected: 3 + N,
                actual: self.data.len(),
            })
    }
}

/// Any report the remote sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiiInputReport<'a> {
    Status(StatusReport<'a>),
    MemoryRead(MemoryReadReport<'a>),
    Ack(AckReport<'a>),
    Core(CoreReport<'a>),
    Extension(ExtensionReport<'a>),
}

/// Decode a report from the remote by id.
///
/// Unknown ids yield [`ReportError::UnknownReport`].
pub fn parse_input_report(data: &[u8]) -> ReportResult<WiiInputReport<'_>> {
    use input_report_ids::*;
    match data.first().copied() {
        None => Err(ReportError::Empty),
        Some(STATUS) => StatusReport::parse(data).map(WiiInputReport::Status),
        Some(MEMORY_READ) => MemoryReadReport::parse(data).map(WiiInputReport::MemoryRead),
        Some(ACK) => AckReport::parse(data).map(WiiInputReport::Ack),
        Some(CORE_BUTTONS | CORE_ACCEL) => CoreReport::parse(data).map(WiiInputReport::Core),
        Some(CORE_EXTENSION_8 | CORE_EXTENSION_19) => {
            ExtensionReport::parse(data).map(WiiInputReport::Extension)
        }
        Some(other) => Err(ReportError::UnknownReport(other)),
    }
}

// ── Extension payloads ──────────────────────────────────────────────────────

/// Buttons shared by the Classic Controller and Wii U Pro Controller layouts
/// (two bytes, cleared bit = pressed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassicButtons {
    pub r: bool,
    pub plus: bool,
    pub home: bool,
    pub minus: bool,
    pub l: bool,
    pub down: bool,
    pub right: bool,
    pub up: bool,
    pub left: bool,
    pub zr: bool,
    pub x: bool,
    pub a: bool,
    pub y: bool,
    pub b: bool,
    pub zl: bool,
}

impl ClassicButtons {
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        let [hi, lo] = bytes;
        let pressed = |byte: u8, n: u8| byte & (1 << n) == 0;
        Self {
            r: pressed(hi, 1),
            plus: pressed(hi, 2),
            home: pressed(hi, 3),
            minus: pressed(hi, 4),
            l: pressed(hi, 5),
            down: pressed(hi, 6),
            right: pressed(hi, 7),
            up: pressed(lo, 0),
            left: pressed(lo, 1),
            zr: pressed(lo, 2),
            x: pressed(lo, 3),
            a: pressed(lo, 4),
            y: pressed(lo, 5),
            b: pressed(lo, 6),
            zl: pressed(lo, 7),
        }
    }
}

/// Nunchuck payload (first six extension bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NunchuckData {
    pub stick_x: u8,
    pub stick_y: u8,
    pub c: bool,
    pub z: bool,
}

impl NunchuckData {
    pub const LEN: usize = 6;

    pub fn from_bytes(ext: &[u8; Self::LEN]) -> Self {
        Self {
            stick_x: ext[0],
            stick_y: ext[1],
            z: ext[5] & 0x01 == 0,
            c: ext[5] & 0x02 == 0,
        }
    }
}

/// Classic Controller (and Classic Controller Pro) payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassicData {
    /// 6-bit axes.
    pub left_x: u8,
    pub left_y: u8,
    /// 5-bit axes.
    pub right_x: u8,
    pub right_y: u8,
    /// 5-bit analog trigger pressures.
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub buttons: ClassicButtons,
}

impl ClassicData {
    pub const LEN: usize = 6;

    pub fn from_bytes(ext: &[u8; Self::LEN]) -> Self {
        let [b0, b1, b2, b3, b4, b5] = *ext;
        Self {
            left_x: b0 & 0x3F,
            left_y: b1 & 0x3F,
            right_x: ((b0 >> 3) & 0x18) | ((b1 >> 5) & 0x06) | ((b2 >> 7) & 0x01),
            right_y: b2 & 0x1F,
            left_trigger: (b3 >> 5) | ((b2 >> 2) & 0x18),
            right_trigger: b3 & 0x1F,
            buttons: ClassicButtons::from_bytes([b4, b5]),
        }
    }
}

/// Wii U Pro Controller payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WiiUProData {
    /// 12-bit native axes centred near 2048.
    pub left_x: u16,
    pub right_x: u16,
    pub left_y: u16,
    pub right_y: u16,
    pub buttons: ClassicButtons,
    pub lstick_press: bool,
    pub rstick_press: bool,
    pub charging: bool,
    pub usb_connected: bool,
    /// 3-bit battery field; `0b111` is reported while full.
    pub battery: u8,
}

impl WiiUProData {
    pub const LEN: usize = 11;

    pub fn from_bytes(ext: &[u8; Self::LEN]) -> Self {
        let [lx0, lx1, rx0, rx1, ly0, ly1, ry0, ry1, b8, b9, b10] = *ext;
        Self {
            left_x: u16::from_le_bytes([lx0, lx1]),
            right_x: u16::from_le_bytes([rx0, rx1]),
            left_y: u16::from_le_bytes([ly0, ly1]),
            right_y: u16::from_le_bytes([ry0, ry1]),
            buttons: ClassicButtons::from_bytes([b8, b9]),
            rstick_press: b10 & 0x01 == 0,
            lstick_press: b10 & 0x02 == 0,
            charging: b10 & 0x04 == 0,
            usb_connected: b10 & 0x08 == 0,
            battery: (b10 >> 4) & 0x07,
        }
    }
}

/// TaTaCon drum payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaTaConData {
    pub right_rim: bool,
    pub right_center: bool,
    pub left_rim: bool,
    pub left_center: bool,
}

impl TaTaConData {
    pub const LEN: usize = 6;

    pub fn from_bytes(ext: &[u8; Self::LEN]) -> Self {
        let hit = |n: u8| ext[5] & (1 << n) == 0;
        Self {
            right_rim: hit(3),
            right_center: hit(4),
            left_rim: hit(5),
            left_center: hit(6),
        }
    }
}
