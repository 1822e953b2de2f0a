//! Zero-copy views over reports the host sends to the controller.

#![deny(static_mut_refs)]

use crate::ids::{Subcommand, host_report_ids};
use crate::rumble::{RUMBLE_DATA_LEN, RumbleData};
use padbridge_hid_common::{ReportError, ReportParser, ReportResult, fixed_view};

/// Minimum length of a host `0x10` rumble report.
pub const RUMBLE_REPORT_LEN: usize = 10;
/// Minimum length of a host `0x01` sub-command report (up to the sub-command id).
pub const SUBCOMMAND_REPORT_MIN_LEN: usize = 11;
/// Offset of the sub-command id in a host `0x01` report.
pub const SUBCOMMAND_ID_OFFSET: usize = 10;
/// Offset of the first sub-command argument byte.
pub const SUBCOMMAND_ARGS_OFFSET: usize = 11;

/// A host-to-controller report, decoded by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostReport<'a> {
    Subcommand(SubcommandRequest<'a>),
    Rumble(RumbleReport<'a>),
}

/// Decode a host report.
///
/// Returns [`ReportError::UnknownReport`] for ids this protocol does not
/// define; callers treat that as "ignore".
pub fn parse_host_report(data: &[u8]) -> ReportResult<HostReport<'_>> {
    match data.first().copied() {
        None => Err(ReportError::Empty),
        Some(host_report_ids::SUBCOMMAND) => {
            SubcommandRequest::parse(data).map(HostReport::Subcommand)
        }
        Some(host_report_ids::RUMBLE) => RumbleReport::parse(data).map(HostReport::Rumble),
        Some(other) => Err(ReportError::UnknownReport(other)),
    }
}

/// View over a host `0x10` rumble report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RumbleReport<'a> {
    raw: &'a [u8; RUMBLE_REPORT_LEN],
}

impl<'a> RumbleReport<'a> {
    pub fn parse(data: &'a [u8]) -> ReportResult<Self> {
        Ok(Self {
            raw: fixed_view(data)?,
        })
    }

    pub fn packet_counter(&self) -> u8 {
        self.raw[1]
    }

    pub fn rumble(&self) -> RumbleData {
        RumbleData::from_bytes(rumble_bytes(self.raw))
    }
}

/// View over a host `0x01` sub-command report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcommandRequest<'a> {
    header: &'a [u8; SUBCOMMAND_REPORT_MIN_LEN],
    raw: &'a [u8],
}

impl<'a> SubcommandRequest<'a> {
    pub fn parse(data: &'a [u8]) -> ReportResult<Self> {
        Ok(Self {
            header: fixed_view(data)?,
            raw: data,
        })
    }

    pub fn packet_counter(&self) -> u8 {
        self.header[1]
    }

    pub fn rumble(&self) -> RumbleData {
        RumbleData::from_bytes(rumble_bytes(self.header))
    }

    /// Raw sub-command id byte.
    pub fn subcommand_id(&self) -> u8 {
        self.header[SUBCOMMAND_ID_OFFSET]
    }

    /// Known sub-command, or `None` for reserved/unsupported ids.
    pub fn subcommand(&self) -> Option<Subcommand> {
        Subcommand::from_id(self.subcommand_id())
    }

    /// Sub-command argument bytes (may be empty).
    pub fn args(&self) -> &'a [u8] {
        self.raw.get(SUBCOMMAND_ARGS_OFFSET..).unwrap_or_default()
    }

    /// Address (little-endian) and length of an SPI flash read/write/erase.
    pub fn spi_args(&self) -> ReportResult<SpiArgs> {
        let mut parser = ReportParser::at(self.raw, SUBCOMMAND_ARGS_OFFSET);
        let address_bytes: [u8; 4] = parser.read_array()?;
        let length = parser.read_u8()?;
        Ok(SpiArgs {
            address: u32::from_le_bytes(address_bytes),
            address_bytes,
            length,
        })
    }

    /// Requested player LED mask of a `SetPlayerLeds` sub-command.
    pub fn player_led_mask(&self) -> ReportResult<u8> {
        ReportParser::at(self.raw, SUBCOMMAND_ARGS_OFFSET).read_u8()
    }
}

/// Arguments of an SPI flash sub-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiArgs {
    pub address: u32,
    /// Address exactly as sent, echoed back in the reply.
    pub address_bytes: [u8; 4],
    pub length: u8,
}

fn rumble_bytes<const N: usize>(raw: &[u8; N]) -> [u8; RUMBLE_DATA_LEN] {
    raw.get(2..2 + RUMBLE_DATA_LEN)
        .and_then(|s| s.try_into().ok())
        .unwrap_or([0u8; RUMBLE_DATA_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::subcommand_ids;

    fn subcommand_report(id: u8, args: &[u8]) -> Vec<u8> {
        let mut data = vec![0x01, 0x05, 0x00, 0x01, 0x40, 0x40, 0x00, 0x01, 0x40, 0x40, id];
        data.extend_from_slice(args);
        data
    }

    #[test]
    fn test_parse_spi_read_request() -> Result<(), Box<dyn std::error::Error>> {
        let data = subcommand_report(subcommand_ids::SPI_FLASH_READ, &[0x50, 0x60, 0x00, 0x00, 0x0D]);
        let HostReport::Subcommand(request) = parse_host_report(&data)? else {
            return Err("expected sub-command report".into());
        };

        assert_eq!(request.packet_counter(), 0x05);
        assert_eq!(request.subcommand(), Some(Subcommand::SpiFlashRead));
        assert!(!request.rumble().is_active());

        let spi = request.spi_args()?;
        assert_eq!(spi.address, 0x6050);
        assert_eq!(spi.address_bytes, [0x50, 0x60, 0x00, 0x00]);
        assert_eq!(spi.length, 0x0D);
        Ok(())
    }

    #[test]
    fn test_parse_player_led_request() -> Result<(), Box<dyn std::error::Error>> {
        let data = subcommand_report(subcommand_ids::SET_PLAYER_LEDS, &[0x09]);
        let request = SubcommandRequest::parse(&data)?;
        assert_eq!(request.player_led_mask()?, 0x09);
        assert_eq!(request.args(), &[0x09]);
        Ok(())
    }

    #[test]
    fn test_truncated_arguments_are_malformed() -> Result<(), Box<dyn std::error::Error>> {
        let data = subcommand_report(subcommand_ids::SPI_FLASH_READ, &[0x50, 0x60]);
        let request = SubcommandRequest::parse(&data)?;
        assert!(matches!(
            request.spi_args(),
            Err(ReportError::Malformed { report_id: 0x01, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_parse_rumble_report() -> Result<(), Box<dyn std::error::Error>> {
        let data = [0x10, 0x0A, 0x00, 0x62, 0x80, 0x62, 0x00, 0x01, 0x40, 0x40];
        let HostReport::Rumble(report) = parse_host_report(&data)? else {
            return Err("expected rumble report".into());
        };
        assert_eq!(report.packet_counter(), 0x0A);
        assert!(report.rumble().left.is_active());
        assert!(!report.rumble().right.is_active());
        Ok(())
    }

    #[test]
    fn test_short_and_unknown_reports() {
        assert_eq!(parse_host_report(&[]), Err(ReportError::Empty));
        assert_eq!(
            parse_host_report(&[0x01, 0x00, 0x00]),
            Err(ReportError::Malformed {
                report_id: 0x01,
                expected: SUBCOMMAND_REPORT_MIN_LEN,
                actual: 3
            })
        );
        assert_eq!(
            parse_host_report(&[0x80, 0x02]),
            Err(ReportError::UnknownReport(0x80))
        );
    }
}
