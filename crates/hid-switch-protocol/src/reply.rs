//! Synthesized sub-command replies and their `0x21` input report framing.

#![deny(static_mut_refs)]

use crate::host::SpiArgs;
use crate::ids::{Subcommand, ack, input_report_ids, subcommand_ids};
use crate::spi::{SPI_READ_MAX, read_flash};
use crate::state::SwitchControllerState;
use padbridge_hid_common::{BluetoothAddress, ReportBuilder, ReportResult};
use tracing::debug;

/// Largest reply: ack byte, echoed sub-command id, 34 payload bytes.
pub const REPLY_MAX_LEN: usize = 36;
/// Length of a host `0x21` input report.
pub const INPUT_REPORT_LEN: usize = 49;
/// Offset of the first reply byte inside a `0x21` input report.
pub const REPLY_OFFSET: usize = 13;
/// Vibrator status byte reported while idle.
pub const VIBRATOR_IDLE: u8 = 0x70;

/// Firmware version, controller type (Pro Controller) and trailing fields of
/// a device info reply.
const DEVICE_INFO_PREFIX: [u8; 4] = [0x03, 0x48, 0x03, 0x02];
const DEVICE_INFO_SUFFIX: [u8; 2] = [0x01, 0x02];

const MCU_CONFIG_HEADER: [u8; 8] = [0x01, 0x00, 0xFF, 0x00, 0x03, 0x00, 0x05, 0x01];
const MCU_CONFIG_CHECKSUM: u8 = 0x5C;
const MCU_CONFIG_PADDING: usize = 25;

/// A reply to one host sub-command: ack byte, echoed id, payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubcommandReply {
    bytes: ReportBuilder<REPLY_MAX_LEN>,
}

impl SubcommandReply {
    fn with_header(ack: u8, subcommand_id: u8) -> ReportResult<Self> {
        let mut bytes = ReportBuilder::new();
        bytes.write_u8(ack)?.write_u8(subcommand_id)?;
        Ok(Self { bytes })
    }

    /// Plain `0x80` acknowledgement echoing `subcommand`.
    pub fn simple_ack(subcommand: Subcommand) -> ReportResult<Self> {
        Self::with_header(ack::GENERIC, subcommand.id())
    }

    /// Firmware version, controller type, and the device address at reply
    /// offsets 6..12.
    pub fn device_info(address: &BluetoothAddress) -> ReportResult<Self> {
        let mut reply = Self::with_header(ack::DEVICE_INFO, subcommand_ids::REQUEST_DEVICE_INFO)?;
        reply
            .bytes
            .write_bytes(&DEVICE_INFO_PREFIX)?
            .write_bytes(address.as_bytes())?
            .write_bytes(&DEVICE_INFO_SUFFIX)?;
        Ok(reply)
    }

    /// Echo the requested address and length followed by simulated flash
    /// contents, at most [`SPI_READ_MAX`] bytes of it.
    pub fn spi_flash_read(args: &SpiArgs) -> ReportResult<Self> {
        let requested = usize::from(args.length);
        let length = requested.min(SPI_READ_MAX);
        if requested > length {
            debug!(
                address = format_args!("0x{:08X}", args.address),
                requested, "SPI read clamped to {SPI_READ_MAX} bytes"
            );
        }
        let mut data = [0u8; SPI_READ_MAX];
        let data = data.get_mut(..length).unwrap_or_default();
        read_flash(args.address, data);

        let mut reply = Self::with_header(ack::SPI_FLASH_READ, subcommand_ids::SPI_FLASH_READ)?;
        reply
            .bytes
            .write_bytes(&args.address_bytes)?
            .write_u8(args.length)?
            .write_bytes(data)?;
        Ok(reply)
    }

    pub fn spi_flash_write() -> ReportResult<Self> {
        let mut reply = Self::simple_ack(Subcommand::SpiFlashWrite)?;
        reply.bytes.write_u8(0x01)?;
        Ok(reply)
    }

    pub fn spi_sector_erase() -> ReportResult<Self> {
        let mut reply = Self::simple_ack(Subcommand::SpiSectorErase)?;
        reply.bytes.write_u8(0x01)?;
        Ok(reply)
    }

    pub fn triggers_elapsed_time() -> ReportResult<Self> {
        Self::with_header(ack::TRIGGERS_ELAPSED_TIME, subcommand_ids::TRIGGERS_ELAPSED_TIME)
    }

    pub fn ship_power_state() -> ReportResult<Self> {
        let mut reply = Self::simple_ack(Subcommand::SetShipPowerState)?;
        reply.bytes.write_u8(0x00)?;
        Ok(reply)
    }

    /// Static MCU configuration block, independent of the request.
    pub fn mcu_config() -> ReportResult<Self> {
        let mut reply = Self::with_header(ack::MCU_CONFIG, subcommand_ids::SET_MCU_CONFIG)?;
        reply
            .bytes
            .write_bytes(&MCU_CONFIG_HEADER)?
            .fill(0x00, MCU_CONFIG_PADDING)?
            .write_u8(MCU_CONFIG_CHECKSUM)?;
        Ok(reply)
    }

    /// Ack byte of the reply.
    pub fn ack(&self) -> u8 {
        self.as_bytes().first().copied().unwrap_or_default()
    }

    /// Echoed sub-command id.
    pub fn subcommand_id(&self) -> u8 {
        self.as_bytes().get(1).copied().unwrap_or_default()
    }

    /// Bytes after the ack and echoed id.
    pub fn payload(&self) -> &[u8] {
        self.as_bytes().get(2..).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Frame the reply in a `0x21` input report carrying `state`.
    pub fn to_input_report(
        &self,
        timer: u8,
        state: &SwitchControllerState,
    ) -> ReportResult<[u8; INPUT_REPORT_LEN]> {
        let mut report = ReportBuilder::<INPUT_REPORT_LEN>::new();
        report
            .write_u8(input_report_ids::SUBCOMMAND_REPLY)?
            .write_u8(timer)?
            .write_u8(state.battery_connection_byte())?
            .write_bytes(&state.buttons.to_bytes())?
            .write_bytes(&state.left_stick.to_bytes())?
            .write_bytes(&state.right_stick.to_bytes())?
            .write_u8(VIBRATOR_IDLE)?
            .write_bytes(self.as_bytes())?;

        let mut out = [0u8; INPUT_REPORT_LEN];
        if let Some(dst) = out.get_mut(..report.len()) {
            dst.copy_from_slice(report.as_slice());
        }
        Ok(out)
    }
}
