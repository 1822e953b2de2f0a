//! Identity and SPI flash emulation shared by every adapter variant.
//!
//! Host sub-commands are answered with synthesized replies so the device
//! passes the host's bring-up handshake. Physical side effects (rumble,
//! player LEDs) are delegated to [`EmulationHooks`]; a failing hook is logged
//! and the acknowledgement is still produced.

use crate::AdapterError;
use padbridge_hid_common::{BluetoothAddress, DeviceWriter, ReportError, ReportResult};
use padbridge_hid_switch_protocol::{
    HostReport, RumbleData, Subcommand, SubcommandReply, SubcommandRequest, parse_host_report,
};
use tracing::{debug, trace, warn};

/// Device side effects requested by the host.
pub trait EmulationHooks {
    fn set_vibration(
        &mut self,
        writer: &mut dyn DeviceWriter,
        rumble: &RumbleData,
    ) -> Result<(), AdapterError>;

    fn set_player_led(&mut self, writer: &mut dyn DeviceWriter, mask: u8) -> Result<(), AdapterError>;
}

/// Handle one host report addressed to the device at `address`.
///
/// `0x10` rumble reports are forwarded to [`EmulationHooks::set_vibration`]
/// and produce no reply; transport failures there propagate. `0x01`
/// sub-command reports produce a reply for every supported sub-command.
/// Unknown ids and malformed reports yield `Ok(None)`.
pub fn handle_host_report<H: EmulationHooks + ?Sized>(
    hooks: &mut H,
    writer: &mut dyn DeviceWriter,
    address: &BluetoothAddress,
    raw: &[u8],
) -> Result<Option<SubcommandReply>, AdapterError> {
    match parse_host_report(raw) {
        Ok(HostReport::Rumble(report)) => {
            hooks.set_vibration(writer, &report.rumble())?;
            Ok(None)
        }
        Ok(HostReport::Subcommand(request)) => Ok(respond(hooks, writer, address, &request)),
        Err(ReportError::UnknownReport(id)) => {
            trace!(%address, report_id = format_args!("0x{id:02X}"), "Ignoring host report");
            Ok(None)
        }
        Err(e) => {
            warn!(%address, error = %e, "Discarding malformed host report");
            Ok(None)
        }
    }
}

fn respond<H: EmulationHooks + ?Sized>(
    hooks: &mut H,
    writer: &mut dyn DeviceWriter,
    address: &BluetoothAddress,
    request: &SubcommandRequest<'_>,
) -> Option<SubcommandReply> {
    let Some(subcommand) = request.subcommand() else {
        trace!(
            %address,
            subcommand = format_args!("0x{:02X}", request.subcommand_id()),
            "Ignoring unsupported sub-command"
        );
        return None;
    };

    match build_reply(hooks, writer, address, request, subcommand) {
        Ok(reply) => {
            debug!(%address, ?subcommand, ack = format_args!("0x{:02X}", reply.ack()), "Answered sub-command");
            Some(reply)
        }
        Err(e) => {
            warn!(%address, ?subcommand, error = %e, "Discarding malformed sub-command");
            None
        }
    }
}

fn build_reply<H: EmulationHooks + ?Sized>(
    hooks: &mut H,
    writer: &mut dyn DeviceWriter,
    address: &BluetoothAddress,
    request: &SubcommandRequest<'_>,
    subcommand: Subcommand,
) -> ReportResult<SubcommandReply> {
    match subcommand {
        Subcommand::RequestDeviceInfo => SubcommandReply::device_info(address),
        Subcommand::SpiFlashRead => SubcommandReply::spi_flash_read(&request.spi_args()?),
        Subcommand::SpiFlashWrite => SubcommandReply::spi_flash_write(),
        Subcommand::SpiSectorErase => SubcommandReply::spi_sector_erase(),
        Subcommand::TriggersElapsedTime => SubcommandReply::triggers_elapsed_time(),
        Subcommand::SetShipPowerState => SubcommandReply::ship_power_state(),
        Subcommand::SetMcuConfig => SubcommandReply::mcu_config(),
        Subcommand::SetPlayerLeds => {
            let mask = request.player_led_mask()?;
            if let Err(e) = hooks.set_player_led(writer, mask) {
                warn!(%address, mask, error = %e, "Player LED update failed");
            }
            SubcommandReply::simple_ack(subcommand)
        }
        Subcommand::SetInputReportMode
        | Subcommand::SetMcuState
        | Subcommand::EnableImu
        | Subcommand::EnableVibration => SubcommandReply::simple_ack(subcommand),
    }
}
