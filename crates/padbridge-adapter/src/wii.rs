//! Wii Remote adapter: report mode handshake, extension identification, and
//! translation of every input report into the canonical state.

use crate::AdapterError;
use crate::emulation::{self, EmulationHooks};
use padbridge_hid_common::{BluetoothAddress, DeviceWriter, ReportError, ReportResult};
use padbridge_hid_switch_protocol::{RumbleData, SubcommandReply, SwitchControllerState};
use padbridge_hid_wii_protocol::{
    ClassicData, ExtensionReport, LED_MASK, MemoryReadReport, NunchuckData, ReportMode,
    StatusReport, TaTaConData, WiiExtension, WiiInputReport, WiiUProData, build_player_leds,
    build_read_memory, build_report_mode, build_rumble, build_status_request, build_write_memory,
    extension_registers, map_buttons_horizontal, map_buttons_vertical, map_classic, map_nunchuck,
    map_tatacon, map_wiiu_pro, parse_input_report, status_battery,
};
use tracing::{debug, info, trace, warn};

/// State machine for one connected Wii Remote.
#[derive(Debug, Clone)]
pub struct WiiController {
    address: BluetoothAddress,
    state: SwitchControllerState,
    extension: WiiExtension,
    report_mode: ReportMode,
}

impl WiiController {
    pub fn new(address: BluetoothAddress) -> Self {
        debug!(%address, "Created WiiController");
        Self {
            address,
            state: SwitchControllerState::default(),
            extension: WiiExtension::None,
            report_mode: ReportMode::default(),
        }
    }

    pub fn address(&self) -> BluetoothAddress {
        self.address
    }

    pub fn state(&self) -> &SwitchControllerState {
        &self.state
    }

    pub fn extension(&self) -> WiiExtension {
        self.extension
    }

    /// Reporting mode last sent to the remote.
    pub fn report_mode(&self) -> ReportMode {
        self.report_mode
    }

    pub fn reset(&mut self) {
        debug!(address = %self.address, "Resetting WiiController");
        self.state = SwitchControllerState::default();
        self.extension = WiiExtension::None;
        self.report_mode = ReportMode::default();
    }

    /// Request core buttons with accelerometer, then ask for a status report
    /// so an attached extension is noticed.
    pub fn initialize(&mut self, writer: &mut dyn DeviceWriter) -> Result<(), AdapterError> {
        info!(address = %self.address, "Initializing Wii remote");
        self.set_report_mode(writer, ReportMode::CoreAccel)?;
        self.query_status(writer)
    }

    /// Apply one report from the remote.
    ///
    /// Malformed reports are logged and dropped without touching the state.
    /// Status and identification replies may send follow-up commands.
    pub fn handle_incoming_report(
        &mut self,
        writer: &mut dyn DeviceWriter,
        raw: &[u8],
    ) -> Result<(), AdapterError> {
        let report = match parse_input_report(raw) {
            Ok(report) => report,
            Err(ReportError::UnknownReport(id)) => {
                trace!(address = %self.address, report_id = format_args!("0x{id:02X}"), "Ignoring Wii report");
                return Ok(());
            }
            Err(e) => {
                warn!(address = %self.address, error = %e, "Discarding malformed Wii report");
                return Ok(());
            }
        };

        match report {
            WiiInputReport::Status(status) => self.handle_status(writer, &status),
            WiiInputReport::MemoryRead(reply) => self.handle_memory_read(writer, &reply),
            WiiInputReport::Ack(ack) => {
                trace!(
                    address = %self.address,
                    report = format_args!("0x{:02X}", ack.acknowledged_report()),
                    error_code = ack.error_code(),
                    "Wii remote acknowledged"
                );
                Ok(())
            }
            WiiInputReport::Core(core) => {
                map_buttons_horizontal(&core.buttons(), &mut self.state.buttons);
                Ok(())
            }
            WiiInputReport::Extension(report) => {
                if let Err(e) = self.apply_extension_report(&report) {
                    warn!(
                        address = %self.address,
                        extension = %self.extension,
                        error = %e,
                        "Discarding extension report"
                    );
                }
                Ok(())
            }
        }
    }

    /// Answer a host report through the shared sub-command responder.
    ///
    /// Rumble and player LED requests drive the remote itself.
    pub fn handle_outgoing_report(
        &mut self,
        writer: &mut dyn DeviceWriter,
        raw: &[u8],
    ) -> Result<Option<SubcommandReply>, AdapterError> {
        let address = self.address;
        emulation::handle_host_report(self, writer, &address, raw)
    }

    /// Turn the rumble motor on if any amplitude is non-zero.
    pub fn set_vibration(
        &mut self,
        writer: &mut dyn DeviceWriter,
        rumble: &RumbleData,
    ) -> Result<(), AdapterError> {
        self.state.rumble_state = rumble.is_active();
        self.send(writer, &build_rumble(self.state.rumble_state))
    }

    pub fn cancel_vibration(&mut self, writer: &mut dyn DeviceWriter) -> Result<(), AdapterError> {
        self.state.rumble_state = false;
        self.send(writer, &build_rumble(false))
    }

    pub fn set_player_led(&mut self, writer: &mut dyn DeviceWriter, mask: u8) -> Result<(), AdapterError> {
        self.send(writer, &build_player_leds(mask, self.state.rumble_state))?;
        self.state.player_led_mask = mask & LED_MASK;
        Ok(())
    }

    pub fn set_report_mode(
        &mut self,
        writer: &mut dyn DeviceWriter,
        mode: ReportMode,
    ) -> Result<(), AdapterError> {
        self.send(writer, &build_report_mode(mode, self.state.rumble_state))?;
        if self.report_mode != mode {
            debug!(address = %self.address, mode = format_args!("0x{:02X}", mode.id()), "Report mode changed");
        }
        self.report_mode = mode;
        Ok(())
    }

    pub fn query_status(&mut self, writer: &mut dyn DeviceWriter) -> Result<(), AdapterError> {
        self.send(writer, &build_status_request(self.state.rumble_state))
    }

    /// Write up to 16 bytes of remote or extension memory.
    pub fn write_memory(
        &mut self,
        writer: &mut dyn DeviceWriter,
        address: u32,
        data: &[u8],
    ) -> Result<(), AdapterError> {
        let report = build_write_memory(address, data, self.state.rumble_state)
            .map_err(AdapterError::Encode)?;
        self.send(writer, &report)
    }

    pub fn read_memory(
        &mut self,
        writer: &mut dyn DeviceWriter,
        address: u32,
        size: u16,
    ) -> Result<(), AdapterError> {
        let report = build_read_memory(address, size, self.state.rumble_state)
            .map_err(AdapterError::Encode)?;
        self.send(writer, &report)
    }

    fn send(&self, writer: &mut dyn DeviceWriter, report: &[u8]) -> Result<(), AdapterError> {
        writer.send_report(&self.address, report).map_err(|e| {
            warn!(address = %self.address, error = %e, "Failed to send report to Wii remote");
            AdapterError::Transport(e)
        })
    }

    fn handle_status(
        &mut self,
        writer: &mut dyn DeviceWriter,
        status: &StatusReport<'_>,
    ) -> Result<(), AdapterError> {
        let attached = status.extension_connected();
        if !attached {
            self.set_extension(WiiExtension::None);
        }
        if !self.extension.reports_battery() {
            self.state.battery = status_battery(status.battery_level());
        }

        if !attached {
            self.set_report_mode(writer, ReportMode::CoreAccel)
        } else if self.extension == WiiExtension::None {
            debug!(address = %self.address, "Extension attached, initializing");
            self.write_memory(
                writer,
                extension_registers::INIT_1,
                &[extension_registers::INIT_1_VALUE],
            )?;
            self.write_memory(
                writer,
                extension_registers::INIT_2,
                &[extension_registers::INIT_2_VALUE],
            )?;
            self.read_memory(
                writer,
                extension_registers::IDENTIFIER,
                extension_registers::IDENTIFIER_LEN,
            )
        } else {
            Ok(())
        }
    }

    fn handle_memory_read(
        &mut self,
        writer: &mut dyn DeviceWriter,
        reply: &MemoryReadReport<'_>,
    ) -> Result<(), AdapterError> {
        if reply.is_extension_identifier() {
            let extension = WiiExtension::classify(reply.extension_id());
            self.set_report_mode(writer, extension.report_mode())?;
            info!(address = %self.address, %extension, "Identified extension");
            self.set_extension(extension);
        }
        self.state.clear_input();
        Ok(())
    }

    /// Decode the whole report before mutating so a short payload leaves the
    /// state as it was.
    fn apply_extension_report(&mut self, report: &ExtensionReport<'_>) -> ReportResult<()> {
        let input = ExtensionInput::decode(self.extension, report)?;
        if self.extension.uses_vertical_mapping(report.report_id()) {
            map_buttons_vertical(&report.buttons(), &mut self.state.buttons);
        }
        if let Some(input) = input {
            input.apply(&mut self.state);
        }
        Ok(())
    }

    fn set_extension(&mut self, extension: WiiExtension) {
        if self.extension != extension {
            debug!(address = %self.address, from = %self.extension, to = %extension, "Extension changed");
            self.state.clear_input();
            self.extension = extension;
        }
    }
}

impl EmulationHooks for WiiController {
    fn set_vibration(
        &mut self,
        writer: &mut dyn DeviceWriter,
        rumble: &RumbleData,
    ) -> Result<(), AdapterError> {
        WiiController::set_vibration(self, writer, rumble)
    }

    fn set_player_led(&mut self, writer: &mut dyn DeviceWriter, mask: u8) -> Result<(), AdapterError> {
        WiiController::set_player_led(self, writer, mask)
    }
}

/// Extension payload decoded for the current classification.
enum ExtensionInput {
    Nunchuck(NunchuckData),
    Classic(ClassicData),
    WiiUPro(WiiUProData),
    TaTaCon(TaTaConData),
}

impl ExtensionInput {
    fn decode(extension: WiiExtension, report: &ExtensionReport<'_>) -> ReportResult<Option<Self>> {
        let input = match extension {
            WiiExtension::Nunchuck => Self::Nunchuck(NunchuckData::from_bytes(report.extension()?)),
            WiiExtension::Classic | WiiExtension::ClassicPro => {
                Self::Classic(ClassicData::from_bytes(report.extension()?))
            }
            WiiExtension::WiiUPro => Self::WiiUPro(WiiUProData::from_bytes(report.extension()?)),
            WiiExtension::TaTaCon => Self::TaTaCon(TaTaConData::from_bytes(report.extension()?)),
            WiiExtension::None | WiiExtension::Unsupported => return Ok(None),
        };
        Ok(Some(input))
    }

    fn apply(&self, state: &mut SwitchControllerState) {
        match self {
            Self::Nunchuck(data) => map_nunchuck(data, state),
            Self::Classic(data) => map_classic(data, state),
            Self::WiiUPro(data) => map_wiiu_pro(data, state),
            Self::TaTaCon(data) => map_tatacon(data, state),
        }
    }
}
