//! Pass-through adapter: input is forwarded untouched, only the host's
//! sub-command handshake is answered.

use crate::AdapterError;
use crate::emulation::{self, EmulationHooks};
use padbridge_hid_common::{BluetoothAddress, DeviceWriter};
use padbridge_hid_switch_protocol::{RumbleData, SubcommandReply, SwitchControllerState};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct PassThroughController {
    address: BluetoothAddress,
    state: SwitchControllerState,
}

impl PassThroughController {
    pub fn new(address: BluetoothAddress) -> Self {
        debug!(%address, "Created PassThroughController");
        Self {
            address,
            state: SwitchControllerState::default(),
        }
    }

    pub fn address(&self) -> BluetoothAddress {
        self.address
    }

    /// Never mutated by input; the device already speaks the host protocol.
    pub fn state(&self) -> &SwitchControllerState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = SwitchControllerState::default();
    }

    pub fn initialize(&mut self, _writer: &mut dyn DeviceWriter) -> Result<(), AdapterError> {
        debug!(address = %self.address, "Pass-through device needs no handshake");
        Ok(())
    }

    pub fn handle_incoming_report(
        &mut self,
        _writer: &mut dyn DeviceWriter,
        raw: &[u8],
    ) -> Result<(), AdapterError> {
        trace!(address = %self.address, len = raw.len(), "Passing input through");
        Ok(())
    }

    pub fn handle_outgoing_report(
        &mut self,
        writer: &mut dyn DeviceWriter,
        raw: &[u8],
    ) -> Result<Option<SubcommandReply>, AdapterError> {
        let address = self.address;
        emulation::handle_host_report(self, writer, &address, raw)
    }
}

impl EmulationHooks for PassThroughController {
    fn set_vibration(
        &mut self,
        _writer: &mut dyn DeviceWriter,
        rumble: &RumbleData,
    ) -> Result<(), AdapterError> {
        trace!(address = %self.address, active = rumble.is_active(), "Vibration request ignored");
        Ok(())
    }

    fn set_player_led(&mut self, _writer: &mut dyn DeviceWriter, mask: u8) -> Result<(), AdapterError> {
        trace!(address = %self.address, mask, "Player LED request ignored");
        Ok(())
    }
}
