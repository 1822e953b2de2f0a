//! Per-device controller adapters.
//!
//! A [`ControllerAdapter`] is created when a device connects and dropped when
//! it disconnects. It owns the device's canonical [`SwitchControllerState`],
//! updates it from raw device reports, answers host reports, and sends every
//! outgoing device report through a caller-supplied [`DeviceWriter`].
//!
//! Entry points are synchronous. Follow-up commands triggered by one incoming
//! report are sent before the call returns, so a caller feeding reports in
//! arrival order preserves the device's request/acknowledgement ordering.

#![deny(static_mut_refs)]

pub mod emulation;
pub mod passthrough;
pub mod registration;
pub mod wii;


pub use emulation::{EmulationHooks, handle_host_report};
pub use passthrough::PassThroughController;
pub use registration::{ControllerVariant, DeviceRegistration, RegistrationError};
pub use wii::WiiController;

use padbridge_hid_common::{BluetoothAddress, DeviceWriter, ReportError, TransportError};
use padbridge_hid_switch_protocol::{RumbleData, SubcommandReply, SwitchControllerState};
use padbridge_hid_wii_protocol::{ReportMode, WiiExtension};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An outgoing command could not be encoded (e.g. an oversized memory write).
    #[error("Cannot encode outgoing report: {0}")]
    Encode(ReportError),
}

/// One connected device, dispatched by variant.
#[derive(Debug, Clone)]
pub enum ControllerAdapter {
    Wii(WiiController),
    PassThrough(PassThroughController),
}

impl ControllerAdapter {
    pub fn new(variant: ControllerVariant, address: BluetoothAddress) -> Self {
        match variant {
            ControllerVariant::Wii => Self::Wii(WiiController::new(address)),
            ControllerVariant::PassThrough => Self::PassThrough(PassThroughController::new(address)),
        }
    }

    pub fn from_registration(registration: &DeviceRegistration) -> Self {
        info!(
            address = %registration.address,
            variant = %registration.variant,
            "Registering controller"
        );
        Self::new(registration.variant, registration.address)
    }

    pub fn variant(&self) -> ControllerVariant {
        match self {
            Self::Wii(_) => ControllerVariant::Wii,
            Self::PassThrough(_) => ControllerVariant::PassThrough,
        }
    }

    pub fn address(&self) -> BluetoothAddress {
        match self {
            Self::Wii(wii) => wii.address(),
            Self::PassThrough(device) => device.address(),
        }
    }

    /// Snapshot source for the host-facing input report encoder.
    pub fn state(&self) -> &SwitchControllerState {
        match self {
            Self::Wii(wii) => wii.state(),
            Self::PassThrough(device) => device.state(),
        }
    }

    /// Attached extension; `None` for variants without extensions.
    pub fn extension(&self) -> Option<WiiExtension> {
        match self {
            Self::Wii(wii) => Some(wii.extension()),
            Self::PassThrough(_) => None,
        }
    }

    pub fn report_mode(&self) -> Option<ReportMode> {
        match self {
            Self::Wii(wii) => Some(wii.report_mode()),
            Self::PassThrough(_) => None,
        }
    }

    pub fn initialize(&mut self, writer: &mut dyn DeviceWriter) -> Result<(), AdapterError> {
        match self {
            Self::Wii(wii) => wii.initialize(writer),
            Self::PassThrough(device) => device.initialize(writer),
        }
    }

    /// Apply a raw report received from the physical device.
    pub fn handle_incoming_report(
        &mut self,
        writer: &mut dyn DeviceWriter,
        raw: &[u8],
    ) -> Result<(), AdapterError> {
        match self {
            Self::Wii(wii) => wii.handle_incoming_report(writer, raw),
            Self::PassThrough(device) => device.handle_incoming_report(writer, raw),
        }
    }

    /// Handle a raw report from the host. Returns the sub-command reply to
    /// frame back to the host, if one is due.
    pub fn handle_outgoing_report(
        &mut self,
        writer: &mut dyn DeviceWriter,
        raw: &[u8],
    ) -> Result<Option<SubcommandReply>, AdapterError> {
        match self {
            Self::Wii(wii) => wii.handle_outgoing_report(writer, raw),
            Self::PassThrough(device) => device.handle_outgoing_report(writer, raw),
        }
    }

    pub fn set_vibration(
        &mut self,
        writer: &mut dyn DeviceWriter,
        rumble: &RumbleData,
    ) -> Result<(), AdapterError> {
        match self {
            Self::Wii(wii) => wii.set_vibration(writer, rumble),
            Self::PassThrough(device) => EmulationHooks::set_vibration(device, writer, rumble),
        }
    }

    pub fn set_player_led(&mut self, writer: &mut dyn DeviceWriter, mask: u8) -> Result<(), AdapterError> {
        match self {
            Self::Wii(wii) => wii.set_player_led(writer, mask),
            Self::PassThrough(device) => EmulationHooks::set_player_led(device, writer, mask),
        }
    }

    /// Return to the post-construction state, e.g. after a disconnect.
    pub fn reset(&mut self) {
        match self {
            Self::Wii(wii) => wii.reset(),
            Self::PassThrough(device) => device.reset(),
        }
    }
}
