//! Switch Pro Controller host protocol: canonical controller state, host
//! report views, sub-command replies, and the simulated SPI flash image.
//!
//! This crate is I/O-free. Every device family is translated into
//! [`SwitchControllerState`]; the identity emulation answers host
//! sub-commands with [`SubcommandReply`] values.

#![deny(static_mut_refs)]

pub mod host;
pub mod ids;
pub mod reply;
pub mod rumble;
pub mod spi;
pub mod state;

// Flat re-exports so callers can use `padbridge_hid_switch_protocol::Foo`.
pub use host::{
    HostReport, RumbleReport, SUBCOMMAND_REPORT_MIN_LEN, SpiArgs, SubcommandRequest,
    parse_host_report,
};
pub use ids::{Subcommand, ack, host_report_ids, input_report_ids, subcommand_ids};
pub use reply::{INPUT_REPORT_LEN, REPLY_MAX_LEN, SubcommandReply};
pub use rumble::{NEUTRAL_FRAME, RUMBLE_DATA_LEN, RumbleData, RumbleMotor};
pub use spi::{COLOR_ADDRESS, ERASED, FLASH_REGIONS, FlashRegion, SPI_READ_MAX, read_flash};
pub use state::{
    AnalogStick, BATTERY_FULL, STICK_MAX, STICK_ZERO, SwitchButtons, SwitchControllerState,
    clamp_axis,
};
