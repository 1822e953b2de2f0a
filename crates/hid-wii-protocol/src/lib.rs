//! Wii Remote HID protocol: report views, extension identification, output
//! report builders, and translation into the Switch Pro canonical state.
//!
//! This crate is intentionally I/O-free. The stateful handshake (extension
//! initialisation, report mode switching) lives in `padbridge-adapter`.

#![deny(static_mut_refs)]

pub mod extension;
pub mod ids;
pub mod input;
pub mod mapping;
pub mod output;

// Flat re-exports so callers can use `padbridge_hid_wii_protocol::Foo`.
pub use extension::{ReportMode, WiiExtension, extension_id_from_bytes, extension_ids};
pub use ids::{
    MEMORY_READ_DATA_LEN, WRITE_MEMORY_MAX, extension_registers, input_report_ids,
    input_report_lens, output_report_ids, output_report_lens,
};
pub use input::{
    AckReport, ClassicButtons, ClassicData, CoreButtons, CoreReport, ExtensionReport,
    MemoryReadReport, NunchuckData, StatusReport, TaTaConData, WiiInputReport, WiiUProData,
    parse_input_report,
};
pub use mapping::{
    TRIGGER_THRESHOLD, map_buttons_horizontal, map_buttons_vertical, map_classic, map_nunchuck,
    map_tatacon, map_wiiu_pro, scale_axis, status_battery, wiiu_pro_battery,
};
pub use output::{
    LED_MASK, WiiOutputReport, build_player_leds, build_read_memory, build_report_mode,
    build_rumble, build_status_request, build_write_memory, parse_output_report,
};
