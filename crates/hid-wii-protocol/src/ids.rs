//! Wii Remote report ids, report lengths, and register addresses.
//!
//! Layouts follow the Wiibrew protocol notes. Report ids double as data
//! reporting modes: after `set_report_mode(0x32)` the remote streams `0x32`
//! reports.

#![deny(static_mut_refs)]

/// Report IDs sent by the remote.
pub mod input_report_ids {
    /// Status information (extension flag, battery).
    pub const STATUS: u8 = 0x20;
    /// Memory/register read reply.
    pub const MEMORY_READ: u8 = 0x21;
    /// Acknowledgement of an output report.
    pub const ACK: u8 = 0x22;
    /// Core buttons.
    pub const CORE_BUTTONS: u8 = 0x30;
    /// Core buttons and accelerometer.
    pub const CORE_ACCEL: u8 = 0x31;
    /// Core buttons and 8 extension bytes.
    pub const CORE_EXTENSION_8: u8 = 0x32;
    /// Core buttons and 19 extension bytes.
    pub const CORE_EXTENSION_19: u8 = 0x34;
}

/// Report IDs sent to the remote.
pub mod output_report_ids {
    pub const RUMBLE: u8 = 0x10;
    pub const PLAYER_LEDS: u8 = 0x11;
    pub const REPORT_MODE: u8 = 0x12;
    pub const STATUS_REQUEST: u8 = 0x15;
    pub const WRITE_MEMORY: u8 = 0x16;
    pub const READ_MEMORY: u8 = 0x17;
}

/// Minimum wire length (including the id byte) of each input report.
pub mod input_report_lens {
    pub const STATUS: usize = 7;
    pub const MEMORY_READ: usize = 22;
    pub const ACK: usize = 5;
    pub const CORE_BUTTONS: usize = 3;
    pub const CORE_ACCEL: usize = 6;
    pub const CORE_EXTENSION_8: usize = 11;
    pub const CORE_EXTENSION_19: usize = 22;
}

/// Wire length (including the id byte) of each output report.
pub mod output_report_lens {
    pub const RUMBLE: usize = 2;
    pub const PLAYER_LEDS: usize = 2;
    pub const REPORT_MODE: usize = 3;
    pub const STATUS_REQUEST: usize = 2;
    pub const WRITE_MEMORY: usize = 22;
    pub const READ_MEMORY: usize = 7;
}

/// Extension controller registers.
///
/// Writing `0x55` then `0x00` disables the extension's data encryption and
/// makes the identifier at `0xA400FA` legible.
pub mod extension_registers {
    /// Register space flag (`0x04`) plus the extension register block.
    pub const INIT_1: u32 = 0x04A4_00F0;
    pub const INIT_1_VALUE: u8 = 0x55;
    pub const INIT_2: u32 = 0x04A4_00FB;
    pub const INIT_2_VALUE: u8 = 0x00;
    /// Six-byte extension identifier.
    pub const IDENTIFIER: u32 = 0x04A4_00FA;
    pub const IDENTIFIER_LEN: u16 = 6;
    /// Low 16 bits of [`IDENTIFIER`], as echoed by a `0x21` reply.
    pub const IDENTIFIER_ECHO: u16 = 0x00FA;
}

/// Largest data block of a single memory write.
pub const WRITE_MEMORY_MAX: usize = 16;
/// Data bytes carried by a memory read reply.
pub const MEMORY_READ_DATA_LEN: usize = 16;
