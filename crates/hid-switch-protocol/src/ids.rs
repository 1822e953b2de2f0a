//! Report, sub-command, and acknowledgement ids of the Switch Pro Controller protocol.

#![deny(static_mut_refs)]

/// Report IDs sent by the host to the controller.
pub mod host_report_ids {
    /// Rumble data followed by a sub-command block.
    pub const SUBCOMMAND: u8 = 0x01;
    /// Rumble data only.
    pub const RUMBLE: u8 = 0x10;
}

/// Report IDs sent by the controller to the host.
pub mod input_report_ids {
    /// Standard input report carrying a sub-command reply.
    pub const SUBCOMMAND_REPLY: u8 = 0x21;
}

/// Sub-command ids carried at byte 10 of a host `0x01` report.
pub mod subcommand_ids {
    pub const GET_CONTROLLER_STATE: u8 = 0x00;
    pub const MANUAL_PAIR: u8 = 0x01;
    pub const REQUEST_DEVICE_INFO: u8 = 0x02;
    pub const SET_INPUT_REPORT_MODE: u8 = 0x03;
    pub const TRIGGERS_ELAPSED_TIME: u8 = 0x04;
    pub const SET_HCI_STATE: u8 = 0x06;
    pub const RESET_PAIRING_INFO: u8 = 0x07;
    pub const SET_SHIP_POWER_STATE: u8 = 0x08;
    pub const SPI_FLASH_READ: u8 = 0x10;
    pub const SPI_FLASH_WRITE: u8 = 0x11;
    pub const SPI_SECTOR_ERASE: u8 = 0x12;
    pub const RESET_MCU: u8 = 0x20;
    pub const SET_MCU_CONFIG: u8 = 0x21;
    pub const SET_MCU_STATE: u8 = 0x22;
    pub const SET_PLAYER_LEDS: u8 = 0x30;
    pub const GET_PLAYER_LEDS: u8 = 0x31;
    pub const SET_HOME_LED: u8 = 0x38;
    pub const ENABLE_IMU: u8 = 0x40;
    pub const SET_IMU_SENSITIVITY: u8 = 0x41;
    pub const WRITE_IMU_REGISTERS: u8 = 0x42;
    pub const READ_IMU_REGISTERS: u8 = 0x43;
    pub const ENABLE_VIBRATION: u8 = 0x48;
    pub const GET_REGULATED_VOLTAGE: u8 = 0x50;
}

/// Leading acknowledgement byte of a sub-command reply.
pub mod ack {
    /// Plain success acknowledgement.
    pub const GENERIC: u8 = 0x80;
    /// Device info payload follows.
    pub const DEVICE_INFO: u8 = 0x82;
    /// Elapsed-time style reply.
    pub const TRIGGERS_ELAPSED_TIME: u8 = 0x83;
    /// SPI flash read payload follows.
    pub const SPI_FLASH_READ: u8 = 0x90;
    /// MCU configuration block follows.
    pub const MCU_CONFIG: u8 = 0xA0;
}

/// Sub-commands the identity emulation answers.
///
/// Ids outside this set are reserved or unsupported and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    RequestDeviceInfo,
    SetInputReportMode,
    TriggersElapsedTime,
    SetShipPowerState,
    SpiFlashRead,
    SpiFlashWrite,
    SpiSectorErase,
    SetMcuConfig,
    SetMcuState,
    SetPlayerLeds,
    EnableImu,
    EnableVibration,
}

impl Subcommand {
    pub fn from_id(id: u8) -> Option<Self> {
        use self::subcommand_ids::*;
        match id {
            REQUEST_DEVICE_INFO => Some(Self::RequestDeviceInfo),
            SET_INPUT_REPORT_MODE => Some(Self::SetInputReportMode),
            TRIGGERS_ELAPSED_TIME => Some(Self::TriggersElapsedTime),
            SET_SHIP_POWER_STATE => Some(Self::SetShipPowerState),
            SPI_FLASH_READ => Some(Self::SpiFlashRead),
            SPI_FLASH_WRITE => Some(Self::SpiFlashWrite),
            SPI_SECTOR_ERASE => Some(Self::SpiSectorErase),
            SET_MCU_CONFIG => Some(Self::SetMcuConfig),
            SET_MCU_STATE => Some(Self::SetMcuState),
            SET_PLAYER_LEDS => Some(Self::SetPlayerLeds),
            ENABLE_IMU => Some(Self::EnableImu),
            ENABLE_VIBRATION => Some(Self::EnableVibration),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        use self::subcommand_ids::*;
        match self {
            Self::RequestDeviceInfo => REQUEST_DEVICE_INFO,
            Self::SetInputReportMode => SET_INPUT_REPORT_MODE,
            Self::TriggersElapsedTime => TRIGGERS_ELAPSED_TIME,
            Self::SetShipPowerState => SET_SHIP_POWER_STATE,
            Self::SpiFlashRead => SPI_FLASH_READ,
            Self::SpiFlashWrite => SPI_FLASH_WRITE,
            Self::SpiSectorErase => SPI_SECTOR_ERASE,
            Self::SetMcuConfig => SET_MCU_CONFIG,
            Self::SetMcuState => SET_MCU_STATE,
            Self::SetPlayerLeds => SET_PLAYER_LEDS,
            Self::EnableImu => ENABLE_IMU,
            Self::EnableVibration => ENABLE_VIBRATION,
        }
    }
}
