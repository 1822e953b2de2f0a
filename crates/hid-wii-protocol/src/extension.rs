//! Extension controller identification and data reporting modes.

#![deny(static_mut_refs)]

use crate::ids::input_report_ids;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Data reporting mode requested from the remote.
///
/// Each mode is named after the report id the remote then streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportMode {
    /// `0x30`: core buttons.
    CoreButtons,
    /// `0x31`: core buttons and accelerometer.
    #[default]
    CoreAccel,
    /// `0x32`: core buttons and 8 extension bytes.
    CoreExtension8,
    /// `0x34`: core buttons and 19 extension bytes.
    CoreExtension19,
}

impl ReportMode {
    pub fn id(self) -> u8 {
        match self {
            Self::CoreButtons => input_report_ids::CORE_BUTTONS,
            Self::CoreAccel => input_report_ids::CORE_ACCEL,
            Self::CoreExtension8 => input_report_ids::CORE_EXTENSION_8,
            Self::CoreExtension19 => input_report_ids::CORE_EXTENSION_19,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            input_report_ids::CORE_BUTTONS => Some(Self::CoreButtons),
            input_report_ids::CORE_ACCEL => Some(Self::CoreAccel),
            input_report_ids::CORE_EXTENSION_8 => Some(Self::CoreExtension8),
            input_report_ids::CORE_EXTENSION_19 => Some(Self::CoreExtension19),
            _ => None,
        }
    }
}

/// Known extension identifiers (first six bytes at `0xA400FA`, big-endian).
pub mod extension_ids {
    pub const NUNCHUCK: u64 = 0x0000_A420_0000;
    /// Some third-party nunchucks report `0xFF` in the first byte.
    pub const NUNCHUCK_ALT: u64 = 0xFF00_A420_0000;
    pub const CLASSIC: u64 = 0x0000_A420_0101;
    pub const CLASSIC_PRO: u64 = 0x0100_A420_0101;
    pub const WII_U_PRO: u64 = 0x0000_A420_0120;
    pub const TATACON: u64 = 0x0000_A420_0111;
}

/// Classification of whatever is plugged into the remote's extension port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WiiExtension {
    /// Nothing attached, or not yet identified.
    #[default]
    None,
    /// Attached but not recognised.
    Unsupported,
    Nunchuck,
    Classic,
    ClassicPro,
    WiiUPro,
    TaTaCon,
}

impl WiiExtension {
    /// Classify a 48-bit extension identifier.
    pub fn classify(id: u64) -> Self {
        use self::extension_ids::*;
        match id {
            NUNCHUCK | NUNCHUCK_ALT => Self::Nunchuck,
            CLASSIC => Self::Classic,
            CLASSIC_PRO => Self::ClassicPro,
            WII_U_PRO => Self::WiiUPro,
            TATACON => Self::TaTaCon,
            _ => {
                debug!(id = format_args!("{id:012X}"), "unrecognised extension identifier");
                Self::Unsupported
            }
        }
    }

    /// Reporting mode that carries this extension's data.
    pub fn report_mode(self) -> ReportMode {
        match self {
            Self::Nunchuck | Self::Classic | Self::ClassicPro | Self::TaTaCon => {
                ReportMode::CoreExtension8
            }
            Self::WiiUPro => ReportMode::CoreExtension19,
            Self::None | Self::Unsupported => ReportMode::CoreAccel,
        }
    }

    /// Whether the remote's own buttons are read in the upright orientation
    /// for extension report `report_id`.
    ///
    /// The Wii U Pro controller has no core buttons to remap.
    pub fn uses_vertical_mapping(self, report_id: u8) -> bool {
        match report_id {
            input_report_ids::CORE_EXTENSION_8 => matches!(
                self,
                Self::Nunchuck | Self::Classic | Self::ClassicPro | Self::TaTaCon
            ),
            input_report_ids::CORE_EXTENSION_19 => {
                matches!(self, Self::Nunchuck | Self::Classic | Self::ClassicPro)
            }
            _ => false,
        }
    }

    /// Whether the extension supplies its own battery level.
    pub fn reports_battery(self) -> bool {
        self == Self::WiiUPro
    }
}

impl fmt::Display for WiiExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Unsupported => "unsupported",
            Self::Nunchuck => "Nunchuck",
            Self::Classic => "Classic Controller",
            Self::ClassicPro => "Classic Controller Pro",
            Self::WiiUPro => "Wii U Pro Controller",
            Self::TaTaCon => "TaTaCon drum",
        };
        f.write_str(name)
    }
}

/// Read the six identifier bytes as a 48-bit big-endian value.
pub fn extension_id_from_bytes(bytes: [u8; 6]) -> u64 {
    let [a, b, c, d, e, g] = bytes;
    u64::from_be_bytes([0, 0, a, b, c, d, e, g])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_table() {
        let cases = [
            ([0x00, 0x00, 0xA4, 0x20, 0x00, 0x00], WiiExtension::Nunchuck),
            ([0xFF, 0x00, 0xA4, 0x20, 0x00, 0x00], WiiExtension::Nunchuck),
            ([0x00, 0x00, 0xA4, 0x20, 0x01, 0x01], WiiExtension::Classic),
            ([0x01, 0x00, 0xA4, 0x20, 0x01, 0x01], WiiExtension::ClassicPro),
            ([0x00, 0x00, 0xA4, 0x20, 0x01, 0x20], WiiExtension::WiiUPro),
            ([0x00, 0x00, 0xA4, 0x20, 0x01, 0x11], WiiExtension::TaTaCon),
            ([0x00, 0x00, 0xA4, 0x20, 0x04, 0x02], WiiExtension::Unsupported),
        ];
        for (bytes, expected) in cases {
            assert_eq!(WiiExtension::classify(extension_id_from_bytes(bytes)), expected);
        }
    }

    #[test]
    fn test_report_modes() {
        assert_eq!(WiiExtension::Nunchuck.report_mode().id(), 0x32);
        assert_eq!(WiiExtension::TaTaCon.report_mode().id(), 0x32);
        assert_eq!(WiiExtension::WiiUPro.report_mode().id(), 0x34);
        assert_eq!(WiiExtension::Unsupported.report_mode().id(), 0x31);
        assert_eq!(WiiExtension::None.report_mode(), ReportMode::default());
    }

    #[test]
    fn test_vertical_mapping_selection() {
        assert!(WiiExtension::TaTaCon.uses_vertical_mapping(0x32));
        assert!(!WiiExtension::TaTaCon.uses_vertical_mapping(0x34));
        assert!(WiiExtension::Classic.uses_vertical_mapping(0x34));
        assert!(!WiiExtension::WiiUPro.uses_vertical_mapping(0x34));
        assert!(!WiiExtension::Nunchuck.uses_vertical_mapping(0x31));
    }

    #[test]
    fn test_report_mode_id_round_trip() {
        for id in 0u8..=0xFF {
            if let Some(mode) = ReportMode::from_id(id) {
                assert_eq!(mode.id(), id);
            }
        }
    }
}
