//! Device registration: which adapter variant to build for which address.

use padbridge_hid_common::{AddressParseError, BluetoothAddress};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerVariant {
    Wii,
    PassThrough,
}

impl ControllerVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wii => "wii",
            Self::PassThrough => "pass_through",
        }
    }
}

impl fmt::Display for ControllerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControllerVariant {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wii" => Ok(Self::Wii),
            "pass_through" => Ok(Self::PassThrough),
            other => Err(RegistrationError::UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid device address '{text}': {source}")]
    InvalidAddress {
        text: String,
        source: AddressParseError,
    },

    #[error("Unknown controller variant '{0}'")]
    UnknownVariant(String),

    #[error("Invalid registration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Construction parameters for one adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegistrationRecord")]
pub struct DeviceRegistration {
    pub address: BluetoothAddress,
    pub variant: ControllerVariant,
}

/// Registration as written on disk, before validation.
#[derive(Debug, Deserialize)]
struct RegistrationRecord {
    address: String,
    variant: String,
}

impl TryFrom<RegistrationRecord> for DeviceRegistration {
    type Error = RegistrationError;

    fn try_from(record: RegistrationRecord) -> Result<Self, Self::Error> {
        let address = record
            .address
            .parse::<BluetoothAddress>()
            .map_err(|source| RegistrationError::InvalidAddress {
                text: record.address.clone(),
                source,
            })?;
        Ok(Self {
            address,
            variant: record.variant.parse()?,
        })
    }
}

impl DeviceRegistration {
    pub fn new(address: BluetoothAddress, variant: ControllerVariant) -> Self {
        Self { address, variant }
    }

    /// Parse `{"address": "AA:BB:CC:DD:EE:FF", "variant": "wii"}`.
    pub fn from_json_str(json: &str) -> Result<Self, RegistrationError> {
        let record: RegistrationRecord = serde_json::from_str(json)?;
        Self::try_from(record)
    }

    pub fn to_json_string(&self) -> Result<String, RegistrationError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registration() -> Result<(), Box<dyn std::error::Error>> {
        let registration =
            DeviceRegistration::from_json_str(r#"{"address": "00:1F:32:AB:CD:EF", "variant": "wii"}"#)?;
        assert_eq!(
            registration.address,
            BluetoothAddress::new([0x00, 0x1F, 0x32, 0xAB, 0xCD, 0xEF])
        );
        assert_eq!(registration.variant, ControllerVariant::Wii);
        Ok(())
    }

    #[test]
    fn test_round_trip_through_json() -> Result<(), Box<dyn std::error::Error>> {
        let registration = DeviceRegistration::new(
            BluetoothAddress::new([1, 2, 3, 4, 5, 6]),
            ControllerVariant::PassThrough,
        );
        let json = registration.to_json_string()?;
        assert_eq!(json, r#"{"address":"01:02:03:04:05:06","variant":"pass_through"}"#);
        assert_eq!(DeviceRegistration::from_json_str(&json)?, registration);
        Ok(())
    }

    #[test]
    fn test_invalid_address_rejected() {
        let result =
            DeviceRegistration::from_json_str(r#"{"address": "00:1F:32:AB:CD", "variant": "wii"}"#);
        assert!(matches!(
            result,
            Err(RegistrationError::InvalidAddress {
                source: AddressParseError::WrongLength(5),
                ..
            })
        ));

        let result =
            DeviceRegistration::from_json_str(r#"{"address": "00:1F:32:AB:CD:ZZ", "variant": "wii"}"#);
        assert!(matches!(result, Err(RegistrationError::InvalidAddress { .. })));
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let result = DeviceRegistration::from_json_str(
            r#"{"address": "00:1F:32:AB:CD:EF", "variant": "gamecube"}"#,
        );
        assert!(matches!(result, Err(RegistrationError::UnknownVariant(v)) if v == "gamecube"));
    }

    #[test]
    fn test_missing_field_is_json_error() {
        let result = DeviceRegistration::from_json_str(r#"{"address": "00:1F:32:AB:CD:EF"}"#);
        assert!(matches!(result, Err(RegistrationError::Json(_))));
    }

    #[test]
    fn test_embedded_registration_deserializes() -> Result<(), Box<dyn std::error::Error>> {
        #[derive(Deserialize)]
        struct Capture {
            registration: DeviceRegistration,
        }
        let capture: Capture = serde_json::from_str(
            r#"{"registration": {"address": "AA:BB:CC:DD:EE:FF", "variant": "pass_through"}}"#,
        )?;
        assert_eq!(capture.registration.variant, ControllerVariant::PassThrough);
        Ok(())
    }
}
