//! Capture file format and hex helpers.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use padbridge_adapter::DeviceRegistration;
use serde::{Deserialize, Serialize};

/// Which side of the bridge a captured report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Received from the physical controller.
    Device,
    /// Sent by the host console.
    Host,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureFrame {
    pub direction: Direction,
    /// Space-separated bytes, e.g. `"0x20 0x00 0x00 0x02"`.
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureFile {
    pub registration: DeviceRegistration,
    pub frames: Vec<CaptureFrame>,
}

impl CaptureFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read capture file '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse capture file '{}'", path.display()))
    }
}

/// Parse bytes written as `0x20 0x00`, `20 00`, `20,00` or `2000`.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    for token in s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let digits = token.trim_start_matches("0x").trim_start_matches("0X");
        if digits.is_empty() || (digits.len() > 2 && digits.len() % 2 != 0) {
            return Err(format!("invalid hex byte '{token}'"));
        }
        let mut rest = digits;
        while !rest.is_empty() {
            let split = rest.len().min(2);
            let (pair, tail) = rest
                .split_at_checked(split)
                .ok_or_else(|| format!("invalid hex byte '{token}'"))?;
            let byte = u8::from_str_radix(pair, 16)
                .map_err(|e| format!("invalid hex byte '{token}': {e}"))?;
            bytes.push(byte);
            rest = tail;
        }
    }
    if bytes.is_empty() {
        return Err("no bytes given".to_string());
    }
    Ok(bytes)
}

pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use padbridge_adapter::ControllerVariant;

    // ═══ Scenario: Report Byte Parsing ══════════════════════════════════════

    /// GIVEN bytes written with 0x prefixes
    /// WHEN parse_hex_bytes is called
    /// THEN every byte is returned in order
    #[test]
    fn given_prefixed_bytes_when_parsed_then_bytes_returned() {
        assert_eq!(parse_hex_bytes("0x20 0x00 0X02"), Ok(vec![0x20, 0x00, 0x02]));
    }

    /// GIVEN bytes without prefixes, comma separated or run together
    /// WHEN parse_hex_bytes is called
    /// THEN the same bytes are returned
    #[test]
    fn given_unprefixed_bytes_when_parsed_then_bytes_returned() {
        assert_eq!(parse_hex_bytes("a4 20,01"), Ok(vec![0xA4, 0x20, 0x01]));
        assert_eq!(parse_hex_bytes("A4200101"), Ok(vec![0xA4, 0x20, 0x01, 0x01]));
        assert_eq!(parse_hex_bytes("0x5"), Ok(vec![0x05]));
    }

    /// GIVEN malformed input
    /// WHEN parse_hex_bytes is called
    /// THEN it returns an error
    #[test]
    fn given_invalid_bytes_when_parsed_then_error_returned() {
        assert!(parse_hex_bytes("").is_err());
        assert!(parse_hex_bytes("0x").is_err());
        assert!(parse_hex_bytes("0xZZ").is_err());
        assert!(parse_hex_bytes("123").is_err());
        assert!(parse_hex_bytes("0x100").is_err());
    }

    /// GIVEN parsed bytes
    /// WHEN formatted and parsed again
    /// THEN the original bytes are recovered
    #[test]
    fn given_bytes_when_formatted_then_parse_recovers_them() {
        let bytes = [0x21, 0x00, 0xFA, 0x7F];
        assert_eq!(format_hex(&bytes), "0x21 0x00 0xFA 0x7F");
        assert_eq!(parse_hex_bytes(&format_hex(&bytes)), Ok(bytes.to_vec()));
    }

    // ═══ Scenario: Capture File Parsing ═════════════════════════════════════

    /// GIVEN a capture file with a registration and frames
    /// WHEN deserialized
    /// THEN the registration is validated and frames keep their order
    #[test]
    fn given_capture_json_when_parsed_then_registration_and_frames_restored()
    -> Result<(), Box<dyn std::error::Error>> {
        let capture: CaptureFile = serde_json::from_str(
            r#"{
                "registration": {"address": "00:1F:32:AB:CD:EF", "variant": "wii"},
                "frames": [
                    {"direction": "device", "data": "0x20 0x00 0x00 0x02 0x00 0x00 0xC8"},
                    {"direction": "host", "data": "0x01 0x00"}
                ]
            }"#,
        )?;
        assert_eq!(capture.registration.variant, ControllerVariant::Wii);
        assert_eq!(capture.frames.len(), 2);
        assert_eq!(capture.frames.first().map(|f| f.direction), Some(Direction::Device));
        assert_eq!(capture.frames.get(1).map(|f| f.direction), Some(Direction::Host));
        Ok(())
    }

    /// GIVEN a capture file whose registration has a bad address
    /// WHEN deserialized
    /// THEN parsing fails
    #[test]
    fn given_bad_registration_address_when_parsed_then_error_returned() {
        let result = serde_json::from_str::<CaptureFile>(
            r#"{"registration": {"address": "nope", "variant": "wii"}, "frames": []}"#,
        );
        assert!(result.is_err());
    }
}
