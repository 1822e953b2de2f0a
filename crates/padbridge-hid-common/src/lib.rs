//! Common HID utilities shared by the padbridge protocol crates
//!
//! This crate provides the error types, checked report accessors, and the
//! transport seam (`DeviceWriter`) that every protocol implementation and
//! adapter uses.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod address;
pub mod report_parser;
pub mod writer;

pub use address::*;
pub use report_parser::*;
pub use writer::*;

use thiserror::Error;

/// Errors produced while viewing or building a raw report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Empty report")]
    Empty,

    #[error("Malformed report 0x{report_id:02X}: expected at least {expected} bytes, got {actual}")]
    Malformed {
        report_id: u8,
        expected: usize,
        actual: usize,
    },

    #[error("Unrecognized report id 0x{0:02X}")]
    UnknownReport(u8),

    #[error("Report payload of {len} bytes exceeds capacity {capacity}")]
    Overflow { len: usize, capacity: usize },
}

/// Errors surfaced by the transport collaborator when sending a report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Failed to send report to {address}: {message}")]
    SendFailed {
        address: BluetoothAddress,
        message: String,
    },
}

impl TransportError {
    /// Create a send failure for `address`.
    pub fn send_failed(address: BluetoothAddress, message: impl Into<String>) -> Self {
        TransportError::SendFailed {
            address,
            message: message.into(),
        }
    }

    /// Address of the device the failed send was aimed at.
    pub fn address(&self) -> BluetoothAddress {
        match self {
            TransportError::SendFailed { address, .. } => *address,
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = ReportError::Malformed {
            report_id: 0x21,
            expected: 22,
            actual: 4,
        };
        assert_eq!(
            format!("{}", err),
            "Malformed report 0x21: expected at least 22 bytes, got 4"
        );

        let err = ReportError::Empty;
        assert_eq!(format!("{}", err), "Empty report");
    }

    #[test]
    fn test_transport_error_carries_address() {
        let address = BluetoothAddress::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        let err = TransportError::send_failed(address, "link lost");
        assert_eq!(err.address(), address);
        assert_eq!(
            format!("{}", err),
            "Failed to send report to 01:02:03:04:05:06: link lost"
        );
    }
}
