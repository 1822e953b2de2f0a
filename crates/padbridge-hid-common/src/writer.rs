//! Transport seam between protocol adapters and the Bluetooth HID link

use crate::{BluetoothAddress, TransportError};

/// Abstraction for sending a raw output report to a physical device.
///
/// Implementations are synchronous and fallible; adapters never retry a
/// failed send and surface the error to their caller.
pub trait DeviceWriter: Send {
    fn send_report(
        &mut self,
        address: &BluetoothAddress,
        data: &[u8],
    ) -> Result<(), TransportError>;
}

pub mod mock {
    use super::*;

    /// A report captured by [`RecordingWriter`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentReport {
        pub address: BluetoothAddress,
        pub data: Vec<u8>,
    }

    /// In-memory writer that records every report it is handed.
    #[derive(Debug, Default)]
    pub struct RecordingWriter {
        sent: Vec<SentReport>,
        fail_after: Option<usize>,
    }

    impl RecordingWriter {
        pub fn new() -> Self {
            Self::default()
        }

        /// A writer whose every send fails.
        pub fn with_failure() -> Self {
            Self::failing_after(0)
        }

        /// A writer that accepts `count` sends and fails afterwards.
        pub fn failing_after(count: usize) -> Self {
            Self {
                sent: Vec::new(),
                fail_after: Some(count),
            }
        }

        pub fn sent(&self) -> &[SentReport] {
            &self.sent
        }

        /// Raw bytes of every recorded report, in send order.
        pub fn reports(&self) -> Vec<Vec<u8>> {
            self.sent.iter().map(|r| r.data.clone()).collect()
        }

        pub fn clear(&mut self) {
            self.sent.clear();
        }
    }

    impl DeviceWriter for RecordingWriter {
        fn send_report(
            &mut self,
            address: &BluetoothAddress,
            data: &[u8],
        ) -> Result<(), TransportError> {
            if self.fail_after.is_some_and(|limit| self.sent.len() >= limit) {
                return Err(TransportError::send_failed(*address, "mock write failure"));
            }
            self.sent.push(SentReport {
                address: *address,
                data: data.to_vec(),
            });
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::RecordingWriter;
    use super::*;

    #[test]
    fn test_recording_writer_keeps_order() -> Result<(), TransportError> {
        let address = BluetoothAddress::new([1, 2, 3, 4, 5, 6]);
        let mut writer = RecordingWriter::new();

        writer.send_report(&address, &[0x12, 0x00, 0x31])?;
        writer.send_report(&address, &[0x15, 0x00])?;

        assert_eq!(writer.reports(), vec![vec![0x12, 0x00, 0x31], vec![0x15, 0x00]]);
        assert!(writer.sent().iter().all(|r| r.address == address));
        Ok(())
    }

    #[test]
    fn test_recording_writer_failure_after_limit() {
        let address = BluetoothAddress::new([1, 2, 3, 4, 5, 6]);
        let mut writer = RecordingWriter::failing_after(1);

        assert!(writer.send_report(&address, &[0x10, 0x01]).is_ok());
        assert_eq!(
            writer.send_report(&address, &[0x10, 0x00]),
            Err(TransportError::send_failed(address, "mock write failure"))
        );
        assert_eq!(writer.sent().len(), 1);
    }
}
