//! Host rumble frame decoding.
//!
//! Every host `0x01` and `0x10` report carries eight bytes of rumble data:
//! one four-byte frame per motor (left, right). Frequencies and amplitudes
//! are kept as the encoded wire codes; a code of zero means silence.

#![deny(static_mut_refs)]

/// Bytes of rumble data in a host report (two motors).
pub const RUMBLE_DATA_LEN: usize = 8;

/// Rumble frame that leaves a motor silent.
pub const NEUTRAL_FRAME: [u8; 4] = [0x00, 0x01, 0x40, 0x40];

/// Encoded rumble parameters for one motor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RumbleMotor {
    pub high_band_freq: u16,
    pub high_band_amp: u8,
    pub low_band_freq: u8,
    pub low_band_amp: u8,
}

impl RumbleMotor {
    /// Decode one four-byte motor frame.
    pub fn from_frame(frame: [u8; 4]) -> Self {
        let [b0, b1, b2, b3] = frame;
        Self {
            high_band_freq: u16::from(b0) | (u16::from(b1 & 0x01) << 8),
            high_band_amp: b1 >> 1,
            low_band_freq: b2 & 0x7F,
            low_band_amp: ((b3.wrapping_sub(0x40) & 0x7F) << 1) | (b2 >> 7),
        }
    }

    pub fn is_active(&self) -> bool {
        self.high_band_amp > 0 || self.low_band_amp > 0
    }
}

/// Rumble parameters for both motors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RumbleData {
    pub left: RumbleMotor,
    pub right: RumbleMotor,
}

impl RumbleData {
    pub fn from_bytes(bytes: [u8; RUMBLE_DATA_LEN]) -> Self {
        let [l0, l1, l2, l3, r0, r1, r2, r3] = bytes;
        Self {
            left: RumbleMotor::from_frame([l0, l1, l2, l3]),
            right: RumbleMotor::from_frame([r0, r1, r2, r3]),
        }
    }

    /// A rumble command is active when any band of either motor has amplitude.
    pub fn is_active(&self) -> bool {
        self.left.is_active() || self.right.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_frame_is_silent() {
        let motor = RumbleMotor::from_frame(NEUTRAL_FRAME);
        assert_eq!(motor.high_band_amp, 0);
        assert_eq!(motor.low_band_amp, 0);
        assert!(!motor.is_active());

        let data = RumbleData::from_bytes([0x00, 0x01, 0x40, 0x40, 0x00, 0x01, 0x40, 0x40]);
        assert!(!data.is_active());
    }

    #[test]
    fn test_amplitude_codes() {
        // High band amplitude 0x31, low band amplitude 0x45 on the right motor.
        let motor = RumbleMotor::from_frame([0x00, 0x62, 0x80, 0x62]);
        assert_eq!(motor.high_band_amp, 0x31);
        assert_eq!(motor.low_band_amp, 0x45);
        assert_eq!(motor.low_band_freq, 0x00);

        let data = RumbleData::from_bytes([0x00, 0x01, 0x40, 0x40, 0x00, 0x62, 0x80, 0x62]);
        assert!(!data.left.is_active());
        assert!(data.right.is_active());
        assert!(data.is_active());
    }

    #[test]
    fn test_only_low_band_counts_as_active() {
        let motor = RumbleMotor::from_frame([0x00, 0x01, 0x40, 0x41]);
        assert_eq!(motor.high_band_amp, 0);
        assert_eq!(motor.low_band_amp, 0x02);
        assert!(motor.is_active());
    }
}
