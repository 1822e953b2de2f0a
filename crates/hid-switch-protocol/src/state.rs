//! Canonical controller state in the host protocol's terms.
//!
//! Every translated device is reduced to this model: the Switch Pro button
//! set, two 12-bit sticks, a 0-8 battery level, and the last rumble / LED
//! commands applied to the physical device.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

/// Neutral value of a canonical 12-bit stick axis.
pub const STICK_ZERO: u16 = 0x800;
/// Largest canonical stick axis value.
pub const STICK_MAX: u16 = 0xFFF;
/// Largest canonical battery level.
pub const BATTERY_FULL: u8 = 8;

/// Clamp a rescaled axis value into the canonical 12-bit range.
pub fn clamp_axis(value: f32) -> u16 {
    if value.is_nan() {
        return STICK_ZERO;
    }
    value.clamp(0.0, f32::from(STICK_MAX)) as u16
}

/// Canonical button flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchButtons {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub l: bool,
    pub r: bool,
    pub zl: bool,
    pub zr: bool,
    pub minus: bool,
    pub plus: bool,
    pub home: bool,
    pub lstick_press: bool,
    pub rstick_press: bool,
}

impl SwitchButtons {
    /// Pack into the three button bytes of a host input report.
    ///
    /// Layout: `[Y X B A SR SL R ZR]`, `[- + RS LS HOME CAP _ _]`,
    /// `[DOWN UP RIGHT LEFT SR SL L ZL]`, bit 0 first.
    pub fn to_bytes(&self) -> [u8; 3] {
        let bit = |flag: bool, shift: u8| u8::from(flag) << shift;
        [
            bit(self.y, 0)
                | bit(self.x, 1)
                | bit(self.b, 2)
                | bit(self.a, 3)
                | bit(self.r, 6)
                | bit(self.zr, 7),
            bit(self.minus, 0)
                | bit(self.plus, 1)
                | bit(self.rstick_press, 2)
                | bit(self.lstick_press, 3)
                | bit(self.home, 4),
            bit(self.dpad_down, 0)
                | bit(self.dpad_up, 1)
                | bit(self.dpad_right, 2)
                | bit(self.dpad_left, 3)
                | bit(self.l, 6)
                | bit(self.zl, 7),
        ]
    }

    /// Names of the buttons currently held, in a stable order.
    pub fn pressed(&self) -> Vec<&'static str> {
        [
            ("up", self.dpad_up),
            ("down", self.dpad_down),
            ("left", self.dpad_left),
            ("right", self.dpad_right),
            ("A", self.a),
            ("B", self.b),
            ("X", self.x),
            ("Y", self.y),
            ("L", self.l),
            ("R", self.r),
            ("ZL", self.zl),
            ("ZR", self.zr),
            ("minus", self.minus),
            ("plus", self.plus),
            ("home", self.home),
            ("lstick", self.lstick_press),
            ("rstick", self.rstick_press),
        ]
        .into_iter()
        .filter_map(|(name, held)| held.then_some(name))
        .collect()
    }

    pub fn any_pressed(&self) -> bool {
        *self != Self::default()
    }
}

/// A canonical analog stick, both axes in `[0, STICK_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogStick {
    pub x: u16,
    pub y: u16,
}

impl AnalogStick {
    pub const CENTERED: Self = Self {
        x: STICK_ZERO,
        y: STICK_ZERO,
    };

    /// Build a stick, masking each axis into the 12-bit range.
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x: x & STICK_MAX,
            y: y & STICK_MAX,
        }
    }

    /// Pack into the three-byte 12-bit pair used by host input reports.
    pub fn to_bytes(&self) -> [u8; 3] {
        let x = self.x & STICK_MAX;
        let y = self.y & STICK_MAX;
        [
            (x & 0xFF) as u8,
            ((x >> 8) as u8) | (((y & 0x0F) as u8) << 4),
            (y >> 4) as u8,
        ]
    }

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        let [b0, b1, b2] = bytes.map(u16::from);
        Self {
            x: b0 | ((b1 & 0x0F) << 8),
            y: (b1 >> 4) | (b2 << 4),
        }
    }
}

impl Default for AnalogStick {
    fn default() -> Self {
        Self::CENTERED
    }
}

/// One controller's translated input plus the last output commands applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwitchControllerState {
    pub buttons: SwitchButtons,
    pub left_stick: AnalogStick,
    pub right_stick: AnalogStick,
    /// 0 (empty or unknown) to 8 (full).
    pub battery: u8,
    pub ext_power: bool,
    pub charging: bool,
    pub rumble_state: bool,
    /// Low four bits only.
    pub player_led_mask: u8,
}

impl SwitchControllerState {
    /// Reset buttons and sticks to neutral.
    ///
    /// Battery, power flags, rumble, and LEDs describe the device rather than
    /// the current input and are kept.
    pub fn clear_input(&mut self) {
        self.buttons = SwitchButtons::default();
        self.left_stick = AnalogStick::CENTERED;
        self.right_stick = AnalogStick::CENTERED;
    }

    /// Battery/connection byte of a host input report.
    ///
    /// High nibble: level (even values 0-8) with bit 4 set while charging.
    /// Low nibble: connection type 3 (Pro Controller) with bit 0 set on
    /// external power.
    pub fn battery_connection_byte(&self) -> u8 {
        let level = self.battery.min(BATTERY_FULL) & 0x0E;
        (level << 4) | (u8::from(self.charging) << 4) | 0x06 | u8::from(self.ext_power)
    }
}
