//! Translation of Wii Remote and extension input into the canonical state.
//!
//! Core buttons are assigned outright. Extension routines either assign or
//! OR onto flags the core buttons already set, depending on the button; the
//! choice per button is part of each routine's contract and is pinned by the
//! tests below.

#![deny(static_mut_refs)]

use crate::input::{ClassicData, CoreButtons, NunchuckData, TaTaConData, WiiUProData};
use padbridge_hid_switch_protocol::{
    AnalogStick, BATTERY_FULL, STICK_MAX, STICK_ZERO, SwitchButtons, SwitchControllerState, clamp_axis,
};

/// Trigger pressure above which a Classic Controller shoulder counts as held.
pub const TRIGGER_THRESHOLD: u8 = 0x0F;

const NUNCHUCK_STICK_ORIGIN: u8 = 0x80;
const NUNCHUCK_STICK_RANGE: f32 = 184.0;
const CLASSIC_LEFT_ORIGIN: u8 = 0x20;
const CLASSIC_LEFT_RANGE: f32 = 63.0;
const CLASSIC_RIGHT_ORIGIN: u8 = 0x10;
const CLASSIC_RIGHT_RANGE: f32 = 31.0;
const WIIU_PRO_STICK_GAIN: f32 = 2.0;
const WIIU_PRO_BATTERY_FULL: u8 = 0b111;

/// Rescale a native axis around `origin` into the canonical 12-bit space.
///
/// `range` is the native span mapped onto the full canonical span.
pub fn scale_axis(value: u8, origin: u8, range: f32) -> u16 {
    let offset = f32::from(value) - f32::from(origin);
    clamp_axis(f32::from(STICK_MAX) / range * offset + f32::from(STICK_ZERO))
}

/// Remote held sideways (no extension): the d-pad rotates a quarter turn and
/// `1`/`2` become the face buttons.
pub fn map_buttons_horizontal(core: &CoreButtons, buttons: &mut SwitchButtons) {
    buttons.dpad_down = core.left;
    buttons.dpad_up = core.right;
    buttons.dpad_right = core.down;
    buttons.dpad_left = core.up;

    buttons.a = core.two;
    buttons.b = core.one;
    buttons.r = core.a;
    buttons.l = core.b;

    buttons.minus = core.minus;
    buttons.plus = core.plus;
    buttons.home = core.home;
}

/// Remote held upright next to an extension: d-pad and A/B pass through,
/// `1`/`2` become R/ZR.
pub fn map_buttons_vertical(core: &CoreButtons, buttons: &mut SwitchButtons) {
    buttons.dpad_down = core.down;
    buttons.dpad_up = core.up;
    buttons.dpad_right = core.right;
    buttons.dpad_left = core.left;

    buttons.a = core.a;
    buttons.b = core.b;
    buttons.r = core.one;
    buttons.zr = core.two;

    buttons.minus = core.minus;
    buttons.plus = core.plus;
    buttons.home = core.home;
}

pub fn map_nunchuck(data: &NunchuckData, state: &mut SwitchControllerState) {
    state.left_stick = AnalogStick {
        x: scale_axis(data.stick_x, NUNCHUCK_STICK_ORIGIN, NUNCHUCK_STICK_RANGE),
        y: scale_axis(data.stick_y, NUNCHUCK_STICK_ORIGIN, NUNCHUCK_STICK_RANGE),
    };
    state.buttons.l = data.c;
    state.buttons.zl = data.z;
}

pub fn map_classic(data: &ClassicData, state: &mut SwitchControllerState) {
    state.left_stick = AnalogStick {
        x: scale_axis(data.left_x, CLASSIC_LEFT_ORIGIN, CLASSIC_LEFT_RANGE),
        y: scale_axis(data.left_y, CLASSIC_LEFT_ORIGIN, CLASSIC_LEFT_RANGE),
    };
    state.right_stick = AnalogStick {
        x: scale_axis(data.right_x, CLASSIC_RIGHT_ORIGIN, CLASSIC_RIGHT_RANGE),
        y: scale_axis(data.right_y, CLASSIC_RIGHT_ORIGIN, CLASSIC_RIGHT_RANGE),
    };

    let ext = &data.buttons;
    let out = &mut state.buttons;
    out.dpad_down |= ext.down;
    out.dpad_up |= ext.up;
    out.dpad_right |= ext.right;
    out.dpad_left |= ext.left;

    // The vertical core mapping never writes X/Y/L/ZL, so these are assigned
    // to let a release clear them.
    out.y = ext.y;
    out.x = ext.x;
    out.b |= ext.b;
    out.a |= ext.a;

    out.r |= ext.r || data.right_trigger > TRIGGER_THRESHOLD;
    out.zr |= ext.zr;
    out.l = ext.l || data.left_trigger > TRIGGER_THRESHOLD;
    out.zl = ext.zl;

    out.minus |= ext.minus;
    out.plus |= ext.plus;
    out.home |= ext.home;
}

pub fn map_wiiu_pro(data: &WiiUProData, state: &mut SwitchControllerState) {
    let scale = |v: u16| {
        clamp_axis(WIIU_PRO_STICK_GAIN * (f32::from(v) - f32::from(STICK_ZERO)) + f32::from(STICK_ZERO))
    };
    state.left_stick = AnalogStick {
        x: scale(data.left_x),
        y: scale(data.left_y),
    };
    state.right_stick = AnalogStick {
        x: scale(data.right_x),
        y: scale(data.right_y),
    };

    let ext = &data.buttons;
    state.buttons = SwitchButtons {
        dpad_up: ext.up,
        dpad_down: ext.down,
        dpad_left: ext.left,
        dpad_right: ext.right,
        a: ext.a,
        b: ext.b,
        x: ext.x,
        y: ext.y,
        l: ext.l,
        r: ext.r,
        zl: ext.zl,
        zr: ext.zr,
        minus: ext.minus,
        plus: ext.plus,
        home: ext.home,
        lstick_press: data.lstick_press,
        rstick_press: data.rstick_press,
    };

    state.ext_power = data.usb_connected;
    state.charging = data.charging;
    state.battery = wiiu_pro_battery(data.battery);
}

pub fn map_tatacon(data: &TaTaConData, state: &mut SwitchControllerState) {
    state.buttons.x = data.right_rim;
    state.buttons.y = data.right_center;
    state.buttons.dpad_up |= data.left_rim;
    state.buttons.dpad_right |= data.left_center;
}

/// Wii U Pro 3-bit battery field to the canonical 0-8 scale.
pub fn wiiu_pro_battery(field: u8) -> u8 {
    let field = field & WIIU_PRO_BATTERY_FULL;
    if field == WIIU_PRO_BATTERY_FULL {
        0
    } else {
        (field << 1).min(BATTERY_FULL)
    }
}

/// Status report battery byte (0-255) to the canonical 0-8 scale.
pub fn status_battery(level: u8) -> u8 {
    if level == 0 {
        0
    } else {
        ((level - 1) / 64 + 1) * 2
    }
}
