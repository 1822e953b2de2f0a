//! Property-based tests for Wii extension mapping and output encoding.
//!
//! Covers canonical stick bounds for every extension layout, determinism of
//! extension classification, and the player LED encode/decode round-trip.

use padbridge_hid_switch_protocol::{STICK_MAX, SwitchControllerState};
use padbridge_hid_wii_protocol::{
    ClassicData, NunchuckData, WiiExtension, WiiOutputReport, WiiUProData, build_player_leds,
    extension_id_from_bytes, extension_ids, map_classic, map_nunchuck, map_wiiu_pro,
    parse_output_report,
};
use proptest::prelude::*;

fn sticks_in_range(state: &SwitchControllerState) -> bool {
    [state.left_stick, state.right_stick]
        .iter()
        .all(|s| s.x <= STICK_MAX && s.y <= STICK_MAX)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_nunchuck_sticks_in_range(ext in any::<[u8; 6]>()) {
        let mut state = SwitchControllerState::default();
        map_nunchuck(&NunchuckData::from_bytes(&ext), &mut state);
        prop_assert!(sticks_in_range(&state), "{state:?}");
    }

    #[test]
    fn prop_classic_sticks_in_range(ext in any::<[u8; 6]>()) {
        let mut state = SwitchControllerState::default();
        map_classic(&ClassicData::from_bytes(&ext), &mut state);
        prop_assert!(sticks_in_range(&state), "{state:?}");
    }

    #[test]
    fn prop_wiiu_pro_sticks_in_range(ext in any::<[u8; 11]>()) {
        let mut state = SwitchControllerState::default();
        map_wiiu_pro(&WiiUProData::from_bytes(&ext), &mut state);
        prop_assert!(sticks_in_range(&state), "{state:?}");
        prop_assert!(state.battery <= 8);
    }

    /// Classification depends only on the identifier bytes.
    #[test]
    fn prop_classification_is_deterministic(bytes in any::<[u8; 6]>()) {
        let id = extension_id_from_bytes(bytes);
        let first = WiiExtension::classify(id);
        let second = WiiExtension::classify(id);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.report_mode(), second.report_mode());

        let known = [
            extension_ids::NUNCHUCK,
            extension_ids::NUNCHUCK_ALT,
            extension_ids::CLASSIC,
            extension_ids::CLASSIC_PRO,
            extension_ids::WII_U_PRO,
            extension_ids::TATACON,
        ];
        if !known.contains(&id) {
            prop_assert_eq!(first, WiiExtension::Unsupported);
            prop_assert_eq!(first.report_mode().id(), 0x31);
        }
    }

    /// Encoding an LED mask and decoding the report recovers the 4-bit mask.
    #[test]
    fn prop_player_led_round_trip(mask in 0u8..=0x0F, rumble in any::<bool>()) {
        let decoded = parse_output_report(&build_player_leds(mask, rumble))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, WiiOutputReport::PlayerLeds { mask, rumble });
    }
}
