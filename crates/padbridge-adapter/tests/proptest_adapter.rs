//! Property-based tests for adapter robustness.
//!
//! Arbitrary device and host reports never fail an adapter call while the
//! transport is healthy, canonical sticks stay in range, and removing an
//! extension never leaves buttons from the old mapping behind.

use padbridge_adapter::{ControllerAdapter, ControllerVariant};
use padbridge_hid_common::BluetoothAddress;
use padbridge_hid_common::mock::RecordingWriter;
use padbridge_hid_switch_protocol::STICK_MAX;
use proptest::prelude::*;

const ADDRESS: BluetoothAddress = BluetoothAddress::new([0x00, 0x1F, 0x32, 0x01, 0x02, 0x03]);

fn attached(id: [u8; 6]) -> Result<(ControllerAdapter, RecordingWriter), TestCaseError> {
    let mut adapter = ControllerAdapter::new(ControllerVariant::Wii, ADDRESS);
    let mut writer = RecordingWriter::new();
    adapter.handle_incoming_report(&mut writer, &[0x20, 0x00, 0x00, 0x02, 0x00, 0x00, 0x80])?;

    let mut reply = [0u8; 22];
    reply[0] = 0x21;
    reply[3] = 0x50;
    reply[5] = 0xFA;
    reply[6..12].copy_from_slice(&id);
    adapter.handle_incoming_report(&mut writer, &reply)?;
    Ok((adapter, writer))
}

fn extension_ids() -> impl Strategy<Value = [u8; 6]> {
    prop_oneof![
        Just([0x00, 0x00, 0xA4, 0x20, 0x00, 0x00]),
        Just([0x00, 0x00, 0xA4, 0x20, 0x01, 0x01]),
        Just([0x01, 0x00, 0xA4, 0x20, 0x01, 0x01]),
        Just([0x00, 0x00, 0xA4, 0x20, 0x01, 0x20]),
        Just([0x00, 0x00, 0xA4, 0x20, 0x01, 0x11]),
        any::<[u8; 6]>(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_arbitrary_device_reports_never_fail(
        variant in prop_oneof![Just(ControllerVariant::Wii), Just(ControllerVariant::PassThrough)],
        raw in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut adapter = ControllerAdapter::new(variant, ADDRESS);
        let mut writer = RecordingWriter::new();
        prop_assert!(adapter.handle_incoming_report(&mut writer, &raw).is_ok());
        prop_assert!(adapter.handle_outgoing_report(&mut writer, &raw).is_ok());
    }

    #[test]
    fn prop_extension_reports_keep_sticks_in_range(
        id in extension_ids(),
        long in any::<bool>(),
        payload in any::<[u8; 21]>(),
    ) {
        let (mut adapter, mut writer) = attached(id)?;
        let report_id: u8 = if long { 0x34 } else { 0x32 };
        let len = if long { 22 } else { 11 };
        let mut report = vec![report_id];
        report.extend_from_slice(payload.get(..len - 1).unwrap_or_default());

        adapter.handle_incoming_report(&mut writer, &report)?;
        let state = adapter.state();
        prop_assert!(state.left_stick.x <= STICK_MAX && state.left_stick.y <= STICK_MAX);
        prop_assert!(state.right_stick.x <= STICK_MAX && state.right_stick.y <= STICK_MAX);
        prop_assert!(state.battery <= 8);
    }

    #[test]
    fn prop_extension_removal_clears_buttons(
        id in extension_ids(),
        payload in any::<[u8; 10]>(),
    ) {
        let (mut adapter, mut writer) = attached(id)?;
        let mut report = vec![0x32];
        report.extend_from_slice(&payload);
        adapter.handle_incoming_report(&mut writer, &report)?;

        adapter.handle_incoming_report(&mut writer, &[0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80])?;
        prop_assert!(!adapter.state().buttons.any_pressed());
        prop_assert_eq!(adapter.state().left_stick.x, 0x800);
    }
}
