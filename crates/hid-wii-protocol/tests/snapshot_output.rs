//! Snapshot tests for Wii Remote output report encoding.

use insta::assert_snapshot;
use padbridge_hid_wii_protocol::{
    ReportMode, build_read_memory, build_report_mode, build_write_memory, extension_registers,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_snapshot_extension_init_sequence() -> TestResult {
    let frames = [
        build_write_memory(
            extension_registers::INIT_1,
            &[extension_registers::INIT_1_VALUE],
            false,
        )?
        .to_vec(),
        build_write_memory(
            extension_registers::INIT_2,
            &[extension_registers::INIT_2_VALUE],
            false,
        )?
        .to_vec(),
        build_read_memory(
            extension_registers::IDENTIFIER,
            extension_registers::IDENTIFIER_LEN,
            false,
        )?
        .to_vec(),
    ];
    let lines: Vec<String> = frames.iter().map(|f| format!("{f:02X?}")).collect();
    assert_snapshot!(lines.join("\n"), @r"
    [16, 04, A4, 00, F0, 01, 55, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]
    [16, 04, A4, 00, FB, 01, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]
    [17, 04, A4, 00, FA, 00, 06]
    ");
    Ok(())
}

#[test]
fn test_snapshot_report_mode_with_rumble() {
    let report = build_report_mode(ReportMode::CoreExtension19, true);
    assert_snapshot!(format!("{report:02X?}"), @"[12, 01, 34]");
}
