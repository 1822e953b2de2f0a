//! Feed a capture through an adapter and collect the resulting traffic.

use anyhow::{Context, Result};
use padbridge_adapter::{ControllerAdapter, ControllerVariant, DeviceRegistration};
use padbridge_hid_common::mock::RecordingWriter;
use padbridge_hid_switch_protocol::SwitchControllerState;
use padbridge_hid_wii_protocol::{WiiExtension, WiiOutputReport, parse_output_report};
use serde::Serialize;
use tracing::debug;

use crate::capture::{CaptureFile, Direction, format_hex, parse_hex_bytes};

/// A report the adapter produced while handling one capture frame.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayEvent {
    /// Index of the triggering frame; `None` for the initial handshake.
    pub frame: Option<usize>,
    #[serde(flatten)]
    pub traffic: Traffic,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum Traffic {
    /// Sent to the physical controller.
    Device {
        data: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        decoded: Option<WiiOutputReport>,
    },
    /// A sub-command reply framed as a host input report.
    Host { data: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub registration: DeviceRegistration,
    pub frames: usize,
    pub events: Vec<ReplayEvent>,
    pub extension: Option<WiiExtension>,
    pub report_mode: Option<u8>,
    pub state: SwitchControllerState,
}

pub fn replay(capture: &CaptureFile) -> Result<ReplaySummary> {
    let variant = capture.registration.variant;
    let mut adapter = ControllerAdapter::from_registration(&capture.registration);
    let mut writer = RecordingWriter::new();
    let mut events = Vec::new();
    let mut timer: u8 = 0;

    adapter
        .initialize(&mut writer)
        .context("Adapter initialization failed")?;
    drain_device_traffic(variant, &mut writer, None, &mut events);

    for (index, frame) in capture.frames.iter().enumerate() {
        let data = parse_hex_bytes(&frame.data)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Frame {index} has invalid data"))?;
        debug!(frame = index, direction = ?frame.direction, len = data.len(), "Replaying frame");

        let reply = match frame.direction {
            Direction::Device => {
                adapter
                    .handle_incoming_report(&mut writer, &data)
                    .with_context(|| format!("Frame {index}: device report failed"))?;
                None
            }
            Direction::Host => adapter
                .handle_outgoing_report(&mut writer, &data)
                .with_context(|| format!("Frame {index}: host report failed"))?,
        };
        drain_device_traffic(variant, &mut writer, Some(index), &mut events);

        if let Some(reply) = reply {
            let report = reply
                .to_input_report(timer, adapter.state())
                .with_context(|| format!("Frame {index}: reply does not fit a host report"))?;
            timer = timer.wrapping_add(1);
            events.push(ReplayEvent {
                frame: Some(index),
                traffic: Traffic::Host {
                    data: format_hex(&report),
                },
            });
        }
    }

    Ok(ReplaySummary {
        registration: capture.registration,
        frames: capture.frames.len(),
        events,
        extension: adapter.extension(),
        report_mode: adapter.report_mode().map(|mode| mode.id()),
        state: *adapter.state(),
    })
}

fn drain_device_traffic(
    variant: ControllerVariant,
    writer: &mut RecordingWriter,
    frame: Option<usize>,
    events: &mut Vec<ReplayEvent>,
) {
    for data in writer.reports() {
        let decoded = match variant {
            ControllerVariant::Wii => parse_output_report(&data).ok(),
            ControllerVariant::PassThrough => None,
        };
        events.push(ReplayEvent {
            frame,
            traffic: Traffic::Device {
                data: format_hex(&data),
                decoded,
            },
        });
    }
    writer.clear();
}

pub fn print_human(summary: &ReplaySummary) {
    println!(
        "Replayed {} frame(s) for {} ({})",
        summary.frames, summary.registration.address, summary.registration.variant
    );
    for event in &summary.events {
        let frame = event
            .frame
            .map_or_else(|| "init".to_string(), |index| index.to_string());
        match &event.traffic {
            Traffic::Device { data, .. } => println!("[{frame:>4}] -> device  {data}"),
            Traffic::Host { data } => println!("[{frame:>4}] -> host    {data}"),
        }
    }

    println!();
    if let Some(extension) = summary.extension {
        println!("Extension:   {extension}");
    }
    if let Some(mode) = summary.report_mode {
        println!("Report mode: 0x{mode:02X}");
    }
    let state = &summary.state;
    let pressed = state.buttons.pressed();
    println!(
        "Buttons:     {}",
        if pressed.is_empty() {
            "(none)".to_string()
        } else {
            pressed.join(", ")
        }
    );
    println!("Left stick:  ({}, {})", state.left_stick.x, state.left_stick.y);
    println!("Right stick: ({}, {})", state.right_stick.x, state.right_stick.y);
    println!(
        "Battery:     {}/8{}",
        state.battery,
        if state.charging { " (charging)" } else { "" }
    );
    println!("Rumble:      {}", if state.rumble_state { "on" } else { "off" });
    println!("Player LEDs: {:04b}", state.player_led_mask);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureFrame;
    use padbridge_hid_common::BluetoothAddress;

    fn frame(direction: Direction, data: &str) -> CaptureFrame {
        CaptureFrame {
            direction,
            data: data.to_string(),
        }
    }

    fn wii_capture(frames: Vec<CaptureFrame>) -> CaptureFile {
        CaptureFile {
            registration: DeviceRegistration::new(
                BluetoothAddress::new([0x00, 0x1F, 0x32, 0xAB, 0xCD, 0xEF]),
                ControllerVariant::Wii,
            ),
            frames,
        }
    }

    // ═══ Scenario: Wii Remote With Classic Controller ═══════════════════════

    /// GIVEN a capture of a classic controller being attached and identified
    /// WHEN it is replayed
    /// THEN the handshake traffic is recorded and the extension is classified
    #[test]
    fn given_classic_attach_capture_when_replayed_then_extension_identified()
    -> Result<(), Box<dyn std::error::Error>> {
        let capture = wii_capture(vec![
            frame(Direction::Device, "20 00 00 02 00 00 C8"),
            frame(
                Direction::Device,
                "21 00 00 50 00 FA 00 00 A4 20 01 01 00 00 00 00 00 00 00 00 00 00",
            ),
            frame(Direction::Device, "32 00 00 A0 20 10 1F FF FF 00 00"),
        ]);
        let summary = replay(&capture)?;

        assert_eq!(summary.extension, Some(WiiExtension::Classic));
        assert_eq!(summary.report_mode, Some(0x32));
        assert!(summary.state.buttons.r);
        assert_eq!(summary.state.battery, 8);

        let device: Vec<_> = summary
            .events
            .iter()
            .filter_map(|e| match &e.traffic {
                Traffic::Device { data, .. } => Some((e.frame, data.as_str())),
                Traffic::Host { .. } => None,
            })
            .collect();
        assert_eq!(device.len(), 6);
        assert_eq!(device.first(), Some(&(None, "0x12 0x00 0x31")));
        assert_eq!(device.last(), Some(&(Some(1), "0x12 0x00 0x32")));
        Ok(())
    }

    // ═══ Scenario: Host Handshake ═══════════════════════════════════════════

    /// GIVEN a host sub-command frame
    /// WHEN it is replayed
    /// THEN device traffic precedes the framed host reply
    #[test]
    fn given_host_led_request_when_replayed_then_reply_follows_device_write()
    -> Result<(), Box<dyn std::error::Error>> {
        let capture = wii_capture(vec![frame(
            Direction::Host,
            "01 00 00 01 40 40 00 01 40 40 30 01",
        )]);
        let summary = replay(&capture)?;

        let from_frame: Vec<_> = summary.events.iter().filter(|e| e.frame == Some(0)).collect();
        assert_eq!(from_frame.len(), 2);
        assert!(matches!(
            from_frame.first().map(|e| &e.traffic),
            Some(Traffic::Device {
                decoded: Some(WiiOutputReport::PlayerLeds { mask: 1, rumble: false }),
                ..
            })
        ));
        match from_frame.get(1).map(|e| &e.traffic) {
            Some(Traffic::Host { data }) => assert!(data.starts_with("0x21 0x00")),
            other => return Err(format!("expected host reply, got {other:?}").into()),
        }
        assert_eq!(summary.state.player_led_mask, 0x01);
        Ok(())
    }

    /// GIVEN a frame with unparseable bytes
    /// WHEN it is replayed
    /// THEN the replay fails naming the frame
    #[test]
    fn given_bad_frame_data_when_replayed_then_error_names_frame() {
        let capture = wii_capture(vec![frame(Direction::Device, "0x30 0xZZ")]);
        let err = replay(&capture).err().map(|e| format!("{e:#}"));
        assert!(err.is_some_and(|msg| msg.contains("Frame 0")));
    }

    /// GIVEN a pass-through registration
    /// WHEN device input is replayed
    /// THEN no device traffic or extension is reported
    #[test]
    fn given_pass_through_capture_when_replayed_then_state_untouched()
    -> Result<(), Box<dyn std::error::Error>> {
        let mut capture = wii_capture(vec![frame(Direction::Device, "30 00 91 08")]);
        capture.registration.variant = ControllerVariant::PassThrough;
        let summary = replay(&capture)?;

        assert!(summary.events.is_empty());
        assert_eq!(summary.extension, None);
        assert_eq!(summary.state, SwitchControllerState::default());
        Ok(())
    }
}
