//! Typed view of a single raw report, rendered as JSON.

use anyhow::{Context, Result};
use padbridge_hid_switch_protocol::{
    HostReport, RumbleData, RumbleMotor, Subcommand, SubcommandRequest, parse_host_report,
};
use padbridge_hid_wii_protocol::{WiiExtension, WiiInputReport, parse_input_report, status_battery};
use serde_json::{Value, json};

use crate::capture::{Direction, format_hex};

pub fn decode(from: Direction, data: &[u8]) -> Result<Value> {
    match from {
        Direction::Device => decode_device(data),
        Direction::Host => decode_host(data),
    }
}

fn decode_device(data: &[u8]) -> Result<Value> {
    let report = parse_input_report(data).context("Not a Wii remote input report")?;
    let value = match report {
        WiiInputReport::Status(status) => json!({
            "report": "status",
            "buttons": status.buttons(),
            "extension_connected": status.extension_connected(),
            "battery_low": status.battery_low(),
            "leds": status.leds(),
            "battery_level": status.battery_level(),
            "battery": status_battery(status.battery_level()),
        }),
        WiiInputReport::MemoryRead(reply) => {
            let valid = reply
                .data()
                .get(..usize::from(reply.size()))
                .unwrap_or(reply.data());
            let extension = reply
                .is_extension_identifier()
                .then(|| WiiExtension::classify(reply.extension_id()));
            json!({
                "report": "memory_read",
                "buttons": reply.buttons(),
                "address": format!("0x{:04X}", reply.address()),
                "size": reply.size(),
                "error": reply.error(),
                "data": format_hex(valid),
                "extension": extension,
            })
        }
        WiiInputReport::Ack(ack) => json!({
            "report": "ack",
            "acknowledged_report": format!("0x{:02X}", ack.acknowledged_report()),
            "error_code": ack.error_code(),
        }),
        WiiInputReport::Core(core) => json!({
            "report": format!("0x{:02X}", core.report_id()),
            "buttons": core.buttons(),
            "accel": core.accel(),
        }),
        WiiInputReport::Extension(report) => json!({
            "report": format!("0x{:02X}", report.report_id()),
            "buttons": report.buttons(),
            "extension_bytes": format_hex(report.payload()),
        }),
    };
    Ok(value)
}

fn decode_host(data: &[u8]) -> Result<Value> {
    let report = parse_host_report(data).context("Not a host output report")?;
    let value = match report {
        HostReport::Rumble(rumble) => json!({
            "report": "rumble",
            "packet_counter": rumble.packet_counter(),
            "rumble": rumble_json(&rumble.rumble()),
        }),
        HostReport::Subcommand(request) => subcommand_json(&request),
    };
    Ok(value)
}

fn subcommand_json(request: &SubcommandRequest<'_>) -> Value {
    let subcommand = request.subcommand();
    let mut value = json!({
        "report": "subcommand",
        "packet_counter": request.packet_counter(),
        "rumble": rumble_json(&request.rumble()),
        "subcommand_id": format!("0x{:02X}", request.subcommand_id()),
        "subcommand": subcommand.map(|s| format!("{s:?}")),
        "args": format_hex(request.args()),
    });

    let extra = match subcommand {
        Some(Subcommand::SpiFlashRead | Subcommand::SpiFlashWrite | Subcommand::SpiSectorErase) => {
            request.spi_args().ok().map(|spi| {
                (
                    "spi",
                    json!({ "address": format!("0x{:08X}", spi.address), "length": spi.length }),
                )
            })
        }
        Some(Subcommand::SetPlayerLeds) => request
            .player_led_mask()
            .ok()
            .map(|mask| ("player_leds", json!(mask & 0x0F))),
        _ => None,
    };
    if let (Some((key, extra)), Some(object)) = (extra, value.as_object_mut()) {
        object.insert(key.to_string(), extra);
    }
    value
}

fn rumble_json(rumble: &RumbleData) -> Value {
    let motor = |m: &RumbleMotor| {
        json!({
            "high_band_freq": m.high_band_freq,
            "high_band_amp": m.high_band_amp,
            "low_band_freq": m.low_band_freq,
            "low_band_amp": m.low_band_amp,
        })
    };
    json!({
        "active": rumble.is_active(),
        "left": motor(&rumble.left),
        "right": motor(&rumble.right),
    })
}
