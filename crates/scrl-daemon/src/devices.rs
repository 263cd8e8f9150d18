//! Device directory: ready devices with human-readable labels

use std::time::Duration;

use scrl_core::locale::{Label, Language};
use scrl_core::prelude::*;
use scrl_core::types::{is_wireless_serial, DeviceRecord};

use crate::bridge::Bridge;

/// Timeout for `adb devices`
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for each per-device property query
pub const PROP_TIMEOUT: Duration = Duration::from_secs(5);

/// State column value of a device that accepts commands
const READY_STATE: &str = "device";

/// One row of `adb devices` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceListing {
    pub serial: String,
    pub state: String,
}

impl DeviceListing {
    pub fn is_ready(&self) -> bool {
        self.state == READY_STATE
    }
}

/// Parse `adb devices` output.
///
/// The header and daemon start-up chatter are skipped; every remaining
/// `serial<TAB>state` row is returned regardless of state.
pub fn parse_device_list(output: &str) -> Vec<DeviceListing> {
    output
        .lines()
        .filter(|line| !line.starts_with("List of devices"))
        .filter_map(|line| {
            let (serial, state) = line.trim().split_once('\t')?;
            let serial = serial.trim();
            if serial.is_empty() {
                return None;
            }
            Some(DeviceListing {
                serial: serial.to_string(),
                state: state.trim().to_string(),
            })
        })
        .collect()
}

/// What the property probe learned about a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelProbe {
    Known { manufacturer: String, model: String },
    /// A property query timed out (commonly an unauthorized device)
    TimedOut,
    /// The query failed or returned nothing useful
    Unavailable,
}

/// Build the display label for a serial.
///
/// Known USB devices show the serial in parentheses, known wireless devices
/// show the localized "Wireless" marker instead.
pub fn compose_label(serial: &str, probe: &LabelProbe, lang: Language) -> String {
    let wireless = is_wireless_serial(serial);
    let wireless_suffix = Label::DeviceWireless.text(lang);

    match probe {
        LabelProbe::Known {
            manufacturer,
            model,
        } => {
            if wireless {
                format!("{} {} ({})", manufacturer, model, wireless_suffix)
            } else {
                format!("{} {} ({})", manufacturer, model, serial)
            }
        }
        LabelProbe::TimedOut if wireless => format!("{} ({})", serial, wireless_suffix),
        LabelProbe::TimedOut => {
            format!("{} ({})", serial, Label::DeviceUnauthorized.text(lang))
        }
        LabelProbe::Unavailable if wireless => format!("{} ({})", serial, wireless_suffix),
        LabelProbe::Unavailable => serial.to_string(),
    }
}

/// Read one system property from a device
pub async fn getprop<B: Bridge + ?Sized>(bridge: &B, serial: &str, key: &str) -> Result<String> {
    let output = bridge
        .run(&["-s", serial, "shell", "getprop", key], PROP_TIMEOUT)
        .await?;
    Ok(output.stdout.trim().to_string())
}

/// Query manufacturer and model concurrently
pub async fn probe_label<B: Bridge + ?Sized>(bridge: &B, serial: &str) -> LabelProbe {
    let (manufacturer, model) = tokio::join!(
        getprop(bridge, serial, "ro.product.manufacturer"),
        getprop(bridge, serial, "ro.product.model"),
    );

    match (manufacturer, model) {
        (Ok(manufacturer), Ok(model)) if !manufacturer.is_empty() && !model.is_empty() => {
            LabelProbe::Known {
                manufacturer,
                model,
            }
        }
        (Err(e), _) | (_, Err(e)) if e.is_timeout() => {
            debug!("Property query timed out for {}", serial);
            LabelProbe::TimedOut
        }
        (Err(e), _) | (_, Err(e)) => {
            debug!("Property query failed for {}: {}", serial, e);
            LabelProbe::Unavailable
        }
        _ => LabelProbe::Unavailable,
    }
}

/// Enumerate ready devices.
///
/// Fails only when the list itself cannot be obtained (`ToolNotFound`,
/// `Timeout`); per-device label failures fall back to the serial.
pub async fn enumerate<B: Bridge + ?Sized>(bridge: &B, lang: Language) -> Result<Vec<DeviceRecord>> {
    let output = bridge.run(&["devices"], LIST_TIMEOUT).await?;

    let listings = parse_device_list(&output.stdout);
    for skipped in listings.iter().filter(|l| !l.is_ready()) {
        debug!("Skipping {} in state '{}'", skipped.serial, skipped.state);
    }

    let mut devices = Vec::new();
    for listing in listings.into_iter().filter(DeviceListing::is_ready) {
        let probe = probe_label(bridge, &listing.serial).await;
        let label = compose_label(&listing.serial, &probe, lang);
        devices.push(DeviceRecord::new(listing.serial, label));
    }

    if devices.is_empty() {
        warn!("No devices found");
    } else {
        info!("Found {} device(s)", devices.len());
    }

    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{devices_output, FakeBridge};

    #[test]
    fn test_parse_device_list() {
        let output = "List of devices attached\nABC123\tdevice\n192.168.1.5:5555\tdevice\nXYZ\tunauthorized\n\n";
        let listings = parse_device_list(output);
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].serial, "ABC123");
        assert!(listings[0].is_ready());
        assert!(!listings[2].is_ready());
    }

    #[test]
    fn test_parse_device_list_skips_daemon_chatter() {
        let output = "* daemon not running; starting now at tcp:5037\n* daemon started successfully\nList of devices attached\nABC123\tdevice\n";
        let listings = parse_device_list(output);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].serial, "ABC123");
    }

    #[test]
    fn test_parse_device_list_empty() {
        assert!(parse_device_list("List of devices attached\n\n").is_empty());
        assert!(parse_device_list("").is_empty());
    }

    #[test]
    fn test_compose_label_known() {
        let probe = LabelProbe::Known {
            manufacturer: "Sample".into(),
            model: "X1".into(),
        };
        assert_eq!(
            compose_label("ABC123", &probe, Language::English),
            "Sample X1 (ABC123)"
        );
        assert_eq!(
            compose_label("192.168.1.5:5555", &probe, Language::English),
            "Sample X1 (Wireless)"
        );
        assert_eq!(
            compose_label("192.168.1.5:5555", &probe, Language::Chinese),
            "Sample X1 (无线)"
        );
    }

    #[test]
    fn test_compose_label_fallbacks() {
        assert_eq!(
            compose_label("ABC123", &LabelProbe::TimedOut, Language::English),
            "ABC123 (Unauthorized)"
        );
        assert_eq!(
            compose_label("10.0.0.7:5555", &LabelProbe::TimedOut, Language::English),
            "10.0.0.7:5555 (Wireless)"
        );
        assert_eq!(
            compose_label("ABC123", &LabelProbe::Unavailable, Language::English),
            "ABC123"
        );
    }

    #[tokio::test]
    async fn test_enumerate_builds_labels() {
        let bridge = FakeBridge::new()
            .reply("devices", &devices_output(&[("ABC123", "device")]))
            .reply("-s ABC123 shell getprop ro.product.manufacturer", "Sample\n")
            .reply("-s ABC123 shell getprop ro.product.model", "X1\n");

        let devices = enumerate(&bridge, Language::English).await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].serial, "ABC123");
        assert_eq!(devices[0].display_label, "Sample X1 (ABC123)");
        assert!(!devices[0].is_wireless);
    }

    #[tokio::test]
    async fn test_enumerate_drops_non_ready_devices() {
        let bridge = FakeBridge::new().reply(
            "devices",
            &devices_output(&[("AAA", "unauthorized"), ("BBB", "offline")]),
        );

        let devices = enumerate(&bridge, Language::English).await.unwrap();
        assert!(devices.is_empty());
        assert_eq!(bridge.calls(), vec!["devices".to_string()]);
    }

    #[tokio::test]
    async fn test_enumerate_label_timeout_marks_unauthorized() {
        let bridge = FakeBridge::new()
            .reply("devices", &devices_output(&[("ABC123", "device")]))
            .reply("-s ABC123 shell getprop ro.product.manufacturer", "Sample")
            .reply_timeout("-s ABC123 shell getprop ro.product.model");

        let devices = enumerate(&bridge, Language::English).await.unwrap();
        assert_eq!(devices[0].display_label, "ABC123 (Unauthorized)");
    }

    #[tokio::test]
    async fn test_enumerate_wireless_without_props() {
        let bridge = FakeBridge::new().reply(
            "devices",
            &devices_output(&[("192.168.1.5:5555", "device")]),
        );

        let devices = enumerate(&bridge, Language::English).await.unwrap();
        assert_eq!(devices[0].display_label, "192.168.1.5:5555 (Wireless)");
        assert!(devices[0].is_wireless);
    }

    #[tokio::test]
    async fn test_enumerate_propagates_missing_tool() {
        let bridge = FakeBridge::new().missing_tool();
        let result = enumerate(&bridge, Language::English).await;
        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }

    #[tokio::test]
    async fn test_enumerate_propagates_list_timeout() {
        let bridge = FakeBridge::new().reply_timeout("devices");
        let result = enumerate(&bridge, Language::English).await;
        assert!(matches!(result, Err(Error::Timeout { .. })));
    }

    #[tokio::test]
    #[ignore] // Requires adb and an attached device
    async fn test_enumerate_integration() {
        let bridge = crate::bridge::AdbBridge::default();
        let devices = enumerate(&bridge, Language::English).await;
        assert!(devices.is_ok());
    }
}
