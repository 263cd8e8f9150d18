//! Wireless debugging: TCP/IP mode, connect and disconnect

use std::net::Ipv4Addr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use scrl_core::prelude::*;
use scrl_core::types::{is_wireless_serial, DeviceRecord};

use crate::bridge::Bridge;

/// Port the device daemon listens on after `tcpip`
pub const WIRELESS_PORT: u16 = 5555;

pub const IP_ROUTE_TIMEOUT: Duration = Duration::from_secs(10);
pub const TCPIP_TIMEOUT: Duration = Duration::from_secs(10);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between `tcpip` and `connect` while the device daemon restarts
pub const ADBD_RESTART_DELAY: Duration = Duration::from_secs(2);

static WLAN_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"dev\s+wlan0\s+.*?src\s+(\d+\.\d+\.\d+\.\d+)").expect("Invalid wlan route regex")
});

static SRC_WLAN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"src\s+(\d+\.\d+\.\d+\.\d+)\s+.*?wlan0").expect("Invalid wlan route regex")
});

/// Extract the WLAN address from `ip route` output
pub fn parse_wlan_ip(output: &str) -> Option<String> {
    WLAN_SRC_REGEX
        .captures(output)
        .or_else(|| SRC_WLAN_REGEX.captures(output))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// `IP:5555`
pub fn connect_target(ip: &str) -> String {
    format!("{}:{}", ip, WIRELESS_PORT)
}

pub fn is_valid_ipv4(input: &str) -> bool {
    input.trim().parse::<Ipv4Addr>().is_ok()
}

/// First attached device that is not a network serial
pub fn first_usb_device(devices: &[DeviceRecord]) -> Option<&DeviceRecord> {
    devices.iter().find(|d| !d.is_wireless)
}

/// Read the device's WLAN address.
///
/// A route table with no WLAN entry is [`Error::ParseMiss`].
pub async fn device_ip<B: Bridge + ?Sized>(bridge: &B, serial: &str) -> Result<String> {
    let output = bridge
        .run(&["-s", serial, "shell", "ip", "route"], IP_ROUTE_TIMEOUT)
        .await?;

    let preview: String = output.stdout.trim().chars().take(100).collect();
    debug!("ip route output for {}: {}", serial, preview);

    parse_wlan_ip(&output.stdout).ok_or_else(|| Error::parse_miss("ip route"))
}

/// Switch a USB device's daemon to TCP/IP mode. Returns the tool's message.
pub async fn enable_tcpip<B: Bridge + ?Sized>(bridge: &B, serial: &str) -> Result<String> {
    let port = WIRELESS_PORT.to_string();
    let output = bridge
        .run(&["-s", serial, "tcpip", &port], TCPIP_TIMEOUT)
        .await?;

    let message = output.combined();
    if message.is_empty() {
        Ok("TCP/IP mode enabled".to_string())
    } else {
        Ok(message)
    }
}

/// Result of a `connect` attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOutcome {
    /// `IP:5555`
    pub target: String,
    pub connected: bool,
    /// Raw tool output, trimmed
    pub output: String,
}

/// Connect to `ip` on the wireless port.
///
/// The bridge reports both fresh and existing connections with a line
/// containing "connected"; anything else counts as a failed attempt.
pub async fn connect<B: Bridge + ?Sized>(bridge: &B, ip: &str) -> Result<ConnectOutcome> {
    let target = connect_target(ip.trim());
    let output = bridge.run(&["connect", &target], CONNECT_TIMEOUT).await?;

    let text = output.stdout.trim().to_string();
    let connected = text.to_lowercase().contains("connected");
    if connected {
        info!("Connected to {}", target);
    } else {
        warn!("Connect to {} may have failed: {}", target, text);
    }

    Ok(ConnectOutcome {
        target,
        connected,
        output: text,
    })
}

/// Drop a network connection. The bridge's exit status is unreliable here,
/// so only call failures are errors.
pub async fn disconnect<B: Bridge + ?Sized>(bridge: &B, serial: &str) -> Result<String> {
    let output = bridge
        .run(&["disconnect", serial], DISCONNECT_TIMEOUT)
        .await?;
    info!("Disconnected {}", serial);
    Ok(output.combined())
}

/// Whether the selection may be disconnected: network serials, plus
/// stale entries whose label marks them unauthorized or offline.
pub fn can_disconnect(device: &DeviceRecord) -> bool {
    if is_wireless_serial(&device.serial) {
        return true;
    }
    let label = device.display_label.to_lowercase();
    ["offline", "unauthorized", "未授权", "离线"]
        .iter()
        .any(|marker| label.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBridge;

    const ROUTE_OUTPUT: &str =
        "192.168.1.0/24 dev wlan0 proto kernel scope link src 192.168.1.5 \n";

    #[test]
    fn test_parse_wlan_ip() {
        assert_eq!(parse_wlan_ip(ROUTE_OUTPUT).as_deref(), Some("192.168.1.5"));
    }

    #[test]
    fn test_parse_wlan_ip_src_before_interface() {
        let output = "default via 10.0.0.1 src 10.0.0.42 table wlan0\n";
        assert_eq!(parse_wlan_ip(output).as_deref(), Some("10.0.0.42"));
    }

    #[test]
    fn test_parse_wlan_ip_ignores_other_interfaces() {
        let output = "10.0.2.0/24 dev rmnet0 proto kernel scope link src 10.0.2.15\n";
        assert_eq!(parse_wlan_ip(output), None);
    }

    #[test]
    fn test_connect_target_and_validation() {
        assert_eq!(connect_target("192.168.1.5"), "192.168.1.5:5555");
        assert!(is_valid_ipv4("192.168.1.5"));
        assert!(is_valid_ipv4(" 10.0.0.1 "));
        assert!(!is_valid_ipv4("192.168.1"));
        assert!(!is_valid_ipv4("phone.local"));
    }

    #[test]
    fn test_first_usb_device() {
        let devices = vec![
            DeviceRecord::new("10.0.0.7:5555", "A"),
            DeviceRecord::new("ABC123", "B"),
        ];
        assert_eq!(first_usb_device(&devices).unwrap().serial, "ABC123");
        assert!(first_usb_device(&devices[..1]).is_none());
    }

    #[test]
    fn test_can_disconnect() {
        assert!(can_disconnect(&DeviceRecord::new("10.0.0.7:5555", "x")));
        assert!(can_disconnect(&DeviceRecord::new("ABC", "ABC (Unauthorized)")));
        assert!(!can_disconnect(&DeviceRecord::new("ABC", "Sample X1 (ABC)")));
    }

    #[tokio::test]
    async fn test_device_ip() {
        let bridge = FakeBridge::new().reply("-s ABC shell ip route", ROUTE_OUTPUT);
        assert_eq!(device_ip(&bridge, "ABC").await.unwrap(), "192.168.1.5");

        let bridge = FakeBridge::new().reply("-s ABC shell ip route", "");
        let err = device_ip(&bridge, "ABC").await.unwrap_err();
        assert!(err.is_parse_miss());
        assert_eq!(err.to_string(), "Unrecognized ip route output");
    }

    #[tokio::test]
    async fn test_enable_tcpip_message() {
        let bridge = FakeBridge::new().reply("-s ABC tcpip 5555", "restarting in TCP mode port: 5555\n");
        assert_eq!(
            enable_tcpip(&bridge, "ABC").await.unwrap(),
            "restarting in TCP mode port: 5555"
        );

        let bridge = FakeBridge::new().reply("-s ABC tcpip 5555", "");
        assert_eq!(enable_tcpip(&bridge, "ABC").await.unwrap(), "TCP/IP mode enabled");
    }

    #[tokio::test]
    async fn test_connect_success_and_already_connected() {
        let bridge = FakeBridge::new().reply("connect 192.168.1.5:5555", "connected to 192.168.1.5:5555\n");
        let outcome = connect(&bridge, "192.168.1.5").await.unwrap();
        assert!(outcome.connected);
        assert_eq!(outcome.target, "192.168.1.5:5555");

        let bridge = FakeBridge::new().reply(
            "connect 192.168.1.5:5555",
            "already connected to 192.168.1.5:5555",
        );
        assert!(connect(&bridge, "192.168.1.5").await.unwrap().connected);
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let bridge = FakeBridge::new().reply(
            "connect 192.168.1.9:5555",
            "failed to connect to '192.168.1.9:5555': Connection refused",
        );
        let outcome = connect(&bridge, "192.168.1.9").await.unwrap();
        assert!(!outcome.connected);
        assert!(outcome.output.contains("Connection refused"));
    }

    #[tokio::test]
    async fn test_connect_timeout_propagates() {
        let bridge = FakeBridge::new().reply_timeout("connect 192.168.1.9:5555");
        let result = connect(&bridge, "192.168.1.9").await;
        assert!(matches!(result, Err(Error::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_disconnect() {
        let bridge = FakeBridge::new().reply("disconnect 10.0.0.7:5555", "disconnected 10.0.0.7:5555");
        let message = disconnect(&bridge, "10.0.0.7:5555").await.unwrap();
        assert_eq!(message, "disconnected 10.0.0.7:5555");
        assert_eq!(bridge.call_count("disconnect 10.0.0.7:5555"), 1);
    }
}
