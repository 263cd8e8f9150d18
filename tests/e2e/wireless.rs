//! Wireless connect from an attached USB device

use std::time::Duration;

use scrl_app::config::load_settings;
use scrl_app::message::Message;
use scrl_app::UiMode;
use scrl_daemon::test_utils::{devices_output, FakeReply};
use scrl_daemon::CommandOutput;

use crate::{pump_until, start_and_settle, test_engine, tools_with_mirror, usb_bridge};

const WIRELESS_SERIAL: &str = "192.168.1.5:5555";

#[tokio::test]
async fn test_connect_selects_new_wireless_device() {
    let bridge = usb_bridge()
        .reply(
            "-s ABC123 shell ip route",
            "192.168.1.0/24 dev wlan0 proto kernel scope link src 192.168.1.5\n",
        )
        .reply("-s ABC123 tcpip 5555", "restarting in TCP mode port: 5555\n")
        .reply("connect 192.168.1.5:5555", "connected to 192.168.1.5:5555\n")
        .reply(
            "-s 192.168.1.5:5555 shell getprop ro.product.manufacturer",
            "Sample\n",
        )
        .reply("-s 192.168.1.5:5555 shell getprop ro.product.model", "X1\n");
    let shared = bridge.clone();

    let (mut engine, dir) = test_engine(bridge, tools_with_mirror("true"), false);
    start_and_settle(&mut engine).await;

    // The device list changes once the connection exists
    shared.set_reply(
        "devices",
        FakeReply::Output(CommandOutput::from_stdout(devices_output(&[
            ("ABC123", "device"),
            (WIRELESS_SERIAL, "device"),
        ]))),
    );

    engine.process_message(Message::WirelessConnect);
    assert_eq!(engine.state.ui_mode, UiMode::Setup);

    pump_until(&mut engine, Duration::from_secs(10), |s| {
        s.selected_device()
            .is_some_and(|d| d.serial == WIRELESS_SERIAL)
    })
    .await;

    assert_eq!(engine.state.last_ip.as_deref(), Some("192.168.1.5"));
    assert!(engine.state.pending_select.is_none());
    assert!(engine.state.selected_device().unwrap().is_wireless);
    assert_eq!(shared.call_count("-s ABC123 tcpip 5555"), 1);

    // Settings are written by a background task
    let path = dir.path().join("config.toml");
    let mut saved = None;
    for _ in 0..50 {
        saved = load_settings(&path).wireless.last_ip;
        if saved.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(saved.as_deref(), Some("192.168.1.5"));
    engine.shutdown();
}

#[tokio::test]
async fn test_connect_without_usb_device_prompts_with_last_ip() {
    let bridge = usb_bridge().reply("devices", &devices_output(&[]));
    let (mut engine, _dir) = test_engine(bridge, tools_with_mirror("true"), false);
    engine.state.last_ip = Some("10.0.0.7".into());
    engine.start();
    pump_until(&mut engine, Duration::from_secs(5), |s| !s.scanning).await;

    engine.process_message(Message::WirelessConnect);

    assert_eq!(engine.state.ui_mode, UiMode::WirelessPrompt);
    assert_eq!(engine.state.wireless_input, "10.0.0.7");
    engine.shutdown();
}
