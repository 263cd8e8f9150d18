//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every task reports back through the message channel; none of them touch
//! [`AppState`](crate::state::AppState).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use scrl_core::prelude::*;
use scrl_core::Language;
use scrl_daemon::wireless::{self, ADBD_RESTART_DELAY};
use scrl_daemon::{enumerate, gather_recommendation, Bridge};

use crate::config::{save_settings, Settings};
use crate::handler::UpdateAction;
use crate::message::{Message, ScanFailure, WirelessEvent};

/// Everything a background task may need
pub struct ActionContext<B: Bridge + Send + Sync + 'static> {
    pub msg_tx: mpsc::Sender<Message>,
    pub bridge: Arc<B>,
    pub shutdown_rx: watch::Receiver<bool>,
    pub config_path: PathBuf,
}

/// Execute an action by spawning a background task
pub fn handle_action<B: Bridge + Send + Sync + 'static>(action: UpdateAction, ctx: &ActionContext<B>) {
    let msg_tx = ctx.msg_tx.clone();

    match action {
        UpdateAction::EnumerateDevices { language } => {
            let bridge = ctx.bridge.clone();
            tokio::spawn(async move {
                spawn_enumeration(bridge.as_ref(), language, msg_tx).await;
            });
        }

        UpdateAction::ProbeDevice { serial } => {
            let bridge = ctx.bridge.clone();
            tokio::spawn(async move {
                let recommendation = gather_recommendation(bridge.as_ref(), &serial).await;
                let _ = msg_tx
                    .send(Message::RecommendationReady {
                        serial,
                        recommendation,
                    })
                    .await;
            });
        }

        UpdateAction::LaunchMirror(request) => {
            // Launches need &mut AppState and are intercepted by `process`
            warn!("LaunchMirror for {} reached the task spawner", request.serial);
        }

        UpdateAction::ScheduleQuit { delay } => {
            spawn_delayed(msg_tx, ctx.shutdown_rx.clone(), delay, Message::Quit);
        }

        UpdateAction::DelayedRefresh { delay } => {
            spawn_delayed(msg_tx, ctx.shutdown_rx.clone(), delay, Message::RefreshDevices);
        }

        UpdateAction::WirelessAuto { serial } => {
            let bridge = ctx.bridge.clone();
            tokio::spawn(async move {
                run_wireless_auto(bridge.as_ref(), &serial, &msg_tx).await;
            });
        }

        UpdateAction::WirelessConnectIp { ip } => {
            let bridge = ctx.bridge.clone();
            tokio::spawn(async move {
                run_connect(bridge.as_ref(), &ip, &msg_tx).await;
            });
        }

        UpdateAction::Disconnect { serials, all } => {
            let bridge = ctx.bridge.clone();
            tokio::spawn(async move {
                run_disconnect(bridge.as_ref(), serials, all, &msg_tx).await;
            });
        }

        UpdateAction::SaveSettings(settings) => {
            let path = ctx.config_path.clone();
            tokio::spawn(async move {
                persist(path, settings, msg_tx).await;
            });
        }
    }
}

async fn spawn_enumeration<B: Bridge + ?Sized>(
    bridge: &B,
    language: Language,
    msg_tx: mpsc::Sender<Message>,
) {
    let result = enumerate(bridge, language).await.map_err(|e| {
        warn!("Device enumeration failed: {}", e);
        if e.is_tool_missing() {
            ScanFailure::ToolMissing
        } else if e.is_timeout() {
            ScanFailure::TimedOut
        } else {
            ScanFailure::Other(e.to_string())
        }
    });
    let _ = msg_tx.send(Message::DevicesEnumerated { result }).await;
}

/// Send `message` after `delay` unless shutdown is signalled first
fn spawn_delayed(
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
    delay: Duration,
    message: Message,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                let _ = msg_tx.send(message).await;
            }
            _ = shutdown_rx.changed() => {
                debug!("Delayed {:?} cancelled by shutdown", message);
            }
        }
    });
}

async fn send_wireless(msg_tx: &mpsc::Sender<Message>, event: WirelessEvent) {
    let _ = msg_tx.send(Message::Wireless(event)).await;
}

/// USB-assisted wireless setup: read the WLAN address, switch the daemon to
/// TCP/IP, give it time to restart, then connect.
pub(crate) async fn run_wireless_auto<B: Bridge + ?Sized>(
    bridge: &B,
    serial: &str,
    msg_tx: &mpsc::Sender<Message>,
) {
    let ip = match wireless::device_ip(bridge, serial).await {
        Ok(ip) => ip,
        Err(e) if e.is_parse_miss() => {
            info!("No WLAN address for {}", serial);
            send_wireless(msg_tx, WirelessEvent::IpUnavailable).await;
            return;
        }
        Err(e) => {
            warn!("Failed to read WLAN address of {}: {}", serial, e);
            send_wireless(msg_tx, WirelessEvent::IpUnavailable).await;
            return;
        }
    };
    send_wireless(msg_tx, WirelessEvent::DetectedIp { ip: ip.clone() }).await;

    send_wireless(
        msg_tx,
        WirelessEvent::EnablingTcpip {
            device: serial.to_string(),
        },
    )
    .await;
    match wireless::enable_tcpip(bridge, serial).await {
        Ok(output) => send_wireless(msg_tx, WirelessEvent::TcpipEnabled { output }).await,
        Err(e) => {
            error!("tcpip on {} failed: {}", serial, e);
            send_wireless(
                msg_tx,
                WirelessEvent::TcpipFailed {
                    error: e.to_string(),
                },
            )
            .await;
            return;
        }
    }

    send_wireless(msg_tx, WirelessEvent::WaitingRestart).await;
    tokio::time::sleep(ADBD_RESTART_DELAY).await;

    run_connect(bridge, &ip, msg_tx).await;
}

pub(crate) async fn run_connect<B: Bridge + ?Sized>(
    bridge: &B,
    ip: &str,
    msg_tx: &mpsc::Sender<Message>,
) {
    send_wireless(
        msg_tx,
        WirelessEvent::Connecting {
            target: wireless::connect_target(ip),
        },
    )
    .await;

    let event = match wireless::connect(bridge, ip).await {
        Ok(outcome) if outcome.connected => WirelessEvent::Connected {
            ip: ip.to_string(),
            target: outcome.target,
        },
        Ok(outcome) => WirelessEvent::ConnectRejected {
            output: outcome.output,
        },
        Err(e) if e.is_timeout() => WirelessEvent::ConnectTimedOut,
        Err(e) => WirelessEvent::ConnectError {
            error: e.to_string(),
        },
    };
    send_wireless(msg_tx, event).await;
}

/// Disconnect each serial in turn; the list is refreshed afterwards
/// whatever the outcome.
pub(crate) async fn run_disconnect<B: Bridge + ?Sized>(
    bridge: &B,
    serials: Vec<String>,
    all: bool,
    msg_tx: &mpsc::Sender<Message>,
) {
    for serial in serials {
        let event = match wireless::disconnect(bridge, &serial).await {
            Ok(_) => WirelessEvent::Disconnected { serial },
            Err(e) => {
                warn!("Disconnect of {} failed: {}", serial, e);
                WirelessEvent::DisconnectFailed {
                    error: e.to_string(),
                }
            }
        };
        send_wireless(msg_tx, event).await;
    }

    if all {
        send_wireless(msg_tx, WirelessEvent::AllDisconnected).await;
    }
    let _ = msg_tx.send(Message::RefreshDevices).await;
}

async fn persist(path: PathBuf, settings: Settings, msg_tx: mpsc::Sender<Message>) {
    let result = tokio::task::spawn_blocking(move || save_settings(&path, &settings)).await;
    let error = match result {
        Ok(Ok(())) => return,
        Ok(Err(e)) => e.to_string(),
        Err(e) => format!("save task failed: {}", e),
    };
    error!("Failed to save settings: {}", error);
    let _ = msg_tx.send(Message::SettingsSaveFailed { error }).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrl_daemon::test_utils::{devices_output, FakeBridge};

    async fn collect(rx: &mut mpsc::Receiver<Message>) -> Vec<Message> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    fn wireless_events(messages: &[Message]) -> Vec<WirelessEvent> {
        messages
            .iter()
            .filter_map(|m| match m {
                Message::Wireless(ev) => Some(ev.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_wireless_auto_happy_path() {
        let bridge = FakeBridge::new()
            .reply(
                "-s ABC123 shell ip route",
                "192.168.1.0/24 dev wlan0 proto kernel scope link src 192.168.1.5\n",
            )
            .reply("-s ABC123 tcpip 5555", "restarting in TCP mode port: 5555\n")
            .reply("connect 192.168.1.5:5555", "connected to 192.168.1.5:5555\n");
        let (tx, mut rx) = mpsc::channel(32);

        run_wireless_auto(&bridge, "ABC123", &tx).await;

        let events = wireless_events(&collect(&mut rx).await);
        assert_eq!(
            events,
            vec![
                WirelessEvent::DetectedIp {
                    ip: "192.168.1.5".into()
                },
                WirelessEvent::EnablingTcpip {
                    device: "ABC123".into()
                },
                WirelessEvent::TcpipEnabled {
                    output: "restarting in TCP mode port: 5555".into()
                },
                WirelessEvent::WaitingRestart,
                WirelessEvent::Connecting {
                    target: "192.168.1.5:5555".into()
                },
                WirelessEvent::Connected {
                    ip: "192.168.1.5".into(),
                    target: "192.168.1.5:5555".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_wireless_auto_without_ip_falls_back() {
        let bridge = FakeBridge::new().reply("-s ABC123 shell ip route", "default via 10.0.0.1 dev rmnet0\n");
        let (tx, mut rx) = mpsc::channel(8);

        run_wireless_auto(&bridge, "ABC123", &tx).await;

        let events = wireless_events(&collect(&mut rx).await);
        assert_eq!(events, vec![WirelessEvent::IpUnavailable]);
        assert_eq!(bridge.call_count("-s ABC123 tcpip 5555"), 0);
    }

    #[tokio::test]
    async fn test_connect_timeout_is_reported() {
        let bridge = FakeBridge::new().reply_timeout("connect 10.0.0.7:5555");
        let (tx, mut rx) = mpsc::channel(8);

        run_connect(&bridge, "10.0.0.7", &tx).await;

        let events = wireless_events(&collect(&mut rx).await);
        assert_eq!(events.last(), Some(&WirelessEvent::ConnectTimedOut));
    }

    #[tokio::test]
    async fn test_connect_rejected_output() {
        let bridge = FakeBridge::new().reply(
            "connect 10.0.0.7:5555",
            "failed to connect to '10.0.0.7:5555': Connection refused\n",
        );
        let (tx, mut rx) = mpsc::channel(8);

        run_connect(&bridge, "10.0.0.7", &tx).await;

        let events = wireless_events(&collect(&mut rx).await);
        assert!(matches!(
            events.last(),
            Some(WirelessEvent::ConnectRejected { .. })
        ));
    }

    #[tokio::test]
    async fn test_disconnect_all_reports_each_then_refreshes() {
        let bridge = FakeBridge::new()
            .reply("disconnect 192.168.1.5:5555", "disconnected 192.168.1.5:5555\n")
            .reply_error("disconnect 10.0.0.2:5555", "boom");
        let (tx, mut rx) = mpsc::channel(8);

        run_disconnect(
            &bridge,
            vec!["192.168.1.5:5555".into(), "10.0.0.2:5555".into()],
            true,
            &tx,
        )
        .await;

        let messages = collect(&mut rx).await;
        let events = wireless_events(&messages);
        assert_eq!(
            events[0],
            WirelessEvent::Disconnected {
                serial: "192.168.1.5:5555".into()
            }
        );
        assert!(matches!(events[1], WirelessEvent::DisconnectFailed { .. }));
        assert_eq!(events[2], WirelessEvent::AllDisconnected);
        assert!(matches!(messages.last(), Some(Message::RefreshDevices)));
    }

    #[tokio::test]
    async fn test_enumeration_maps_missing_tool() {
        let bridge = FakeBridge::new().missing_tool();
        let (tx, mut rx) = mpsc::channel(8);

        spawn_enumeration(&bridge, Language::English, tx).await;

        assert!(matches!(
            rx.recv().await,
            Some(Message::DevicesEnumerated {
                result: Err(ScanFailure::ToolMissing)
            })
        ));
    }

    #[tokio::test]
    async fn test_enumeration_success() {
        let bridge = FakeBridge::new()
            .reply("devices", &devices_output(&[("ABC123", "device")]))
            .reply("-s ABC123 shell getprop ro.product.manufacturer", "Sample\n")
            .reply("-s ABC123 shell getprop ro.product.model", "X1\n");
        let (tx, mut rx) = mpsc::channel(8);

        spawn_enumeration(&bridge, Language::English, tx).await;

        match rx.recv().await {
            Some(Message::DevicesEnumerated { result: Ok(devices) }) => {
                assert_eq!(devices.len(), 1);
                assert_eq!(devices[0].display_label, "Sample X1 (ABC123)");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_message_cancelled_by_shutdown() {
        let (tx, mut rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        spawn_delayed(tx, shutdown_rx, Duration::from_secs(1), Message::Quit);
        shutdown_tx.send(true).unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_message_fires() {
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        spawn_delayed(tx, shutdown_rx, Duration::from_millis(500), Message::Quit);
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert!(matches!(rx.try_recv(), Ok(Message::Quit)));
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be
        let path = dir.path().to_path_buf();
        let (tx, mut rx) = mpsc::channel(8);

        persist(path, Settings::default(), tx).await;

        assert!(matches!(
            rx.recv().await,
            Some(Message::SettingsSaveFailed { .. })
        ));
    }
}
