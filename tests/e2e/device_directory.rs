//! Enumeration through the engine

use std::time::Duration;

use scrl_core::LogLevel;
use scrl_daemon::test_utils::{devices_output, FakeBridge};

use crate::{pump_until, test_engine, tools_with_mirror};

#[tokio::test]
async fn test_only_unready_devices_gives_empty_list_and_warning() {
    let bridge = FakeBridge::new().reply(
        "devices",
        &devices_output(&[("XYZ", "unauthorized"), ("QRS", "offline")]),
    );
    let (mut engine, _dir) = test_engine(bridge.clone(), tools_with_mirror("true"), false);

    engine.start();
    pump_until(&mut engine, Duration::from_secs(5), |s| !s.scanning).await;

    assert!(engine.state.devices.is_empty());
    assert!(engine.state.selected.is_none());
    assert!(engine
        .state
        .logs
        .iter()
        .any(|e| e.level == LogLevel::Warning && e.message == "No devices found"));
    // Unready devices are never probed
    assert_eq!(bridge.call_count("-s XYZ shell getprop ro.product.model"), 0);
    engine.shutdown();
}
