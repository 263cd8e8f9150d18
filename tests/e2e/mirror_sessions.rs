//! Launching the mirroring tool in both supervision modes

use std::time::Duration;

use scrl_app::message::Message;
use scrl_app::UiMode;
use scrl_core::{LogSource, SessionState};

use crate::{pump_until, start_and_settle, test_engine, tools_with_mirror, usb_bridge};

#[cfg(unix)]
#[tokio::test]
async fn test_silent_session_restores_ui_without_errors() {
    let (mut engine, _dir) = test_engine(usb_bridge(), tools_with_mirror("true"), false);
    start_and_settle(&mut engine).await;

    assert_eq!(
        engine.state.selected_device().unwrap().display_label,
        "Sample X1 (ABC123)"
    );

    engine.process_message(Message::StartMirror);
    assert_eq!(engine.state.ui_mode, UiMode::Hidden);
    assert_eq!(engine.state.session_state(), SessionState::Silent);

    pump_until(&mut engine, Duration::from_secs(5), |s| {
        s.session.is_none()
    })
    .await;

    assert_eq!(engine.state.ui_mode, UiMode::Setup);
    assert!(!engine.should_quit());
    assert!(!engine.state.has_error_logs());
    engine.shutdown();
}

#[cfg(unix)]
#[tokio::test]
async fn test_monitoring_session_streams_output_then_quits() {
    let (mut engine, _dir) = test_engine(usb_bridge(), tools_with_mirror("echo"), true);
    start_and_settle(&mut engine).await;

    engine.process_message(Message::StartMirror);
    assert_eq!(engine.state.ui_mode, UiMode::Monitoring);

    pump_until(&mut engine, Duration::from_secs(5), |s| s.should_quit()).await;

    // echo prints its arguments: the assembled flags come back as output
    let output: Vec<&str> = engine
        .state
        .logs
        .iter()
        .filter(|e| e.source == LogSource::Mirror)
        .map(|e| e.message.as_str())
        .collect();
    assert!(output.iter().any(|line| line.contains("-s ABC123")));
    assert!(output.iter().any(|line| line.contains("--max-fps=")));
    engine.shutdown();
}

#[tokio::test]
async fn test_missing_mirror_tool_is_reported() {
    let (mut engine, _dir) = test_engine(
        usb_bridge(),
        tools_with_mirror("/nonexistent/scrcpy"),
        false,
    );
    start_and_settle(&mut engine).await;

    engine.process_message(Message::StartMirror);

    assert_eq!(engine.state.ui_mode, UiMode::Setup);
    assert!(engine.state.session.is_none());
    assert!(engine.state.has_error_logs());
    engine.shutdown();
}

#[cfg(unix)]
#[tokio::test]
async fn test_second_start_rejected_while_running() {
    let (mut engine, _dir) = test_engine(usb_bridge(), tools_with_mirror("true"), false);
    start_and_settle(&mut engine).await;

    engine.process_message(Message::StartMirror);
    let pid = engine.state.session.as_ref().and_then(|s| s.pid());
    assert!(pid.is_some());

    // The exit has not been processed yet, so the session is still held
    engine.process_message(Message::StartMirror);
    assert_eq!(engine.state.session.as_ref().and_then(|s| s.pid()), pid);
    assert!(!engine.state.has_error_logs());
    engine.shutdown();
}
