//! Main TUI runner - entry point and event loop
//!
//! The loop drains engine messages, draws, then polls the terminal for a key.
//! While a silent mirror runs (`UiMode::Hidden`) the terminal is handed back
//! to the shell and the loop only waits on engine messages; the alternate
//! screen is re-entered once the engine leaves that mode.

use scrl_app::{Engine, UiMode};
use scrl_core::prelude::*;
use scrl_core::Label;
use scrl_daemon::Bridge;

use super::{event, render, terminal};
use crate::terminal::Screen;

/// Run the launcher UI until the user quits or a monitored mirror exits.
pub async fn run<B>(mut engine: Engine<B>) -> Result<()>
where
    B: Bridge + Send + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut screen = Screen::enter();

    engine.start();

    let result = run_loop(&mut screen, &mut engine).await;

    engine.shutdown();
    screen.suspend();

    result
}

/// Main event loop
async fn run_loop<B>(screen: &mut Screen, engine: &mut Engine<B>) -> Result<()>
where
    B: Bridge + Send + Sync + 'static,
{
    while !engine.should_quit() {
        engine.drain_pending_messages();

        if engine.state.ui_mode == UiMode::Hidden {
            if screen.suspend() {
                info!("Terminal released while the mirror runs");
                println!("{}", Label::SessionSilent.text(engine.state.language));
            }
            if !engine.process_next().await {
                break;
            }
            continue;
        }

        if !screen.is_active() {
            info!("Terminal restored");
        }

        let state = &engine.state;
        screen
            .terminal()
            .draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
