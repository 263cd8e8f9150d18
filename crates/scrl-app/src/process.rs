//! Message processing
//!
//! Runs the TEA update loop for one incoming message, dispatching actions as
//! they are produced. Launches are handled inline because the new session is
//! stored in [`AppState`].

use scrl_daemon::Bridge;

use crate::actions::{handle_action, ActionContext};
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::AppState;
use crate::supervisor;

/// Process a message through the TEA update function
pub fn process_message<B: Bridge + Send + Sync + 'static>(
    state: &mut AppState,
    message: Message,
    ctx: &ActionContext<B>,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        // Continue with follow-up message
        msg = result.message;

        match result.action {
            Some(UpdateAction::LaunchMirror(request)) => {
                let outcome = supervisor::start(state, request, &ctx.msg_tx);
                // The follow-up from update() never coexists with a launch
                debug_assert!(msg.is_none());
                msg = Some(outcome);
            }
            Some(action) => handle_action(action, ctx),
            None => {}
        }
    }
}
