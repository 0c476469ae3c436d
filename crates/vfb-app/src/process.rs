//! Message processing
//!
//! Runs a message through the TEA update loop, dispatching every action it
//! produces and following up chained messages until none remain.

use vfb_client::ValidationApi;

use crate::actions::{handle_action, ActionContext};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<A>(state: &mut AppState, message: Message, ctx: &mut ActionContext<A>)
where
    A: ValidationApi + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, ctx);
        }

        // Continue with follow-up message
        msg = result.message;
    }

    if state.should_quit {
        ctx.tracker.cancel_all();
    }
}
