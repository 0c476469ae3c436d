//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use tokio::sync::mpsc;
use vfb_app::{process_message, ActionContext, AppState, HostBridge, Message};
use vfb_client::ValidationApi;
use vfb_core::prelude::*;

use super::{event, render, terminal};

/// Run the browser until the user quits.
///
/// Sends `Start` before the first frame so the launch fragment is resolved
/// and the shown collections start loading immediately.
pub async fn run<A>(mut state: AppState, api: A, bridge: HostBridge) -> Result<()>
where
    A: ValidationApi + Send + Sync + 'static,
{
    terminal::install_panic_hook();

    let mut term = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;
    info!(
        "Browser starting (embedded={}, display={})",
        state.is_embedded(),
        state.display
    );

    // Finished requests report back on this channel
    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(256);
    let mut ctx = ActionContext::new(Arc::new(api), bridge, msg_tx);

    process_message(&mut state, Message::Start, &mut ctx);

    let result = run_loop(&mut term, &mut state, &mut msg_rx, &mut ctx);

    // Nothing may report back into a torn-down UI
    ctx.tracker.cancel_all();
    ratatui::restore();

    if let Err(e) = &result {
        error!("Browser exited with error: {}", e);
    } else {
        info!("Browser exited");
    }
    result
}

/// Main event loop
fn run_loop<A>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    msg_rx: &mut mpsc::Receiver<Message>,
    ctx: &mut ActionContext<A>,
) -> Result<()>
where
    A: ValidationApi + Send + Sync + 'static,
{
    while !state.should_quit {
        // Completed requests and exports
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, ctx);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, ctx);
        }
    }

    Ok(())
}
