//! Terminal event loop.

use std::future::Future;
use std::io;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use focusdom::Terminal;
use futures::{FutureExt, StreamExt};
use log::{debug, info, trace};
use thiserror::Error;

use crate::session::Session;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("terminal input stream closed")]
    InputClosed,

    #[error("interrupted by Ctrl-C")]
    Interrupted,
}

fn is_interrupt(event: &CrosstermEvent) -> bool {
    matches!(
        event,
        CrosstermEvent::Key(key)
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Draw `session` on the terminal and feed it input until `task` completes.
///
/// `task` usually awaits one or more confirmations opened through the
/// session's context. Ctrl-C aborts the loop.
pub async fn run<F>(mut session: Session, task: F) -> Result<F::Output, RuntimeError>
where
    F: Future,
{
    let mut terminal = Terminal::new()?;
    let mut events = EventStream::new();
    tokio::pin!(task);

    info!("[runtime] started");

    loop {
        // Let the task react (open the next dialog) before drawing
        if let Some(output) = task.as_mut().now_or_never() {
            info!("[runtime] task finished");
            return Ok(output);
        }

        let (width, height) = terminal.size()?;
        terminal.draw(&session.render(width, height))?;

        tokio::select! {
            output = &mut task => {
                info!("[runtime] task finished");
                return Ok(output);
            }
            next = events.next() => {
                let event = match next {
                    Some(Ok(event)) => event,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Err(RuntimeError::InputClosed),
                };
                trace!("[runtime] crossterm event: {event:?}");

                if is_interrupt(&event) {
                    debug!("[runtime] Ctrl-C");
                    return Err(RuntimeError::Interrupted);
                }
                session.handle(&[event]);
            }
        }
    }
}
