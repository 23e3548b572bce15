//! Terminal event polling and conversion into `EventKind`

use crate::event::EventKind;
use crossterm::event::{self, KeyEventKind, MouseEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Spawn a task that forwards terminal input to `tx`
///
/// Every `loop_sleep` the task drains up to a batch of pending crossterm
/// events, waiting at most `poll_timeout` for each. It stops when
/// `cancel_token` fires (discarding whatever input is still buffered, so the
/// shell does not receive it) or when the receiver is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let Some(raw) = event::read().ok().and_then(to_raw_event) else {
                            continue;
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Keep the crossterm events widgets care about
fn to_raw_event(evt: event::Event) -> Option<RawEvent> {
    match evt {
        event::Event::Key(key) if key.kind != KeyEventKind::Release => Some(RawEvent::Key(key)),
        event::Event::Mouse(mouse) => Some(RawEvent::Mouse(mouse)),
        event::Event::Resize(w, h) => Some(RawEvent::Resize(w, h)),
        _ => None,
    }
}

/// Process a raw event into an EventKind
///
/// Wheel movement becomes [`EventKind::Scroll`] with a delta of one row per
/// notch; every other pointer event stays an [`EventKind::Mouse`].
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}
