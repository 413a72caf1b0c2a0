use std::{
    thread,
    time::{Duration, Instant},
};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use tokio::sync::mpsc;
use tracing::debug;

/// Terminal events
#[derive(Clone, Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Tick event for updating UI
    Tick,
}

/// Polls the terminal on a background thread and forwards events.
///
/// The thread exits when polling fails or the receiver is dropped.
/// Receiving is async, so waiting for input never parks a runtime worker.
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    _handler: thread::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::unbounded_channel();
        let handler = thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or_else(|| Duration::from_secs(0));

                let forwarded = match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(e)) if e.kind == event::KeyEventKind::Press => {
                            sender.send(Event::Key(e))
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => sender.send(Event::Resize(w, h)),
                        Ok(_) => Ok(()),
                        Err(e) => {
                            debug!("Terminal read failed: {}", e);
                            return;
                        }
                    },
                    Ok(false) => Ok(()),
                    Err(e) => {
                        debug!("Terminal poll failed: {}", e);
                        return;
                    }
                };

                if forwarded.is_err() {
                    return;
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            receiver,
            _handler: handler,
        }
    }

    /// Next terminal event, or `None` once the polling thread has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}
