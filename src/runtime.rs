use std::sync::mpsc::{self, Receiver, RecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the session's update loop.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// A background failure surfaced as an event (e.g. the input reader died).
    Error(String),
}

/// Source of serialized app events. The event loop blocks on this.
pub trait EventSource {
    fn recv(&self) -> Result<AppEvent, RecvError>;
}

/// Production event source: one mpsc channel fed by two threads, a key
/// reader and a ticker. The ticker sends a single `Tick`, sleeps for the
/// interval, and re-arms, so exactly one tick notification is outstanding
/// at a time.
pub struct TerminalEventSource {
    rx: Receiver<AppEvent>,
}

impl TerminalEventSource {
    pub fn new(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let tick_tx = tx.clone();
        thread::spawn(move || loop {
            thread::sleep(tick_interval);
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        });

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(e.to_string()));
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl EventSource for TerminalEventSource {
    fn recv(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test event source fed from a plain channel, for driving the loop
/// headlessly.
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_source_passes_events_through_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        tx.send(AppEvent::Tick).unwrap();
        tx.send(AppEvent::Resize).unwrap();

        let source = TestEventSource::new(rx);
        assert!(matches!(source.recv(), Ok(AppEvent::Key(_))));
        assert!(matches!(source.recv(), Ok(AppEvent::Tick)));
        assert!(matches!(source.recv(), Ok(AppEvent::Resize)));
    }

    #[test]
    fn test_source_errors_when_sender_dropped() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let source = TestEventSource::new(rx);
        assert!(source.recv().is_err());
    }
}
