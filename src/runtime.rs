use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum RaceEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait RaceEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<RaceEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<RaceEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        // Exits on the first send after the receiver is dropped.
        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => RaceEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => RaceEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RaceEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// One tick per race-clock second.
    pub fn per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<RaceEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<RaceEvent>) -> Self {
        Self { rx }
    }
}

impl RaceEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RaceEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that hands out events in arrival order and a `Tick` at each
/// interval deadline. Input arriving between deadlines does not shift them.
pub struct Runner<E: RaceEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Option<Instant>,
}

impl<E: RaceEventSource, T: Ticker> Runner<E, T> {
    /// Creates a runner with the tick schedule already started.
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Some(Instant::now() + ticker.interval());
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Restart the tick schedule one interval from now.
    pub fn start_clock(&mut self) {
        self.next_tick = Some(Instant::now() + self.ticker.interval());
    }

    /// Cancel the tick schedule. No `Tick` is produced until restarted.
    pub fn stop_clock(&mut self) {
        self.next_tick = None;
    }

    pub fn clock_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Blocks until the next event or tick deadline.
    ///
    /// Returns `None` only when the clock is stopped and the event source
    /// has disconnected.
    pub fn step(&mut self) -> Option<RaceEvent> {
        let Some(deadline) = self.next_tick else {
            return loop {
                match self.event_source.recv_timeout(self.ticker.interval()) {
                    Ok(ev) => break Some(ev),
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break None,
                }
            };
        };

        let wait = deadline.saturating_duration_since(Instant::now());
        match self.event_source.recv_timeout(wait) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => Some(self.fire_tick(deadline)),
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                Some(self.fire_tick(deadline))
            }
        }
    }

    fn fire_tick(&mut self, deadline: Instant) -> RaceEvent {
        self.next_tick = Some(deadline + self.ticker.interval());
        RaceEvent::Tick
    }
}
