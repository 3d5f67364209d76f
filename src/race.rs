use serde::Serialize;
use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::metrics;
use crate::session::{Mode, Phase, SessionConfig};
use crate::time_series::{MetricsHistory, MetricsSnapshot};
use crate::tracker::{self, CharacterCell, InputState};

/// Receives (wpm, accuracy, progress) on every metrics recomputation.
pub trait ProgressObserver {
    fn on_progress(&mut self, wpm: f64, accuracy: f64, progress: f64);
}

impl<F: FnMut(f64, f64, f64)> ProgressObserver for F {
    fn on_progress(&mut self, wpm: f64, accuracy: f64, progress: f64) {
        self(wpm, accuracy, progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    TextCompleted,
    TimeExpired,
}

/// Final numbers handed to whoever shows results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceResult {
    pub wpm: f64,
    pub accuracy: f64,
    pub progress: f64,
    pub elapsed: u32,
    pub history: MetricsHistory,
    pub mode: Mode,
    pub mode_option: u32,
    pub reason: CompletionReason,
}

/// One typing race over a fixed reference text.
pub struct Race {
    config: SessionConfig,
    reference: Vec<char>,
    input: InputState,
    clock: Clock,
    phase: Phase,
    cursor: usize,
    live: Option<MetricsSnapshot>,
    history: MetricsHistory,
    result: Option<RaceResult>,
    observers: Vec<Box<dyn ProgressObserver>>,
}

impl std::fmt::Debug for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Race")
            .field("config", &self.config)
            .field("reference_len", &self.reference.len())
            .field("input", &self.input)
            .field("clock", &self.clock)
            .field("phase", &self.phase)
            .field("cursor", &self.cursor)
            .field("live", &self.live)
            .field("history_len", &self.history.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Race {
    /// Starts a race; the clock runs from creation.
    pub fn new(config: SessionConfig, text: &str) -> Self {
        let mut clock = Clock::new(config.ceiling());
        clock.start();
        let reference: Vec<char> = text.chars().collect();
        debug!(
            mode = %config.mode,
            mode_option = config.mode_option,
            reference_len = reference.len(),
            "race started"
        );
        Self {
            config,
            reference,
            input: InputState::new(),
            clock,
            phase: Phase::Running,
            cursor: 0,
            live: None,
            history: MetricsHistory::new(),
            result: None,
            observers: Vec::new(),
        }
    }

    pub fn subscribe<O: ProgressObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Handle a change of the raw input field, given its full current value.
    pub fn input_changed(&mut self, raw: &str) {
        if self.phase == Phase::Completed {
            trace!("input ignored after completion");
            return;
        }

        self.input = tracker::apply_input(&self.input, raw, &self.reference);

        if self.clock.ceiling_reached() {
            self.complete(CompletionReason::TimeExpired);
            return;
        }

        if self.input.len() >= self.reference.len() {
            self.complete(CompletionReason::TextCompleted);
        } else {
            self.cursor = self.input.len();
            self.refresh_metrics();
        }
    }

    /// Handle one clock second.
    pub fn on_tick(&mut self) {
        if self.phase == Phase::Completed || !self.clock.tick() {
            trace!("tick ignored");
            return;
        }

        self.refresh_metrics();

        if self.clock.ceiling_reached() {
            self.complete(CompletionReason::TimeExpired);
        }
    }

    /// Stop the clock without completing. Later ticks are ignored.
    pub fn teardown(&mut self) {
        if self.clock.is_running() {
            debug!(elapsed = self.clock.elapsed(), "race torn down");
        }
        self.clock.stop();
    }

    fn refresh_metrics(&mut self) {
        let elapsed = self.clock.elapsed();
        if elapsed == 0 {
            return;
        }

        let snapshot = MetricsSnapshot::new(
            metrics::wpm(self.input.len(), elapsed),
            metrics::accuracy(self.input.text(), &self.reference),
            metrics::progress(self.input.len(), self.reference.len()),
            elapsed,
        );
        self.publish(snapshot);
    }

    fn complete(&mut self, reason: CompletionReason) {
        if self.phase == Phase::Completed {
            return;
        }
        self.phase = Phase::Completed;
        self.clock.stop();

        let elapsed = self.clock.elapsed();
        let snapshot = MetricsSnapshot::new(
            metrics::wpm(self.input.len(), elapsed),
            metrics::accuracy(self.input.text(), &self.reference),
            metrics::final_progress(self.cursor, self.reference.len()),
            elapsed,
        );
        self.publish(snapshot);

        info!(
            wpm = snapshot.wpm,
            accuracy = snapshot.accuracy,
            elapsed,
            ?reason,
            "race completed"
        );

        self.result = Some(RaceResult {
            wpm: snapshot.wpm,
            accuracy: snapshot.accuracy,
            progress: snapshot.progress,
            elapsed,
            history: self.history.clone(),
            mode: self.config.mode,
            mode_option: self.config.mode_option,
            reason,
        });
    }

    fn publish(&mut self, snapshot: MetricsSnapshot) {
        self.live = Some(snapshot);
        self.history.record(snapshot);
        for observer in self.observers.iter_mut() {
            observer.on_progress(snapshot.wpm, snapshot.accuracy, snapshot.progress);
        }
    }

    pub fn reference(&self) -> &[char] {
        &self.reference
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn elapsed(&self) -> u32 {
        self.clock.elapsed()
    }

    pub fn seconds_remaining(&self) -> Option<u32> {
        self.clock.seconds_remaining()
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn live(&self) -> Option<&MetricsSnapshot> {
        self.live.as_ref()
    }

    pub fn history(&self) -> &MetricsHistory {
        &self.history
    }

    pub fn result(&self) -> Option<&RaceResult> {
        self.result.as_ref()
    }

    pub fn character_statuses(&self) -> Vec<CharacterCell> {
        tracker::character_statuses(&self.input, &self.reference)
    }
}
