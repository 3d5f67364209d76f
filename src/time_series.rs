use serde::Serialize;

/// A metrics reading taken at a whole second of the race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub wpm: f64,
    pub accuracy: f64,
    pub progress: f64,
    pub timestamp: u32,
}

impl MetricsSnapshot {
    pub fn new(wpm: f64, accuracy: f64, progress: f64, timestamp: u32) -> Self {
        Self {
            wpm,
            accuracy,
            progress,
            timestamp,
        }
    }
}

impl From<MetricsSnapshot> for (f64, f64) {
    fn from(s: MetricsSnapshot) -> Self {
        (s.timestamp as f64, s.wpm)
    }
}

/// Append-only wpm history. A reading with the same timestamp and wpm as
/// the previous entry is dropped.
/// Only consecutive repeats are suppressed; an earlier pair can reappear.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricsHistory {
    points: Vec<MetricsSnapshot>,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the snapshot was appended.
    pub fn record(&mut self, snapshot: MetricsSnapshot) -> bool {
        if let Some(last) = self.points.last() {
            if last.timestamp == snapshot.timestamp && last.wpm == snapshot.wpm {
                return false;
            }
        }
        self.points.push(snapshot);
        true
    }

    pub fn points(&self) -> &[MetricsSnapshot] {
        &self.points
    }

    pub fn last(&self) -> Option<&MetricsSnapshot> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (seconds, wpm) pairs for charting.
    pub fn coords(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|&p| p.into()).collect()
    }
}
