// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod race;
pub mod runtime;
pub mod session;
pub mod time_series;
pub mod tracker;

pub use error::RaceError;
pub use race::{CompletionReason, ProgressObserver, Race, RaceResult};
pub use session::{Mode, Phase, SessionConfig};
