use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
