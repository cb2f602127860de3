use std::{io, path::PathBuf};

use thiserror::Error;

/// # Description
/// every failure the driver can report
/// - settings and sweep bound errors happen before the run log is opened
/// - engine errors are never retried, they end the run
#[derive(Debug, Error)]
pub enum DseError {
    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("bad settings pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to expand settings pattern: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("settings pattern `{0}` matched no file")]
    NoMatch(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid sweep: min {min}, max {max}, tick {tick}")]
    InvalidSweep { min: u64, max: u64, tick: u64 },
    #[error("cannot open run log {}: {source}", path.display())]
    RunLog { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("cost engine failed at {point}: {message}")]
    Engine { point: String, message: String },
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
