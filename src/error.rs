//! Error types for griha-map.

use thiserror::Error;

/// Engine error type.
///
/// `CollisionRejected` is recoverable: the caller may retry the insertion
/// at a different position. The planning failures report why no route was
/// produced; the engine never retries internally.
#[derive(Error, Debug)]
pub enum GrihaError {
    /// Required setup is missing (e.g. canvas size before grid synthesis).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Insertion refused: the candidate overlaps a registered object at an
    /// intersecting height.
    #[error("Collision rejected: {0}")]
    CollisionRejected(String),

    /// Start or goal could not be repaired to a free cell within the
    /// search radius.
    #[error("No feasible endpoint: {0}")]
    NoFeasibleEndpoint(String),

    /// A* exhausted the open set without reaching the goal.
    #[error("No path found from ({0:.2}, {1:.2}) to ({2:.2}, {3:.2})")]
    NoPath(f32, f32, f32, f32),

    /// A referenced object or file is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for GrihaError {
    fn from(e: toml::de::Error) -> Self {
        GrihaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GrihaError>;
