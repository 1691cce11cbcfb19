//! Error types for conjugation, caching and configuration.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ConjugationError>;

/// Errors raised by the generation pipeline.
///
/// Lookup misses (catalog, cache) are never errors; they come back as `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConjugationError {
    /// The root (or the residue of an inflected form) is not three letters.
    #[error("root must have exactly three letters, found {found} in {input:?}")]
    NonTriliteral { input: String, found: usize },

    /// The pattern identifier is not one of form1..form10.
    #[error("pattern not found: {0}")]
    PatternNotFound(String),

    /// The irregularity tag is not hollow, defective or doubled.
    #[error("unknown irregularity: {0}")]
    UnknownIrregularity(String),

    /// A request carried neither a root nor a surface form.
    #[error("request has neither a root nor a surface form")]
    MissingRoot,

    /// An assembled record failed structural validation.
    #[error("invalid conjugation record: {}", .0.join("; "))]
    InvalidRecord(Vec<String>),
}

/// Errors raised by a cache backend or by snapshot persistence.
///
/// The cache itself swallows these and reports a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backend could not serve the request.
    #[error("cache backend unavailable: {0}")]
    Backend(String),

    /// A cached value could not be encoded or decoded.
    #[error("cache codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Snapshot IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for `EngineConfig`.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
