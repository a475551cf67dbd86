//! Error types for configuration loading and transport.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading, reading or writing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing configuration bytes failed.
    #[error("config i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Parsing a JSON5 process config failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// Parsing a YAML process config failed.
    #[error("failed to parse yaml config: {0}")]
    YamlFailed(#[from] serde_yaml::Error),
    /// A Hadoop XML resource could not be parsed.
    #[error("failed to parse resource {resource}: {message}")]
    XmlFailed { resource: String, message: String },
    /// A resource file is missing and quiet mode is off.
    #[error("resource not found: {}", .0.display())]
    MissingResource(PathBuf),
    /// Variable expansion did not terminate.
    #[error("variable substitution depth too large: {max_depth} in {expression}")]
    SubstitutionDepth { expression: String, max_depth: usize },
    /// Generic validation failure.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Releasing a codec byte channel failed.
///
/// The codec reports primary read/write failures as an absent result; this
/// error is the separate channel for failures while tearing the stream down,
/// which callers are expected to treat as fatal.
#[derive(Debug, Error)]
#[error("failed to release byte channel: {0}")]
pub struct ReleaseError(#[from] pub std::io::Error);
