use std::path::PathBuf;

use thiserror::Error;

/// A lock file that could not be decoded into package entries.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("top-level value is not an object: {fragment}")]
    NotAnObject { fragment: String },

    #[error("{section}[{index}] is not a package object: {fragment}")]
    PackageNotObject {
        section: String,
        index: usize,
        fragment: String,
    },

    #[error("{section}[{index}] has no package name after the vendor: `{name}`")]
    EmptyProject {
        section: String,
        index: usize,
        name: String,
    },

    #[error("{section}[{index}] is missing `{field}`: {fragment}")]
    MissingField {
        section: String,
        index: usize,
        field: &'static str,
        fragment: String,
    },
}

/// Failure analyzing a single artifact. The artifact is skipped; the scan continues.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

/// The analyzer cannot run at all. Raised before any artifact is processed.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unsupported hash algorithm `{0}` (expected `sha1` or `sha256`)")]
    UnsupportedHash(String),
}
