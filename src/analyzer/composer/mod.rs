//! Analyzer for PHP projects managed by Composer.
//!
//! Expands a `composer.lock` into one dependency per locked package. Each
//! dependency is identified by `<lock file path>:<vendor>/<package>/<version>`
//! and carries vendor, product and version evidence for later matching.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::analyzer::Analysis;
use crate::config::AnalyzerConfig;
use crate::digest::HashAlgorithm;
use crate::error::{AnalysisError, ConfigurationError, FormatError};
use crate::models::Dependency;

pub mod normalize;
pub mod parser;

pub const ANALYZER_NAME: &str = "Composer.lock analyzer";

/// File name handled by this analyzer, also used as the evidence source.
pub const COMPOSER_LOCK: &str = "composer.lock";

pub struct ComposerLockAnalyzer {
    hasher: HashAlgorithm,
    enabled: bool,
}

impl ComposerLockAnalyzer {
    /// Create the analyzer from configuration.
    ///
    /// Fails when the configured hash algorithm is unknown; no file is
    /// analyzed in that case.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, ConfigurationError> {
        let hasher = HashAlgorithm::from_name(&config.hash)?;
        debug!("{} using {} identities", ANALYZER_NAME, hasher);
        Ok(Self {
            hasher,
            enabled: config.enabled,
        })
    }

    /// The resolved identity hash, for hashing anything else in the same scan.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hasher
    }

    /// Analyze lock file content supplied by the caller.
    pub fn analyze_reader<R: Read>(
        &self,
        dependency: &Dependency,
        reader: R,
    ) -> Result<Analysis, FormatError> {
        let entries = parser::parse(reader)?;
        Ok(normalize::normalize(dependency, entries, &self.hasher))
    }
}

impl super::Analyzer for ComposerLockAnalyzer {
    fn name(&self) -> &'static str {
        ANALYZER_NAME
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case(COMPOSER_LOCK))
    }

    fn analyze(&self, dependency: &Dependency) -> Result<Analysis, AnalysisError> {
        let path = dependency.actual_file_path.as_path();
        let file = File::open(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Checking composer.lock file {}", path.display());

        match self.analyze_reader(dependency, BufReader::new(file)) {
            Ok(analysis) => Ok(analysis),
            Err(FormatError::Syntax(e)) if e.is_io() => Err(AnalysisError::Io {
                path: path.to_path_buf(),
                source: e.into(),
            }),
            Err(source) => Err(AnalysisError::Format {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
