use std::path::Path;

use crate::error::AnalysisError;
use crate::models::Dependency;

pub mod composer;

/// Outcome of analyzing one file.
///
/// The engine applies it: every record is added, then the analyzed
/// placeholder is removed when `supersedes_placeholder` is set.
#[derive(Debug, Default)]
pub struct Analysis {
    pub records: Vec<Dependency>,
    pub supersedes_placeholder: bool,
}

pub trait Analyzer {
    fn name(&self) -> &'static str;
    fn is_enabled(&self) -> bool;
    /// File filter: whether this analyzer handles `path`.
    fn accepts(&self, path: &Path) -> bool;
    fn analyze(&self, dependency: &Dependency) -> Result<Analysis, AnalysisError>;
}
