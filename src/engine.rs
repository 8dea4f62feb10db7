//! Scan orchestration.
//!
//! The engine owns the dependency collection. Every discovered file starts
//! as a placeholder dependency; analyzers turn it into records, and the
//! engine applies their result in one step once analysis has finished.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::analyzer::{Analysis, Analyzer};
use crate::digest::IdentityHasher;
use crate::error::AnalysisError;
use crate::models::Dependency;

/// Mutations an analysis result may request from the dependency collection.
pub trait DependencySink {
    fn add_dependency(&mut self, dependency: Dependency);
    fn remove_dependency(&mut self, dependency: &Dependency);
}

/// The dependency collection of one scan.
#[derive(Debug, Default)]
pub struct DependencyStore {
    dependencies: Vec<Dependency>,
}

impl DependencyStore {
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }
}

impl DependencySink for DependencyStore {
    fn add_dependency(&mut self, dependency: Dependency) {
        self.dependencies.push(dependency);
    }

    fn remove_dependency(&mut self, dependency: &Dependency) {
        self.dependencies.retain(|d| !d.same_identity(dependency));
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files turned into placeholders.
    pub files: usize,
    /// Records added by analyzers.
    pub records: usize,
    /// Files skipped because they could not be read or parsed.
    pub skipped: usize,
}

pub struct Engine {
    analyzers: Vec<Box<dyn Analyzer>>,
    hasher: Box<dyn IdentityHasher>,
    store: DependencyStore,
}

impl Engine {
    pub fn new(analyzers: Vec<Box<dyn Analyzer>>, hasher: Box<dyn IdentityHasher>) -> Self {
        Self {
            analyzers,
            hasher,
            store: DependencyStore::default(),
        }
    }

    /// Add a placeholder for every file and run the matching analyzers on it.
    ///
    /// A placeholder is always added. If the file cannot be read its digest
    /// is left empty and the analyzer reports the failure.
    pub fn scan(&mut self, root: &Path, files: &[PathBuf]) -> ScanSummary {
        let mut summary = ScanSummary::default();

        for file in files {
            let content_hash = match std::fs::read(file) {
                Ok(content) => self.hasher.hex_digest(&content),
                Err(e) => {
                    debug!("Unable to hash {}: {}", file.display(), e);
                    String::new()
                }
            };

            let placeholder =
                Dependency::placeholder(file.clone(), logical_path(root, file), content_hash);
            self.store.add_dependency(placeholder.clone());
            summary.files += 1;

            for analyzer in self.analyzers.iter().filter(|a| a.is_enabled() && a.accepts(file)) {
                debug!("Running {} on {}", analyzer.name(), placeholder.file_path);
                match apply(&mut self.store, &placeholder, analyzer.analyze(&placeholder)) {
                    Some(added) => summary.records += added,
                    None => summary.skipped += 1,
                }
            }
        }

        summary
    }

    pub fn dependencies(&self) -> &[Dependency] {
        self.store.dependencies()
    }
}

/// Apply one analysis result to `sink`.
///
/// On success every record is added, then the placeholder is removed if the
/// analysis supersedes it. On failure a single warning is logged and `sink`
/// is left untouched. Returns the number of records added, or `None` when the
/// artifact was skipped.
pub fn apply<S>(
    sink: &mut S,
    placeholder: &Dependency,
    result: Result<Analysis, AnalysisError>,
) -> Option<usize>
where
    S: DependencySink + ?Sized,
{
    match result {
        Ok(analysis) => {
            let added = analysis.records.len();
            for record in analysis.records {
                sink.add_dependency(record);
            }
            if analysis.supersedes_placeholder {
                debug!("Removing main redundant dependency {}", placeholder.display_file_name);
                sink.remove_dependency(placeholder);
            }
            Some(added)
        }
        Err(e) => {
            warn!("Skipping {}: {}", placeholder.file_path, e);
            None
        }
    }
}

/// Path of `file` relative to the scan root, using `/` separators.
fn logical_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string())
    } else {
        parts.join("/")
    }
}
