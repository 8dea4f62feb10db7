use std::collections::HashSet;

use tracing::debug;

use super::parser::RawPackageEntry;
use super::COMPOSER_LOCK;
use crate::analyzer::Analysis;
use crate::digest::IdentityHasher;
use crate::models::{Confidence, Dependency, Ecosystem, EvidenceType};

/// Turn the entries of one lock file into dependency records.
///
/// `placeholder` is the record standing for the lock file itself; its
/// logical path becomes the container prefix of every record. The engine
/// state is never touched here.
pub fn normalize<I>(placeholder: &Dependency, entries: I, hasher: &dyn IdentityHasher) -> Analysis
where
    I: IntoIterator<Item = RawPackageEntry>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for entry in entries {
        let file_path = format!(
            "{}:{}/{}/{}",
            placeholder.file_path, entry.group, entry.project, entry.version
        );
        // Same triple listed twice (e.g. in both sections) keeps the first.
        if !seen.insert(file_path.clone()) {
            continue;
        }
        let record = make_record(placeholder, &entry, file_path, hasher);
        debug!("Adding dependency {} ({})", record.display_file_name, entry.section);
        records.push(record);
    }

    let supersedes_placeholder =
        !records.is_empty() && placeholder.display_file_name.eq_ignore_ascii_case(COMPOSER_LOCK);

    Analysis {
        records,
        supersedes_placeholder,
    }
}

fn make_record(
    placeholder: &Dependency,
    entry: &RawPackageEntry,
    file_path: String,
    hasher: &dyn IdentityHasher,
) -> Dependency {
    let content_hash = hasher.hex_digest(file_path.as_bytes());
    let mut dep = Dependency {
        actual_file_path: placeholder.actual_file_path.clone(),
        file_path,
        display_file_name: format!("{}:{}", entry.project, entry.version),
        name: Some(entry.project.clone()),
        version: Some(entry.version.clone()),
        ecosystem: Some(Ecosystem::Composer),
        content_hash,
        evidence: Vec::with_capacity(3),
    };
    dep.add_evidence(EvidenceType::Vendor, COMPOSER_LOCK, "vendor", &entry.group, Confidence::Highest);
    dep.add_evidence(EvidenceType::Product, COMPOSER_LOCK, "product", &entry.project, Confidence::Highest);
    dep.add_evidence(EvidenceType::Version, COMPOSER_LOCK, "version", &entry.version, Confidence::Highest);
    dep
}
