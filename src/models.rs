use std::path::PathBuf;

use serde::Serialize;

/// A single dependency tracked by the engine.
///
/// The same type represents both the placeholder for a scanned file and the
/// records an analyzer derives from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependency {
    /// The physical file this dependency was found in.
    pub actual_file_path: PathBuf,
    /// Logical path; unique per dependency within a scan.
    pub file_path: String,
    pub display_file_name: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub ecosystem: Option<Ecosystem>,
    /// Lowercase hex digest identifying this dependency.
    pub content_hash: String,
    pub evidence: Vec<Evidence>,
}

impl Dependency {
    /// Create a placeholder for a file that has not been expanded yet.
    pub fn placeholder(actual_file_path: PathBuf, file_path: String, content_hash: String) -> Self {
        let display_file_name = actual_file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.clone());

        Dependency {
            actual_file_path,
            file_path,
            display_file_name,
            name: None,
            version: None,
            ecosystem: None,
            content_hash,
            evidence: Vec::new(),
        }
    }

    pub fn add_evidence(
        &mut self,
        evidence_type: EvidenceType,
        source: &str,
        name: &str,
        value: &str,
        confidence: Confidence,
    ) {
        self.evidence.push(Evidence {
            evidence_type,
            source: source.to_string(),
            name: name.to_string(),
            value: value.to_string(),
            confidence,
        });
    }

    /// Value of the first evidence item of the given type, if any.
    pub fn evidence_value(&self, evidence_type: EvidenceType) -> Option<&str> {
        self.evidence
            .iter()
            .find(|e| e.evidence_type == evidence_type)
            .map(|e| e.value.as_str())
    }

    /// `true` if `other` refers to the same logical dependency.
    pub fn same_identity(&self, other: &Dependency) -> bool {
        self.actual_file_path == other.actual_file_path && self.file_path == other.file_path
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evidence {
    pub evidence_type: EvidenceType,
    /// Where the evidence was found (e.g. `composer.lock`).
    pub source: String,
    /// Field name within the source.
    pub name: String,
    pub value: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvidenceType {
    Vendor,
    Product,
    Version,
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvidenceType::Vendor => write!(f, "vendor"),
            EvidenceType::Product => write!(f, "product"),
            EvidenceType::Version => write!(f, "version"),
        }
    }
}

/// Weight of an evidence item; lock file evidence is always `Highest`.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
    Highest,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
            Confidence::Highest => write!(f, "highest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Ecosystem {
    Composer,
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Composer => write!(f, "Composer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_display_name_is_file_name() {
        let dep = Dependency::placeholder(
            PathBuf::from("/srv/app/composer.lock"),
            "app/composer.lock".to_string(),
            "abc".to_string(),
        );
        assert_eq!(dep.display_file_name, "composer.lock");
        assert!(dep.name.is_none());
        assert!(dep.evidence.is_empty());
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Highest > Confidence::High);
        assert!(Confidence::Low < Confidence::Medium);
    }

    #[test]
    fn test_evidence_value() {
        let mut dep = Dependency::placeholder(
            PathBuf::from("composer.lock"),
            "composer.lock".to_string(),
            String::new(),
        );
        dep.add_evidence(EvidenceType::Vendor, "composer.lock", "vendor", "acme", Confidence::Highest);
        assert_eq!(dep.evidence_value(EvidenceType::Vendor), Some("acme"));
        assert_eq!(dep.evidence_value(EvidenceType::Version), None);
    }
}
