use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FormatError;

/// Top-level keys holding arrays of package objects.
///
/// `packages` / `packages-dev` is the schema Composer writes; `require` /
/// `require-dev` arrays are accepted as well. Any of them whose value is not
/// an array (e.g. a `composer.json`-style `require` map) is ignored.
pub const PACKAGE_SECTIONS: [&str; 4] = ["packages", "packages-dev", "require", "require-dev"];

const FRAGMENT_LIMIT: usize = 120;

/// One package as recorded in the lock file.
#[derive(Debug)]
pub struct RawPackageEntry {
    /// Vendor part of `vendor/package`; empty when the name has no `/`.
    pub group: String,
    pub project: String,
    /// Version exactly as written in the lock file.
    pub version: String,
    /// Section the entry was read from.
    pub section: String,
}

/// The packages of one lock file, in document order.
#[derive(Debug)]
pub struct LockEntries {
    inner: std::vec::IntoIter<RawPackageEntry>,
}

impl Iterator for LockEntries {
    type Item = RawPackageEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Decode a `composer.lock` document.
///
/// The whole document is validated before anything is returned; on error no
/// entries are surfaced. Nesting depth is unbounded: deep values under keys
/// the parser does not use are decoded on a growing stack rather than
/// rejected.
pub fn parse<R: Read>(reader: R) -> Result<LockEntries, FormatError> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    de.disable_recursion_limit();
    let document = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    let root = document.as_object().ok_or_else(|| FormatError::NotAnObject {
        fragment: fragment(&document),
    })?;

    let mut entries = Vec::new();
    for (key, value) in root {
        if !PACKAGE_SECTIONS.contains(&key.as_str()) {
            continue;
        }
        let Some(packages) = value.as_array() else {
            continue;
        };
        for (index, package) in packages.iter().enumerate() {
            entries.push(parse_package(key, index, package)?);
        }
    }

    Ok(LockEntries {
        inner: entries.into_iter(),
    })
}

fn parse_package(section: &str, index: usize, value: &Value) -> Result<RawPackageEntry, FormatError> {
    let package = value.as_object().ok_or_else(|| FormatError::PackageNotObject {
        section: section.to_string(),
        index,
        fragment: fragment(value),
    })?;

    let name = required_str(package, "name", section, index, value)?;
    let version = required_str(package, "version", section, index, value)?;

    let (group, project) = name.split_once('/').unwrap_or(("", name));
    if project.is_empty() {
        return Err(FormatError::EmptyProject {
            section: section.to_string(),
            index,
            name: name.to_string(),
        });
    }

    Ok(RawPackageEntry {
        group: group.to_string(),
        project: project.to_string(),
        version: version.to_string(),
        section: section.to_string(),
    })
}

fn required_str<'a>(
    package: &'a Map<String, Value>,
    field: &'static str,
    section: &str,
    index: usize,
    value: &Value,
) -> Result<&'a str, FormatError> {
    package
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FormatError::MissingField {
            section: section.to_string(),
            index,
            field,
            fragment: fragment(value),
        })
}

/// Compact rendering of `value` for error messages, cut at a char boundary.
fn fragment(value: &Value) -> String {
    let text = value.to_string();
    match text.char_indices().nth(FRAGMENT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(content: &str) -> Result<Vec<RawPackageEntry>, FormatError> {
        parse(content.as_bytes()).map(Iterator::collect)
    }

    #[test]
    fn test_parse_packages_and_dev_in_order() {
        let content = r#"{
    "_readme": ["This file locks the dependencies of your project"],
    "content-hash": "0d0b8f7c4a",
    "packages": [
        {"name": "monolog/monolog", "version": "2.9.1", "type": "library"},
        {"name": "psr/log", "version": "3.0.0"}
    ],
    "packages-dev": [
        {"name": "phpunit/phpunit", "version": "10.5.2"}
    ],
    "minimum-stability": "stable"
}"#;
        let entries = parse_str(content).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].group, "monolog");
        assert_eq!(entries[0].project, "monolog");
        assert_eq!(entries[0].version, "2.9.1");
        assert_eq!(entries[0].section, "packages");
        assert_eq!(entries[1].project, "log");
        assert_eq!(entries[2].group, "phpunit");
        assert_eq!(entries[2].section, "packages-dev");
    }

    #[test]
    fn test_require_sections_follow_document_order() {
        let content = r#"{
    "require-dev": [{"name": "acme/testing", "version": "1.0.0"}],
    "require": [{"name": "acme/widget", "version": "1.2.3"}]
}"#;
        let entries = parse_str(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].project, "testing");
        assert_eq!(entries[1].project, "widget");
    }

    #[test]
    fn test_name_without_slash() {
        let entries = parse_str(r#"{"packages": [{"name": "standalone", "version": "1.0"}]}"#).unwrap();
        assert_eq!(entries[0].group, "");
        assert_eq!(entries[0].project, "standalone");
    }

    #[test]
    fn test_name_split_on_first_slash_only() {
        let entries = parse_str(r#"{"packages": [{"name": "a/b/c", "version": "1.0"}]}"#).unwrap();
        assert_eq!(entries[0].group, "a");
        assert_eq!(entries[0].project, "b/c");
    }

    #[test]
    fn test_version_is_verbatim() {
        let content = r#"{"packages": [
            {"name": "a/one", "version": "v1.2.3"},
            {"name": "a/two", "version": "^2.0"},
            {"name": "a/three", "version": "dev-master"}
        ]}"#;
        let versions: Vec<_> = parse_str(content)
            .unwrap()
            .into_iter()
            .map(|e| e.version)
            .collect();
        assert_eq!(versions, vec!["v1.2.3", "^2.0", "dev-master"]);
    }

    #[test]
    fn test_unknown_keys_and_require_map_ignored() {
        let content = r#"{
    "require": {"php": ">=8.1", "acme/widget": "^1.0"},
    "platform": {"php": "8.2"},
    "aliases": []
}"#;
        assert!(parse_str(content).unwrap().is_empty());
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        assert!(parse_str("{}").unwrap().is_empty());
        assert!(parse_str(r#"{"packages": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_document_is_format_error() {
        let err = parse_str(r#"{"packages": [{"name": "acme/widget", "vers"#).unwrap_err();
        assert!(matches!(err, FormatError::Syntax(_)));
    }

    #[test]
    fn test_deeply_nested_unknown_key_is_ignored() {
        let depth = 200;
        let content = format!(
            r#"{{"extra": {}1{}, "packages": [{{"name": "acme/widget", "version": "1.2.3"}}]}}"#,
            "[".repeat(depth),
            "]".repeat(depth)
        );
        let entries = parse_str(&content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].project, "widget");
    }

    #[test]
    fn test_trailing_garbage_is_format_error() {
        let err = parse_str(r#"{"packages": []} {"#).unwrap_err();
        assert!(matches!(err, FormatError::Syntax(_)));
    }

    #[test]
    fn test_top_level_array_is_format_error() {
        let err = parse_str(r#"[{"name": "acme/widget"}]"#).unwrap_err();
        assert!(matches!(err, FormatError::NotAnObject { .. }));
    }

    #[test]
    fn test_missing_version_discards_everything() {
        let content = r#"{"packages": [
            {"name": "acme/ok", "version": "1.0.0"},
            {"name": "acme/broken"}
        ]}"#;
        match parse_str(content).unwrap_err() {
            FormatError::MissingField {
                section,
                index,
                field,
                fragment,
            } => {
                assert_eq!(section, "packages");
                assert_eq!(index, 1);
                assert_eq!(field, "version");
                assert!(fragment.contains("acme/broken"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_string_name_is_missing() {
        let err = parse_str(r#"{"packages": [{"name": 42, "version": "1.0"}]}"#).unwrap_err();
        assert!(matches!(err, FormatError::MissingField { field: "name", .. }));
    }

    #[test]
    fn test_package_not_object() {
        let err = parse_str(r#"{"packages-dev": ["acme/widget"]}"#).unwrap_err();
        assert!(matches!(err, FormatError::PackageNotObject { index: 0, .. }));
    }

    #[test]
    fn test_empty_project_rejected() {
        let err = parse_str(r#"{"packages": [{"name": "acme/", "version": "1.0"}]}"#).unwrap_err();
        assert!(matches!(err, FormatError::EmptyProject { .. }));
    }

    #[test]
    fn test_fragment_is_truncated() {
        let long = "x".repeat(500);
        let value = serde_json::json!({ "name": long });
        let text = fragment(&value);
        assert!(text.ends_with("..."));
        assert_eq!(text.chars().count(), FRAGMENT_LIMIT + 3);
    }
}
