use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.composer-inventory/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Settings for the `composer.lock` analyzer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// When `false`, lock files are reported as plain files and never expanded.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Hash used for dependency identities: `sha1` (default) or `sha256`.
    #[serde(default = "default_hash")]
    pub hash: String,
}

/// Settings for lock file discovery.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Directory names never descended into.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_hash() -> String {
    "sha1".to_string()
}

fn default_exclude_dirs() -> Vec<String> {
    vec![
        "vendor".to_string(),
        "node_modules".to_string(),
        ".git".to_string(),
    ]
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            enabled: default_enabled(),
            hash: default_hash(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.composer-inventory/config.toml`
/// 3. `~/.config/composer-inventory/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".composer-inventory").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("composer-inventory")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(cfg.analyzer.enabled);
        assert_eq!(cfg.analyzer.hash, "sha1");
        assert_eq!(cfg.scan.exclude_dirs, vec!["vendor", "node_modules", ".git"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("[analyzer]\nhash = \"sha256\"\n").unwrap();
        assert!(cfg.analyzer.enabled);
        assert_eq!(cfg.analyzer.hash, "sha256");
        assert_eq!(cfg.scan.exclude_dirs.len(), 3);
    }

    #[test]
    fn test_empty_file_is_default() {
        let cfg: Config = toml::from_str("").unwrap();
        assert!(cfg.analyzer.enabled);
        assert_eq!(cfg.analyzer.hash, "sha1");
    }

    #[test]
    fn test_override_path() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[analyzer]\nenabled = false\n\n[scan]\nexclude_dirs = [\"build\"]").unwrap();

        let dir = TempDir::new().unwrap();
        let cfg = load_config(dir.path(), Some(f.path())).unwrap();
        assert!(!cfg.analyzer.enabled);
        assert_eq!(cfg.scan.exclude_dirs, vec!["build"]);
    }

    #[test]
    fn test_project_config_found() {
        let dir = TempDir::new().unwrap();
        let cfg_dir = dir.path().join(".composer-inventory");
        std::fs::create_dir(&cfg_dir).unwrap();
        std::fs::write(cfg_dir.join("config.toml"), "[analyzer]\nhash = \"sha256\"\n").unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.analyzer.hash, "sha256");
    }

    #[test]
    fn test_invalid_override_is_error() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[analyzer\nenabled = ").unwrap();
        let dir = TempDir::new().unwrap();
        assert!(load_config(dir.path(), Some(f.path())).is_err());
    }
}
