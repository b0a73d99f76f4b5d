use crate::query::parser::DEFAULT_LIMIT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "docsift";
const CONFIG_FILE: &str = "config.json";

/// File names a documentation build leaves its index under, relative to
/// the directory being searched
const INDEX_CANDIDATES: &[&str] = &[
    "search_index.js",
    "build/search_index.js",
    "docs/build/search_index.js",
];

/// Application configuration stored in the user config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Index file used when `--index` is not given
    #[serde(default)]
    pub index_path: Option<PathBuf>,

    /// Result limit when the query has no `top:` filter
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// `auto`, `always` or `never`
    #[serde(default = "default_color")]
    pub color: String,

    /// Base URL printed in front of result locations
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_color() -> String {
    "auto".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index_path: None,
            default_limit: default_limit(),
            color: default_color(),
            base_url: None,
        }
    }
}

impl AppConfig {
    /// Load config from the config directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from an explicit file; a missing file yields defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to `config_path`, creating parent directories
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the path to the config file, if the platform has a config directory
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}

/// Find a search index starting from a given path.
///
/// `start` may be the index file itself. Otherwise walks up the directory
/// tree and returns the first known index location that exists.
pub fn find_index_file(start: &Path) -> Result<PathBuf> {
    if start.is_file() {
        return Ok(start.to_path_buf());
    }

    let start = start
        .canonicalize()
        .with_context(|| format!("Cannot access {}", start.display()))?;
    let mut current = start.as_path();

    loop {
        for candidate in INDEX_CANDIDATES {
            let path = current.join(candidate);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "found search index");
                return Ok(path);
            }
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    anyhow::bail!(
        "No search index found in {} or its parents (looked for {})",
        start.display(),
        INDEX_CANDIDATES.join(", ")
    )
}

/// Pick the index file: explicit flag, then config, then discovery from
/// the working directory
pub fn resolve_index_path(explicit: Option<&Path>, config: &AppConfig) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return find_index_file(path);
    }
    if let Some(path) = &config.index_path {
        return Ok(path.clone());
    }
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    find_index_file(&cwd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.color, "auto");
        assert!(config.index_path.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"color": "never"}"#).unwrap();
        assert_eq!(config.color, "never");
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_load_missing_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            index_path: Some(PathBuf::from("/srv/docs/search_index.js")),
            default_limit: 10,
            color: "always".into(),
            base_url: Some("https://docs.example.org".into()),
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_find_index_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("docs").join("build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("search_index.js"), "{\"docs\": []}").unwrap();

        let nested = dir.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let found = find_index_file(&nested).unwrap();
        assert!(found.ends_with("docs/build/search_index.js"));
    }

    #[test]
    fn test_find_index_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.js");
        fs::write(&file, "{\"docs\": []}").unwrap();
        assert_eq!(find_index_file(&file).unwrap(), file);
    }

    #[test]
    fn test_resolve_prefers_config_over_discovery() {
        let config = AppConfig {
            index_path: Some(PathBuf::from("/configured/search_index.js")),
            ..AppConfig::default()
        };
        assert_eq!(
            resolve_index_path(None, &config).unwrap(),
            PathBuf::from("/configured/search_index.js")
        );
    }
}
