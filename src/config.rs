//! Extractor configuration and its JSON file format
//!
//! Configuration is written atomically (temp file, sync, rename) so a
//! crashed writer never leaves a truncated file behind.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::LogLevel;
use crate::engine::memory::MEMORY_ENGINE;

/// Configuration for action-backed filter sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExtractorConfig {
    /// Name of the engine factory to resolve from the registry
    pub engine: String,

    /// Logging level requested from the engine before execution
    pub logging_level: LogLevel,

    /// Process id passed to the engine (default: the source's type name)
    pub process_id: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            engine: MEMORY_ENGINE.to_string(),
            logging_level: LogLevel::Debug,
            process_id: None,
        }
    }
}

/// Write data atomically to `path`
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .with_context(|| format!("Failed to create temp file: {:?}", temp_path))?;

    file.write_all(data).context("Failed to write data")?;
    file.sync_all().context("Failed to sync file")?;
    drop(file);

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename {:?} to {:?}", temp_path, path))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let dir = OpenOptions::new()
            .read(true)
            .open(parent)
            .with_context(|| format!("Failed to open directory: {:?}", parent))?;
        dir.sync_all().context("Failed to sync directory")?;
    }

    Ok(())
}

/// Write extractor configuration as pretty JSON
pub fn write_config(path: &Path, config: &ExtractorConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let json = serde_json::to_vec_pretty(config).context("Failed to serialize config")?;
    write_atomic(path, &json)
}

/// Load extractor configuration
///
/// Missing keys fall back to [`ExtractorConfig::default`].
pub fn load_config(path: &Path) -> Result<ExtractorConfig> {
    let data = fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let config: ExtractorConfig =
        serde_json::from_slice(&data).context("Failed to deserialize config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf").join("extractor.json");

        let config = ExtractorConfig {
            engine: "warehouse".to_string(),
            logging_level: LogLevel::Warn,
            process_id: Some("nightly-filters".to_string()),
        };

        write_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded, config);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("extractor.json");
        fs::write(&path, br#"{ "process-id": "p-1" }"#).unwrap();

        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded.engine, MEMORY_ENGINE);
        assert_eq!(loaded.logging_level, LogLevel::Debug);
        assert_eq!(loaded.process_id.as_deref(), Some("p-1"));
    }

    #[test]
    fn test_missing_config_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.json");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }
}
