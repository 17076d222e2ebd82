use crate::builders::Location;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".filerenamer";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// First number used by `enum`
    #[serde(default = "default_enum_start")]
    pub enum_start: i64,

    /// Where `enum` puts the number
    #[serde(default)]
    pub enum_location: Location,

    /// Text between the root and the number when enumerating at the end
    #[serde(default = "default_enum_separator")]
    pub enum_separator: String,

    /// Where `add-from-file` puts the captured text
    #[serde(default)]
    pub add_location: Location,

    /// Default preview format: "table", "diff", "summary", or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            enum_start: default_enum_start(),
            enum_location: Location::End,
            enum_separator: default_enum_separator(),
            add_location: Location::End,
            preview_format: default_preview(),
            use_color: None,
        }
    }
}

fn default_enum_start() -> i64 {
    1
}

fn default_enum_separator() -> String {
    "_".to_string()
}

fn default_preview() -> String {
    "table".to_string()
}

impl Config {
    /// Load config from `.filerenamer/config.toml` in the working directory,
    /// then from the user config directory, falling back to defaults.
    pub fn load() -> Result<Self> {
        for path in Self::search_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_DIR).join(CONFIG_FILE));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("filerenamer").join(CONFIG_FILE));
        }
        paths
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.enum_start, 1);
        assert_eq!(config.defaults.enum_location, Location::End);
        assert_eq!(config.defaults.enum_separator, "_");
        assert_eq!(config.defaults.add_location, Location::End);
        assert_eq!(config.defaults.preview_format, "table");
        assert_eq!(config.defaults.use_color, None);
    }

    #[test]
    fn test_load_save_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.defaults.enum_start = 100;
        config.defaults.enum_location = Location::Start;
        config.defaults.enum_separator = "-".to_string();
        config.defaults.use_color = Some(false);

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.defaults.enum_start, 100);
        assert_eq!(loaded.defaults.enum_location, Location::Start);
        assert_eq!(loaded.defaults.enum_separator, "-");
        assert_eq!(loaded.defaults.use_color, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[defaults]
preview_format = "diff"
add_location = "start"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.preview_format, "diff");
        assert_eq!(config.defaults.add_location, Location::Start);
        assert_eq!(config.defaults.enum_start, 1);
        assert_eq!(config.defaults.enum_separator, "_");
    }

    #[test]
    fn test_malformed_config_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[defaults\nenum_start = ").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
