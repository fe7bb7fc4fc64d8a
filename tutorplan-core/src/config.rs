//! Global planner configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::export::ExportOptions;

static DEFAULT_DATA_DIR: &str = "~/.local/share/tutorplan";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Image export settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: u32,
    pub background: String,
    /// Pause before capturing, giving the view time to settle.
    pub settle_delay_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            width: 1600,
            height: 900,
            pixel_ratio: 2,
            background: "#f8fafc".to_string(),
            settle_delay_ms: 600,
        }
    }
}

/// Global configuration at ~/.config/tutorplan/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Where the planner keeps its roster and entries.
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_dir: default_data_dir(),
            export: ExportConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> PlannerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlannerError::Config("Could not determine config directory".into()))?
            .join("tutorplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented template on first run.
    pub fn load() -> PlannerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PlannerResult<Self> {
        let config: PlannerConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| PlannerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlannerError::Config(e.to_string()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> PlannerResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PlannerError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlannerResult<()> {
        let export = ExportConfig::default();
        let contents = format!(
            "\
# tutorplan configuration

# Where the roster and schedule are stored:
# data_dir = \"{}\"

# Month image export:
# [export]
# width = {}
# height = {}
# pixel_ratio = {}
# background = \"{}\"
# settle_delay_ms = {}
",
            DEFAULT_DATA_DIR,
            export.width,
            export.height,
            export.pixel_ratio,
            export.background,
            export.settle_delay_ms,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            width: self.export.width,
            height: self.export.height,
            pixel_ratio: self.export.pixel_ratio,
            background: self.export.background.clone(),
            settle_delay: Duration::from_millis(self.export.settle_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tutorplan/config.toml");

        PlannerConfig::create_default_config(&path).unwrap();
        let config = PlannerConfig::load_from(&path).unwrap();

        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_overrides_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/planner\"\n\n[export]\nwidth = 1200\nsettle_delay_ms = 0\n",
        )
        .unwrap();

        let config = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/srv/planner"));
        assert_eq!(config.export.width, 1200);
        assert_eq!(config.export.height, 900);

        let options = config.export_options();
        assert_eq!(options.settle_delay, Duration::ZERO);
        assert_eq!(options.pixel_ratio, 2);
    }

    #[test]
    fn test_save_omits_default_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        PlannerConfig::default().save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert!(!written.contains("data_dir"));
        assert_eq!(PlannerConfig::load_from(&path).unwrap(), PlannerConfig::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }
}
