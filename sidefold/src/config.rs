use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sidefold_ui_panel::{LayoutConfig, PanelConfig, PanelPosition};

use crate::errors::ConfigError;

pub(crate) const NAVBAR_PANEL: &str = "navbar";
pub(crate) const QUICK_PANEL: &str = "quick-panel";

/// Persisted shell layout and the panels to mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ShellConfig {
    pub(crate) layout: LayoutConfig,
    pub(crate) panels: Vec<PanelConfig>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            panels: vec![
                PanelConfig::new(NAVBAR_PANEL, PanelPosition::Left)
                    .with_locked_open("gt-md"),
                PanelConfig::new(QUICK_PANEL, PanelPosition::Right)
                    .with_hover_unfold(false),
            ],
        }
    }
}

/// Status describing how the shell config was loaded from disk.
#[derive(Debug, Clone)]
pub(crate) enum ConfigLoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Result of loading the shell config from disk.
#[derive(Debug, Clone)]
pub(crate) struct ConfigLoad {
    config: ShellConfig,
    status: ConfigLoadStatus,
}

impl ConfigLoad {
    fn new(config: ShellConfig, status: ConfigLoadStatus) -> Self {
        Self { config, status }
    }

    /// Consume the value and return both payload and status.
    pub(crate) fn into_parts(self) -> (ShellConfig, ConfigLoadStatus) {
        (self.config, self.status)
    }
}

pub(crate) fn load_shell_config() -> Result<ConfigLoad, ConfigError> {
    load_config_from_path(&config_path())
}

pub(crate) fn save_shell_config(config: &ShellConfig) -> Result<(), ConfigError> {
    save_config_to_path(&config_path(), config)
}

fn load_config_from_path(path: &Path) -> Result<ConfigLoad, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigLoad::new(
                ShellConfig::default(),
                ConfigLoadStatus::Missing,
            ));
        },
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str::<ShellConfig>(&data) {
        Ok(config) => Ok(ConfigLoad::new(config, ConfigLoadStatus::Loaded)),
        Err(err) => Ok(ConfigLoad::new(
            ShellConfig::default(),
            ConfigLoadStatus::Invalid(format!("{err}")),
        )),
    }
}

fn save_config_to_path(
    path: &Path,
    config: &ShellConfig,
) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let payload = serde_json::to_string_pretty(config)?;
    write_atomic(path, payload.as_bytes())?;

    Ok(())
}

fn config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("sidefold")
            .join("shell.json");
    }

    std::env::temp_dir().join("sidefold").join("shell.json")
}

fn write_atomic(path: &Path, payload: &[u8]) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use sidefold_ui_panel::{PanelConfig, PanelPosition};

    use super::{
        ConfigLoadStatus, NAVBAR_PANEL, ShellConfig, load_config_from_path,
        save_config_to_path,
    };

    #[test]
    fn given_missing_file_when_load_then_returns_defaults_with_missing_status()
    {
        let root = test_temp_dir("missing");
        let path = root.join("shell.json");

        let loaded = load_config_from_path(&path)
            .expect("missing config should not fail");
        let (config, status) = loaded.into_parts();

        assert!(matches!(status, ConfigLoadStatus::Missing));
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.panels[0].name, NAVBAR_PANEL);
        assert_eq!(config.panels[0].locked_open.as_deref(), Some("gt-md"));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_saved_config_when_load_then_round_trip_matches() {
        let root = test_temp_dir("round_trip");
        let path = root.join("nested").join("shell.json");
        let mut config = ShellConfig::default();
        config.layout.navbar.folded = true;
        config.panels.push(
            PanelConfig::new("chat", PanelPosition::Right)
                .with_invisible_overlay(true),
        );

        save_config_to_path(&path, &config)
            .expect("config should save successfully");
        let (loaded, status) = load_config_from_path(&path)
            .expect("config should load successfully")
            .into_parts();

        assert!(matches!(status, ConfigLoadStatus::Loaded));
        assert_eq!(loaded, config);
        assert!(!path.with_extension("json.tmp").exists());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_partial_json_when_load_then_missing_sections_use_defaults() {
        let root = test_temp_dir("partial");
        let path = root.join("shell.json");
        fs::write(&path, r#"{ "layout": { "navbar": { "folded": true } } }"#)
            .expect("partial payload should be written");

        let (config, status) = load_config_from_path(&path)
            .expect("config should load successfully")
            .into_parts();

        assert!(matches!(status, ConfigLoadStatus::Loaded));
        assert!(config.layout.navbar.folded);
        assert_eq!(config.panels, ShellConfig::default().panels);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_invalid_json_when_load_then_returns_defaults_with_invalid_status()
    {
        let root = test_temp_dir("invalid_json");
        let path = root.join("shell.json");
        fs::write(&path, "{ this is not valid json")
            .expect("invalid test payload should be written");

        let (config, status) = load_config_from_path(&path)
            .expect("loading invalid config should not fail with io error")
            .into_parts();

        assert_eq!(config, ShellConfig::default());
        match status {
            ConfigLoadStatus::Invalid(message) => {
                assert!(!message.is_empty());
            },
            other => panic!("expected invalid status, got {other:?}"),
        }

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "sidefold-config-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
