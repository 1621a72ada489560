use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

/// Key bindings shown in the header hints and help screen.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Keymap {
    pub quit: String,
    pub help: String,
    pub view_home: String,
    pub view_gallery: String,
    pub view_filter: String,
    pub view_stats: String,
    pub cursor_up: String,
    pub cursor_down: String,
    pub open_image: String,
    pub preview: String,
    pub download: String,
    pub close_preview: String,
    pub next_field: String,
    pub prev_field: String,
    pub prev_value: String,
    pub next_value: String,
    pub toggle_filter: String,
    pub reset_filters: String,
    pub reload: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub keymap: Keymap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keymap: Keymap {
                quit: "q".to_string(),
                help: "?".to_string(),
                view_home: "h".to_string(),
                view_gallery: "g".to_string(),
                view_filter: "f".to_string(),
                view_stats: "s".to_string(),
                cursor_up: "up".to_string(),
                cursor_down: "down".to_string(),
                open_image: "o".to_string(),
                preview: "enter".to_string(),
                download: "d".to_string(),
                close_preview: "esc".to_string(),
                next_field: "tab".to_string(),
                prev_field: "shift-tab".to_string(),
                prev_value: "left".to_string(),
                next_value: "right".to_string(),
                toggle_filter: "space".to_string(),
                reset_filters: "r".to_string(),
                reload: "r".to_string(),
            },
        }
    }
}

/// Load the keymap config, writing the default on first run. A malformed
/// file falls back to defaults with a logged warning rather than failing
/// the session.
pub fn load_config(path: &PathBuf) -> Config {
    if !path.exists() {
        let config = Config::default();
        if let Ok(toml) = toml::to_string(&config) {
            if let Err(err) = fs::write(path, toml) {
                warn!("failed to write default config {}: {err}", path.display());
            }
        }
        return config;
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!("malformed config {}: {err}; using defaults", path.display());
                Config::default()
            }
        },
        Err(err) => {
            warn!("failed to read config {}: {err}; using defaults", path.display());
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = load_config(&path);
        assert!(path.exists());
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "keymap = 7").unwrap();
        let config = load_config(&path);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.keymap.quit = "x".to_string();
        fs::write(&path, toml::to_string(&config).unwrap()).unwrap();
        assert_eq!(load_config(&path).keymap.quit, "x");
    }
}
