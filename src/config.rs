use crate::error::ConfigError;
use memory_common::{GridLayout, SessionConfig};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

// Cards need room for a border and their value
pub const MIN_CELL_SIDE: u16 = 3;

/// Card placement in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub cell_width: u16,
    pub cell_height: u16,
    pub gutter: u16,
    pub margin_x: u16,
    // Also the height of the header
    pub margin_y: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            cell_width: 9,
            cell_height: 4,
            gutter: 1,
            margin_x: 2,
            margin_y: 3,
        }
    }
}

impl LayoutConfig {
    pub fn grid(&self) -> GridLayout {
        GridLayout {
            cell_width: self.cell_width.into(),
            cell_height: self.cell_height.into(),
            gutter: self.gutter.into(),
            margin_x: self.margin_x.into(),
            margin_y: self.margin_y.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    // About 30 frames per second
    pub tick_ms: u64,
    // How long the result stays up before the program exits
    pub end_screen_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            tick_ms: 33,
            end_screen_ms: 2000,
        }
    }
}

impl DisplayConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn end_screen(&self) -> Duration {
        Duration::from_millis(self.end_screen_ms)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub layout: LayoutConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validate()?;

        if self.display.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "display.tick_ms must be > 0".into(),
            ));
        }
        if self.layout.cell_width < MIN_CELL_SIDE {
            return Err(ConfigError::Validation(format!(
                "layout.cell_width must be >= {}",
                MIN_CELL_SIDE
            )));
        }
        if self.layout.cell_height < MIN_CELL_SIDE {
            return Err(ConfigError::Validation(format!(
                "layout.cell_height must be >= {}",
                MIN_CELL_SIDE
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.session.rows, 4);
        assert_eq!(config.session.time_limit_secs, 60);
        assert_eq!(config.display.tick(), Duration::from_millis(33));
        assert_eq!(config.display.end_screen(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[session]
rows = 2
seed = 7

[layout]
cell_width = 11
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.rows, 2);
        assert_eq!(config.session.cols, 4);
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.session.mismatch_delay_ms, 500);
        assert_eq!(config.layout.cell_width, 11);
        assert_eq!(config.layout.cell_height, 4);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_layout_grid() {
        let grid = LayoutConfig::default().grid();
        assert_eq!(grid.cell_width, 9);
        assert_eq!(grid.cell_height, 4);
        assert_eq!(grid.gutter, 1);
        assert_eq!(grid.margin_x, 2);
        assert_eq!(grid.margin_y, 3);
    }

    #[test]
    fn test_validation_rejects_odd_board() {
        let mut config = AppConfig::default();
        config.session.rows = 3;
        config.session.cols = 5;
        assert!(matches!(config.validate(), Err(ConfigError::Session(_))));
    }

    #[test]
    fn test_validation_rejects_single_cell() {
        let mut config = AppConfig::default();
        config.session.rows = 1;
        config.session.cols = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_tick() {
        let mut config = AppConfig::default();
        config.display.tick_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_narrow_cells() {
        let mut config = AppConfig::default();
        config.layout.cell_width = 2;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.layout.cell_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_memory.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[session]
rows = 2
cols = 3
time_limit_secs = 30

[display]
end_screen_ms = 0
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.session.rows, 2);
        assert_eq!(config.session.cols, 3);
        assert_eq!(config.session.time_limit_secs, 30);
        assert_eq!(config.display.end_screen_ms, 0);
        assert_eq!(config.display.tick_ms, 33);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.toml");
        std::fs::write(&path, "[session]\nrows = 3\ncols = 3\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Session(_))));

        std::fs::write(&path, "[session\nrows = ").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, AppConfig::default());
        config.validate().expect("roundtripped config should be valid");
    }
}
