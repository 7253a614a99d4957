//! User configuration (`config.toml`).
//!
//! ```toml
//! rows = 6
//! cols = 6
//! column_width = 10
//! ```
//!
//! Problems with the file never stop the program: they come back as warnings
//! and the defaults are used instead.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_COLUMN_WIDTH: usize = 10;
pub const MIN_COLUMN_WIDTH: usize = 3;
pub const MAX_COLUMN_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub rows: usize,
    pub cols: usize,
    pub column_width: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            rows: 6,
            cols: 6,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl SheetConfig {
    fn normalized(mut self) -> Self {
        self.column_width = self.column_width.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        self
    }
}

/// Default location: `<config dir>/zingsheet/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "zingsheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load configuration from `explicit`, or from the user config file.
///
/// A missing user file is silent; a missing explicit file is a warning.
pub fn load_config(explicit: Option<&Path>) -> (SheetConfig, Vec<String>) {
    let mut warnings = Vec::new();
    let path = explicit.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = path else {
        return (SheetConfig::default(), warnings);
    };

    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (SheetConfig::default(), warnings);
    }

    let config = match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<SheetConfig>(&content) {
            Ok(parsed) => parsed.normalized(),
            Err(err) => {
                warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                SheetConfig::default()
            }
        },
        Err(err) => {
            warnings.push(format!("Failed to read {}: {}", path.display(), err));
            SheetConfig::default()
        }
    };

    tracing::debug!(path = %path.display(), ?config, "loaded config");
    (config, warnings)
}
