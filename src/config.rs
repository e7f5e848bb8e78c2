//! User settings from `config.toml`.
//!
//! Looked up at `<config dir>/cellgrid/config.toml` unless `--config` names a
//! file. A missing default file is silent; every other problem becomes a
//! warning and the defaults are kept.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;
pub const DEFAULT_COLUMN_WIDTH: usize = 12;
const MIN_COLUMN_WIDTH: usize = 4;
const MAX_COLUMN_WIDTH: usize = 40;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    column_width: Option<usize>,
    sample: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Display width of every grid column, in terminal cells.
    pub column_width: usize,
    /// Start from the example workbook.
    pub sample: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            column_width: DEFAULT_COLUMN_WIDTH,
            sample: false,
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellgrid")?;
    Some(proj.config_dir().join("config.toml"))
}

/// Load settings, returning the config and any warnings to show the user.
pub fn load_config(explicit: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let path = explicit.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = path else {
        return (Config::default(), warnings);
    };
    if !path.exists() {
        if explicit.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let content = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            return (Config::default(), warnings);
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                return (Config::default(), warnings);
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            return (Config::default(), warnings);
        }
    };

    let config = parse_config(&content, &mut warnings).unwrap_or_else(|err| {
        warnings.push(format!("Failed to parse {}: {}", path.display(), err));
        Config::default()
    });
    (config, warnings)
}

fn parse_config(content: &str, warnings: &mut Vec<String>) -> Result<Config, toml::de::Error> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = Config::default();

    if let Some(width) = file.column_width {
        let clamped = width.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        if clamped != width {
            warnings.push(format!(
                "column_width {} out of range, using {}",
                width, clamped
            ));
        }
        config.column_width = clamped;
    }
    if let Some(sample) = file.sample {
        config.sample = sample;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let mut warnings = Vec::new();
        let config = parse_config("column_width = 16\nsample = true\n", &mut warnings).unwrap();
        assert_eq!(
            config,
            Config {
                column_width: 16,
                sample: true
            }
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let mut warnings = Vec::new();
        assert_eq!(parse_config("", &mut warnings).unwrap(), Config::default());
    }

    #[test]
    fn test_column_width_is_clamped() {
        let mut warnings = Vec::new();
        let config = parse_config("column_width = 400", &mut warnings).unwrap();
        assert_eq!(config.column_width, MAX_COLUMN_WIDTH);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut warnings = Vec::new();
        assert!(parse_config("colour = \"red\"", &mut warnings).is_err());
    }

    #[test]
    fn test_missing_explicit_file_warns() {
        let (config, warnings) = load_config(Some(Path::new("/nonexistent/cellgrid.toml")));
        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not found"));
    }
}
