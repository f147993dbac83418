//! Loading [`ThemeOptions`] from configuration files.
//!
//! JSON and TOML are supported, both using the camelCase field names of the
//! wire format:
//!
//! ```toml
//! spacing = 8
//!
//! [palette]
//! mode = "dark"
//!
//! [palette.primary]
//! main = "#0067C0"
//!
//! [zIndex]
//! modal = 1350
//! ```

use std::{fs, path::Path};

use thiserror::Error;
use tracing::debug;

use crate::theme::ThemeOptions;

/// Errors produced while loading theme options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read theme options from {path}")]
    Io {
        /// The file that was being read.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The input is not valid JSON theme options.
    #[error("invalid JSON theme options: {0}")]
    Json(#[from] serde_json::Error),
    /// The input is not valid TOML theme options.
    #[error("invalid TOML theme options: {0}")]
    Toml(#[from] toml::de::Error),
    /// The file extension is neither `.json` nor `.toml`.
    #[error("unsupported theme options format `{0}`, expected .json or .toml")]
    UnsupportedFormat(String),
}

impl ThemeOptions {
    /// Parses options from a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parses options from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads options from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loading theme options");
        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "toml" => Self::from_toml_str(&content),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{palette::PaletteMode, theme::create_theme};

    const TOML: &str = r##"
spacing = 8

[palette]
mode = "dark"

[palette.primary]
main = "#0067C0"

[zIndex]
modal = 1350

[breakpoints.values]
compact = 0
wide = 840
"##;

    #[test]
    fn test_toml_options() {
        let options = ThemeOptions::from_toml_str(TOML).unwrap();
        let theme = create_theme(options);
        assert_eq!(theme.palette.mode, PaletteMode::Dark);
        assert_eq!(theme.palette.primary.main, "#0067C0");
        assert_eq!(theme.z_index.modal, 1350);
        assert_eq!(theme.spacing.apply([1]), "8px");
        assert_eq!(theme.breakpoints.keys, ["compact", "wide"]);
    }

    #[test]
    fn test_json_options() {
        let options =
            ThemeOptions::from_json_str(r#"{"typography": {"htmlFontSize": 10}}"#).unwrap();
        assert_eq!(create_theme(options).typography.px_to_rem(10.0), "1rem");
    }

    #[test]
    fn test_unknown_mode_is_lenient() {
        let options = ThemeOptions::from_json_str(r#"{"palette": {"mode": "sepia"}}"#).unwrap();
        assert_eq!(create_theme(options).palette.mode, PaletteMode::Light);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            ThemeOptions::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ThemeOptions::from_toml_str("spacing = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = std::env::temp_dir().join(format!("neighbor-theme-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let toml_path = dir.join("theme.toml");
        fs::write(&toml_path, TOML).unwrap();
        assert_eq!(
            ThemeOptions::load(&toml_path).unwrap(),
            ThemeOptions::from_toml_str(TOML).unwrap()
        );

        let yaml_path = dir.join("theme.yaml");
        fs::write(&yaml_path, "spacing: 8").unwrap();
        assert!(matches!(
            ThemeOptions::load(&yaml_path),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));

        assert!(matches!(
            ThemeOptions::load(dir.join("missing.json")),
            Err(ConfigError::Io { .. })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}
