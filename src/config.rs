//! Configuration file schema for snipcheck.
//!
//! A config file tunes the heuristics of the analyzers and formatter and
//! lists paths to skip when checking a directory. Every field is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file names searched in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["snipcheck.yaml", ".snipcheck.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    /// Glob patterns for paths to skip (e.g., "**/dist/**")
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub javascript: JavaScriptConfig,
    #[serde(default)]
    pub structured_message: StructuredMessageConfig,
    #[serde(default)]
    pub format: FormatConfig,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Find a config file in `dir`, if one exists.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }

    /// Check if a path should be skipped based on `exclude` patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.exclude {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Heuristic switches for the JavaScript/TypeScript analyzer.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct JavaScriptConfig {
    /// Don't ask for a terminator on the last statement before a `}` line.
    #[serde(default)]
    pub skip_before_closing_brace: bool,
    /// Locate unused declarations by whole word instead of substring.
    #[serde(default)]
    pub locate_unused_by_word: bool,
}

/// Rules for the structured-message profile.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StructuredMessageConfig {
    /// Root field that must carry `expected_type` (default: "type")
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    /// Required value of the discriminator (default: "flex")
    #[serde(default = "default_expected_type")]
    pub expected_type: String,
    /// Root field that should be present (default: "altText")
    #[serde(default = "default_recommended_field")]
    pub recommended_field: String,
}

fn default_discriminator() -> String {
    "type".to_string()
}

fn default_expected_type() -> String {
    "flex".to_string()
}

fn default_recommended_field() -> String {
    "altText".to_string()
}

impl Default for StructuredMessageConfig {
    fn default() -> Self {
        Self {
            discriminator: default_discriminator(),
            expected_type: default_expected_type(),
            recommended_field: default_recommended_field(),
        }
    }
}

/// Formatter settings.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct FormatConfig {
    /// Spaces per indent level for the brace indenter (default: 2)
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

fn default_indent_width() -> usize {
    2
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
        }
    }
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.format.indent_width == 0 {
        anyhow::bail!("format.indent_width must be at least 1");
    }

    let sm = &config.structured_message;
    if sm.discriminator.is_empty() {
        anyhow::bail!("structured_message.discriminator must not be empty");
    }
    if sm.recommended_field.is_empty() {
        anyhow::bail!("structured_message.recommended_field must not be empty");
    }

    for pattern in &config.exclude {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid exclude pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1"
exclude:
  - "**/dist/**"
javascript:
  skip_before_closing_brace: true
structured_message:
  expected_type: "bubble"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.javascript.skip_before_closing_brace);
        assert!(!config.javascript.locate_unused_by_word);
        assert_eq!(config.structured_message.discriminator, "type");
        assert_eq!(config.structured_message.expected_type, "bubble");
        assert_eq!(config.format.indent_width, 2);
        assert!(config.is_path_excluded(Path::new("web/dist/app.js")));
        assert!(!config.is_path_excluded(Path::new("web/src/app.js")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.structured_message, StructuredMessageConfig::default());
        assert_eq!(config.format, FormatConfig::default());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.format.indent_width = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.exclude.push("[".to_string());
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.structured_message.discriminator.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_discover_config() {
        let temp = TempDir::new().unwrap();
        assert!(Config::discover(temp.path()).is_none());

        let path = temp.path().join(".snipcheck.yaml");
        std::fs::write(&path, "format:\n  indent_width: 4\n").unwrap();
        assert_eq!(Config::discover(temp.path()), Some(path.clone()));

        let config = Config::parse_file(&path).unwrap();
        assert_eq!(config.format.indent_width, 4);
    }
}
