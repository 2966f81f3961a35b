use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked for in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "litdoc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid glob pattern '{pattern}' in {field}: {message}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        message: String,
    },
}

fn default_include() -> Vec<String> {
    vec!["**/*.js".to_string()]
}

fn default_highlight() -> bool {
    true
}

/// Project settings, all optional in the TOML file.
///
/// ```toml
/// inputs = ["src"]
/// output = "~/site/api"
/// exclude = ["**/vendor/**"]
/// footer = "Generated for the docs site"
/// theme = "base16-ocean.dark"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub template: Option<PathBuf>,
    #[serde(default)]
    pub theme: Option<String>,
    /// Set to `false` to emit escaped code without syntax highlighting.
    #[serde(default = "default_highlight")]
    pub highlight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            include: default_include(),
            exclude: Vec::new(),
            footer: None,
            template: None,
            theme: None,
            highlight: default_highlight(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.validate_patterns()?;

        // Expand shell variables and tilde in the loaded paths
        config.inputs = config
            .inputs
            .into_iter()
            .map(|path| Self::expand_path(&path).unwrap_or(path))
            .collect();
        config.output = config
            .output
            .map(|path| Self::expand_path(&path).unwrap_or(path));
        config.template = config
            .template
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::default_path();
        Self::load_from_path(&config_path)
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Check that every include and exclude entry is a valid glob.
    pub fn validate_patterns(&self) -> Result<(), ConfigError> {
        let fields = [("include", &self.include), ("exclude", &self.exclude)];
        for (field, patterns) in fields {
            for pattern in patterns {
                glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                    field,
                    pattern: pattern.clone(),
                    message: e.msg.to_string(),
                })?;
            }
        }
        Ok(())
    }

    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
