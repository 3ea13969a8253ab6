//! Configuration management for sitemap generation.
//!
//! Parses `sitemap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [sitemap]
//! directory = "maps"
//! size = 25000
//!
//! [output]
//! public_dir = "public"
//! base_url = "https://example.com"
//! create_dirs = true
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `sitemap.directory`
//! - `output.public_dir`
//! - `output.base_url`

mod expand;

use serde::Deserialize;
use sitemap_core::{BuilderConfig, DEFAULT_MAX_SIZE};
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output subdirectory.
    pub directory: Option<String>,
    /// Override maximum URLs per file.
    pub size: Option<usize>,
    /// Override public root directory.
    pub public_dir: Option<PathBuf>,
    /// Override public base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitemap.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sitemap layout configuration.
    pub sitemap: SitemapConfig,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Sitemap layout configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Subdirectory of the public root that receives the sitemap files.
    pub directory: String,
    /// Maximum number of URLs per sitemap file.
    pub size: usize,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    public_dir: Option<String>,
    base_url: Option<String>,
    create_dirs: Option<bool>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Public root directory the sitemap files are written under.
    pub public_dir: PathBuf,
    /// Public URL of the public root.
    pub base_url: Option<String>,
    /// Whether missing output directories are created.
    pub create_dirs: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.base_url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitemap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, and the
    /// result is validated again.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Settings for [`sitemap_core::SitemapBuilder`].
    ///
    /// Passed through as configured; the builder normalizes the directory.
    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            directory: self.sitemap.directory.clone(),
            max_size: self.sitemap.size,
        }
    }

    /// Get the validated public base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no base URL is configured.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        let url = self.output_resolved.base_url.as_deref().ok_or_else(|| {
            ConfigError::Validation("output.base_url required to build a sitemap index".into())
        })?;
        require_non_empty(url, "output.base_url")?;
        require_http_url(url, "output.base_url")?;
        Ok(url)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(directory) = &settings.directory {
            self.sitemap.directory.clone_from(directory);
        }
        if let Some(size) = settings.size {
            self.sitemap.size = size;
        }
        if let Some(public_dir) = &settings.public_dir {
            self.output_resolved.public_dir.clone_from(public_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.output_resolved.base_url = Some(base_url.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            sitemap: SitemapConfig::default(),
            output: OutputConfigRaw::default(),
            output_resolved: OutputConfig {
                public_dir: base.join("public"),
                base_url: None,
                create_dirs: true,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sitemap.size == 0 {
            return Err(ConfigError::Validation(
                "sitemap.size must be greater than 0".to_owned(),
            ));
        }

        // base_url is optional until an index is built, but must be sane if set
        if let Some(ref base_url) = self.output_resolved.base_url {
            require_non_empty(base_url, "output.base_url")?;
            require_http_url(base_url, "output.base_url")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.sitemap.directory = expand::expand_env(&self.sitemap.directory, "sitemap.directory")?;

        if let Some(ref dir) = self.output.public_dir {
            self.output.public_dir = Some(expand::expand_env(dir, "output.public_dir")?);
        }
        if let Some(ref url) = self.output.base_url {
            self.output.base_url = Some(expand::expand_env(url, "output.base_url")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            public_dir: config_dir.join(self.output.public_dir.as_deref().unwrap_or("public")),
            base_url: self.output.base_url.clone(),
            create_dirs: self.output.create_dirs.unwrap_or(true),
        };
    }
}
