//! Configuration management for sitenav.
//!
//! Parses `sitenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
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
//! - `graph.snapshot_dir`
//! - `templates.dir`

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override snapshot directory.
    pub snapshot_dir: Option<PathBuf>,
    /// Override template directory.
    pub template_dir: Option<PathBuf>,
    /// Override multi-language flag.
    pub multi_language: Option<bool>,
    /// Override meta navigation flag.
    pub meta_navigation: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Default navigation template id.
const DEFAULT_NAVIGATION_TEMPLATE: &str = "navigation.html";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
    /// Snapshot location (paths are relative strings from TOML).
    graph: GraphConfigRaw,
    /// Template settings (paths are relative strings from TOML).
    templates: TemplatesConfigRaw,
    /// Page authorization settings.
    pub auth: AuthConfig,
    /// Action slugs per language: `language -> CamelCaseAction -> slug`.
    pub actions: HashMap<String, HashMap<String, String>>,

    /// Resolved graph configuration (set after loading).
    #[serde(skip)]
    pub graph_resolved: GraphConfig,
    /// Resolved template configuration (set after loading).
    #[serde(skip)]
    pub templates_resolved: TemplatesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site-wide settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site languages. The first one is the default language.
    pub languages: Vec<String>,
    /// Prefix URLs with the language. Defaults to "more than one language".
    pub multi_language: Option<bool>,
    /// Whether the meta navigation is enabled.
    pub meta_navigation: bool,
    /// Id of the "page not found" page.
    pub not_found_page_id: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_owned()],
            multi_language: None,
            meta_navigation: true,
            not_found_page_id: 404,
        }
    }
}

impl SiteConfig {
    /// Language used when a request does not name one.
    #[must_use]
    pub fn default_language(&self) -> &str {
        self.languages.first().map_or("en", String::as_str)
    }

    /// Whether URLs carry a language prefix.
    #[must_use]
    pub fn is_multi_language(&self) -> bool {
        self.multi_language.unwrap_or(self.languages.len() > 1)
    }

    /// Check whether a language is configured.
    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }
}

/// Raw graph configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GraphConfigRaw {
    snapshot_dir: Option<String>,
}

/// Resolved graph configuration with absolute paths.
#[derive(Debug, Default)]
pub struct GraphConfig {
    /// Directory holding one snapshot directory per language.
    pub snapshot_dir: PathBuf,
}

/// Raw template configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    dir: Option<String>,
    navigation: Option<String>,
}

/// Resolved template configuration.
#[derive(Debug)]
pub struct TemplatesConfig {
    /// Directory with custom templates. Built-in templates only when `None`.
    pub dir: Option<PathBuf>,
    /// Template used for menus when a caller does not name one.
    pub navigation: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            navigation: DEFAULT_NAVIGATION_TEMPLATE.to_owned(),
        }
    }
}

/// Page authorization settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Handling of pages whose stored auth data cannot be decoded.
    pub malformed_data: MalformedData,
}

/// Handling of undecodable auth data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedData {
    /// Show the page as if it required no authentication.
    #[default]
    Allow,
    /// Show the page to authenticated actors only.
    Deny,
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
        /// Config field path (e.g., "`graph.snapshot_dir`").
        field: String,
        /// Error message (e.g., "${`SNAPSHOT_DIR`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
        }

        Ok(config)
    }

    /// Default language of the site.
    #[must_use]
    pub fn default_language(&self) -> &str {
        self.site.default_language()
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(snapshot_dir) = &settings.snapshot_dir {
            self.graph_resolved.snapshot_dir.clone_from(snapshot_dir);
        }
        if let Some(template_dir) = &settings.template_dir {
            self.templates_resolved.dir = Some(template_dir.clone());
        }
        if let Some(multi_language) = settings.multi_language {
            self.site.multi_language = Some(multi_language);
        }
        if let Some(meta_navigation) = settings.meta_navigation {
            self.site.meta_navigation = meta_navigation;
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
            site: SiteConfig::default(),
            graph: GraphConfigRaw::default(),
            templates: TemplatesConfigRaw::default(),
            auth: AuthConfig::default(),
            actions: HashMap::new(),
            graph_resolved: GraphConfig {
                snapshot_dir: base.join("var").join("navigation"),
            },
            templates_resolved: TemplatesConfig::default(),
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
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        require_non_empty(&self.templates_resolved.navigation, "templates.navigation")?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        if self.site.languages.is_empty() {
            return Err(ConfigError::Validation(
                "site.languages must list at least one language".to_owned(),
            ));
        }
        for language in &self.site.languages {
            require_non_empty(language, "site.languages")?;
            if language.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "site.languages entry '{language}' cannot contain '/'"
                )));
            }
        }
        if self.site.not_found_page_id == 0 {
            return Err(ConfigError::Validation(
                "site.not_found_page_id cannot be 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.graph.snapshot_dir {
            self.graph.snapshot_dir = Some(expand::expand_env(dir, "graph.snapshot_dir")?);
        }
        if let Some(ref dir) = self.templates.dir {
            self.templates.dir = Some(expand::expand_env(dir, "templates.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.graph_resolved = GraphConfig {
            snapshot_dir: config_dir.join(
                self.graph
                    .snapshot_dir
                    .as_deref()
                    .unwrap_or("var/navigation"),
            ),
        };

        self.templates_resolved = TemplatesConfig {
            dir: self.templates.dir.as_deref().map(|d| config_dir.join(d)),
            navigation: self
                .templates
                .navigation
                .clone()
                .unwrap_or_else(|| DEFAULT_NAVIGATION_TEMPLATE.to_owned()),
        };
    }
}
