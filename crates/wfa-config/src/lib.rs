//! Configuration management for the workflow analyzer.
//!
//! Parses `wfa.toml` configuration files with serde and provides
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
//! - `gemini.base_url`
//! - `gemini.model`
//! - `diagrams.kroki_url`
//! - `gemini.api_key`, expanded only when the key is required
//!   (see [`Config::require_gemini`]) so commands that never call the model
//!   work without it

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Kroki URL for diagram rendering.
    pub kroki_url: Option<String>,
    /// Override Gemini model.
    pub model: Option<String>,
    /// Override raw HTML pass-through.
    pub raw_html: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wfa.toml";

/// Environment variable consulted when `gemini.api_key` is not configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation service configuration.
    pub gemini: GeminiConfig,
    /// Diagram rendering configuration (optional section).
    /// When present, `kroki_url` is required.
    diagrams: Option<DiagramsConfigRaw>,
    /// Markdown rendering configuration.
    pub render: RenderConfig,

    /// Resolved diagrams configuration (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Gemini configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key, usually `${GEMINI_API_KEY}`.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// API base URL.
    pub base_url: String,
    /// Whether to ground answers with Google Search.
    pub google_search: bool,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".to_owned(),
            base_url: "https://generativelanguage.googleapis.com".to_owned(),
            google_search: true,
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Gemini settings with a resolved API key.
#[derive(Debug)]
pub struct GeminiSettings<'a> {
    pub api_key: String,
    pub config: &'a GeminiConfig,
}

/// Raw diagrams configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    kroki_url: Option<String>,
    language: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolved diagram rendering configuration.
#[derive(Debug)]
pub struct DiagramsConfig {
    /// Kroki server URL; `None` disables graph rendering.
    pub kroki_url: Option<String>,
    /// Fence language of the process map block.
    pub language: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            kroki_url: None,
            language: "mermaid".to_owned(),
            timeout_secs: 30,
        }
    }
}

impl DiagramsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
    /// Pass raw HTML from the model through unescaped.
    pub raw_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            raw_html: false,
        }
    }
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
        /// Config field path (e.g., "`gemini.api_key`").
        field: String,
        /// Error message (e.g., "${`GEMINI_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
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

fn require_positive(value: u64, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wfa.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(kroki_url) = &settings.kroki_url {
            self.diagrams_resolved.kroki_url = Some(kroki_url.clone());
        }
        if let Some(model) = &settings.model {
            self.gemini.model.clone_from(model);
        }
        if let Some(raw_html) = settings.raw_html {
            self.render.raw_html = raw_html;
        }
    }

    /// Get Gemini settings with the API key resolved.
    ///
    /// The key comes from `gemini.api_key` (with variable expansion) or, when
    /// that is not set, from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is available or expansion fails.
    pub fn require_gemini(&self) -> Result<GeminiSettings<'_>, ConfigError> {
        let api_key = match &self.gemini.api_key {
            Some(raw) => expand::expand_env(raw, "gemini.api_key")?,
            None => std::env::var(API_KEY_ENV).unwrap_or_default(),
        };
        if api_key.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "gemini.api_key is required (set it in {CONFIG_FILENAME} or export {API_KEY_ENV})"
            )));
        }
        Ok(GeminiSettings {
            api_key,
            config: &self.gemini,
        })
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.resolve_diagrams()?;
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
        self.validate_gemini()?;
        self.validate_diagrams()?;
        Ok(())
    }

    fn validate_gemini(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.gemini.model, "gemini.model")?;
        require_non_empty(&self.gemini.base_url, "gemini.base_url")?;
        require_http_url(&self.gemini.base_url, "gemini.base_url")?;
        require_positive(self.gemini.timeout_secs, "gemini.timeout_secs")?;
        Ok(())
    }

    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        // Only validate kroki_url if set (graph rendering enabled)
        if let Some(ref kroki_url) = self.diagrams_resolved.kroki_url {
            require_non_empty(kroki_url, "diagrams.kroki_url")?;
            require_http_url(kroki_url, "diagrams.kroki_url")?;
        }
        require_non_empty(&self.diagrams_resolved.language, "diagrams.language")?;
        require_positive(self.diagrams_resolved.timeout_secs, "diagrams.timeout_secs")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.gemini.model = expand::expand_env(&self.gemini.model, "gemini.model")?;
        self.gemini.base_url = expand::expand_env(&self.gemini.base_url, "gemini.base_url")?;

        if let Some(ref mut diagrams) = self.diagrams
            && let Some(ref url) = diagrams.kroki_url
        {
            diagrams.kroki_url = Some(expand::expand_env(url, "diagrams.kroki_url")?);
        }

        Ok(())
    }

    /// Resolve the `[diagrams]` section.
    ///
    /// Validates that `kroki_url` is provided when the section exists.
    fn resolve_diagrams(&mut self) -> Result<(), ConfigError> {
        let defaults = DiagramsConfig::default();
        self.diagrams_resolved = match &self.diagrams {
            Some(diagrams) => {
                let kroki_url = diagrams.kroki_url.clone().ok_or_else(|| {
                    ConfigError::Validation(
                        "[diagrams] section requires kroki_url to be set".to_owned(),
                    )
                })?;
                DiagramsConfig {
                    kroki_url: Some(kroki_url),
                    language: diagrams.language.clone().unwrap_or(defaults.language),
                    timeout_secs: diagrams.timeout_secs.unwrap_or(defaults.timeout_secs),
                }
            }
            None => defaults,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn parse(toml: &str) -> Config {
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_diagrams().unwrap();
        config
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(
            config.gemini.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert!(config.gemini.google_search);
        assert_eq!(config.gemini.timeout(), Duration::from_secs(120));
        assert_eq!(config.diagrams_resolved.kroki_url, None);
        assert_eq!(config.diagrams_resolved.language, "mermaid");
        assert_eq!(config.diagrams_resolved.timeout(), Duration::from_secs(30));
        assert!(config.render.gfm);
        assert!(!config.render.raw_html);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse("");
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
[gemini]
api_key = "literal-key"
model = "gemini-2.5-pro"
base_url = "http://localhost:8080"
google_search = false
timeout_secs = 60

[diagrams]
kroki_url = "http://localhost:8000"
language = "kroki-mermaid"
timeout_secs = 10

[render]
gfm = false
raw_html = true
"#,
        );
        assert_eq!(config.gemini.api_key.as_deref(), Some("literal-key"));
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert!(!config.gemini.google_search);
        assert_eq!(config.gemini.timeout_secs, 60);
        assert_eq!(
            config.diagrams_resolved.kroki_url.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.diagrams_resolved.language, "kroki-mermaid");
        assert_eq!(config.diagrams_resolved.timeout_secs, 10);
        assert!(!config.render.gfm);
        assert!(config.render.raw_html);
    }

    #[test]
    fn test_diagrams_section_requires_kroki_url() {
        let mut config: Config = toml::from_str("[diagrams]\nlanguage = \"mermaid\"\n").unwrap();
        let err = config.resolve_diagrams().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: [diagrams] section requires kroki_url to be set"
        );
    }

    #[test]
    fn test_no_diagrams_section_is_valid() {
        let config = parse("[render]\ngfm = true\n");
        assert_eq!(config.diagrams_resolved.kroki_url, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = parse("");
        config.apply_cli_settings(&CliSettings {
            kroki_url: Some("https://kroki.io".to_owned()),
            model: Some("gemini-2.5-pro".to_owned()),
            raw_html: Some(true),
        });
        assert_eq!(
            config.diagrams_resolved.kroki_url.as_deref(),
            Some("https://kroki.io")
        );
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert!(config.render.raw_html);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = parse("[gemini]\nmodel = \"m\"\n");
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.gemini.model, "m");
        assert_eq!(config.diagrams_resolved.kroki_url, None);
    }

    #[test]
    fn test_expand_env_vars_kroki_url() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("WFA_TEST_CONFIG_KROKI", "https://kroki.example.com");
        }
        let config = parse("[diagrams]\nkroki_url = \"${WFA_TEST_CONFIG_KROKI}\"\n");
        assert_eq!(
            config.diagrams_resolved.kroki_url.as_deref(),
            Some("https://kroki.example.com")
        );
        unsafe {
            std::env::remove_var("WFA_TEST_CONFIG_KROKI");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::remove_var("WFA_TEST_CONFIG_MISSING");
        }
        let mut config: Config =
            toml::from_str("[gemini]\nbase_url = \"${WFA_TEST_CONFIG_MISSING}\"\n").unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "gemini.base_url"));
    }

    #[test]
    fn test_api_key_expanded_only_on_demand() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::remove_var("WFA_TEST_CONFIG_KEY_UNSET");
        }
        let config = parse("[gemini]\napi_key = \"${WFA_TEST_CONFIG_KEY_UNSET}\"\n");
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.require_gemini().unwrap_err(),
            ConfigError::EnvVar { .. }
        ));
    }

    #[test]
    fn test_require_gemini_with_literal_key() {
        let config = parse("[gemini]\napi_key = \"abc\"\n");
        let settings = config.require_gemini().unwrap();
        assert_eq!(settings.api_key, "abc");
        assert_eq!(settings.config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_require_gemini_rejects_blank_key() {
        let config = parse("[gemini]\napi_key = \"  \"\n");
        assert!(matches!(
            config.require_gemini().unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_validate_kroki_url_invalid_scheme() {
        let mut config = Config::default();
        config.diagrams_resolved.kroki_url = Some("kroki.io".to_owned());
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "Configuration error: diagrams.kroki_url must start with http:// or https://"
        );
    }

    #[test]
    fn test_validate_gemini_model_empty() {
        let mut config = Config::default();
        config.gemini.model = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::default();
        config.gemini.timeout_secs = 0;
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "Configuration error: gemini.timeout_secs must be greater than 0"
        );
    }

    #[test]
    fn test_load_from_explicit_path() {
        let file = write_config("[diagrams]\nkroki_url = \"https://kroki.io\"\n");
        let config = Config::load(Some(file.path()), None).unwrap();
        assert_eq!(
            config.diagrams_resolved.kroki_url.as_deref(),
            Some("https://kroki.io")
        );
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let file = write_config("[gemini]\nmodel = \"from-file\"\n");
        let settings = CliSettings {
            model: Some("from-cli".to_owned()),
            ..CliSettings::default()
        };
        let config = Config::load(Some(file.path()), Some(&settings)).unwrap();
        assert_eq!(config.gemini.model, "from-cli");
    }

    #[test]
    fn test_load_rejects_invalid_cli_kroki_url() {
        let file = write_config("");
        let settings = CliSettings {
            kroki_url: Some("ftp://kroki".to_owned()),
            ..CliSettings::default()
        };
        assert!(matches!(
            Config::load(Some(file.path()), Some(&settings)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_parse_error() {
        let file = write_config("[gemini\nmodel = 1");
        assert!(matches!(
            Config::load(Some(file.path()), None),
            Err(ConfigError::Parse(_))
        ));
    }
}
