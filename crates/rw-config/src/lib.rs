//! Configuration management for the RW sidebar.
//!
//! Parses `rw.toml` configuration files with serde and provides
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
//! - `sidebar.routes`
//! - `sidebar.external_link_prefix`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rw.toml";

/// Route file used when `sidebar.routes` is not set.
const DEFAULT_ROUTES_FILE: &str = "sidebar.yaml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override route file path.
    pub routes: Option<PathBuf>,
    /// Override force-expanded mode.
    pub force_expanded: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sidebar configuration.
    pub sidebar: SidebarConfig,

    /// Resolved route file path (set after loading).
    #[serde(skip)]
    pub routes_path: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Sidebar rendering configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SidebarConfig {
    /// Route file, relative to the config file directory.
    pub routes: String,
    /// Collapse transition length in milliseconds.
    pub collapse_duration_ms: u64,
    /// Extra time pointer input stays blocked after a transition.
    pub pointer_guard_margin_ms: u64,
    /// Paths with this prefix keep their raw href.
    pub external_link_prefix: String,
    /// Everything from the last occurrence of this is cut from a path.
    pub path_suffix_delimiter: String,
    /// Render every branch expanded, without arrows.
    pub force_expanded: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            routes: DEFAULT_ROUTES_FILE.to_owned(),
            collapse_duration_ms: 250,
            pointer_guard_margin_ms: 100,
            external_link_prefix: "https://".to_owned(),
            path_suffix_delimiter: ".".to_owned(),
            force_expanded: false,
        }
    }
}

impl SidebarConfig {
    /// Collapse transition length.
    #[must_use]
    pub fn collapse_duration(&self) -> Duration {
        Duration::from_millis(self.collapse_duration_ms)
    }

    /// Extra pointer-guard time after a transition.
    #[must_use]
    pub fn pointer_guard_margin(&self) -> Duration {
        Duration::from_millis(self.pointer_guard_margin_ms)
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
        /// Config field path (e.g., "`sidebar.routes`").
        field: String,
        /// Error message (e.g., "${`ROUTES_DIR`} not set").
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
    /// Otherwise, searches for `rw.toml` in current directory and parents.
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

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(routes) = &settings.routes {
            self.routes_path.clone_from(routes);
        }
        if let Some(force_expanded) = settings.force_expanded {
            self.sidebar.force_expanded = force_expanded;
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
            sidebar: SidebarConfig::default(),
            routes_path: base.join(DEFAULT_ROUTES_FILE),
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
        const MAX_COLLAPSE_DURATION_MS: u64 = 10_000;

        let sidebar = &self.sidebar;
        require_non_empty(&sidebar.routes, "sidebar.routes")?;
        require_non_empty(&sidebar.external_link_prefix, "sidebar.external_link_prefix")?;
        require_non_empty(&sidebar.path_suffix_delimiter, "sidebar.path_suffix_delimiter")?;

        if sidebar.collapse_duration_ms > MAX_COLLAPSE_DURATION_MS {
            return Err(ConfigError::Validation(format!(
                "sidebar.collapse_duration_ms cannot exceed {MAX_COLLAPSE_DURATION_MS}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let sidebar = &mut self.sidebar;
        sidebar.routes = expand::expand_env(&sidebar.routes, "sidebar.routes")?;
        sidebar.external_link_prefix =
            expand::expand_env(&sidebar.external_link_prefix, "sidebar.external_link_prefix")?;
        Ok(())
    }

    /// Resolve the route file against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.routes_path = config_dir.join(&self.sidebar.routes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.routes_path, PathBuf::from("/test/sidebar.yaml"));
        assert_eq!(config.sidebar.collapse_duration(), Duration::from_millis(250));
        assert_eq!(config.sidebar.pointer_guard_margin(), Duration::from_millis(100));
        assert_eq!(config.sidebar.external_link_prefix, "https://");
        assert_eq!(config.sidebar.path_suffix_delimiter, ".");
        assert!(!config.sidebar.force_expanded);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sidebar, SidebarConfig::default());
    }

    #[test]
    fn test_parse_sidebar_config() {
        let toml = r#"
[sidebar]
routes = "nav/routes.json"
collapse_duration_ms = 400
pointer_guard_margin_ms = 50
external_link_prefix = "http"
path_suffix_delimiter = "~"
force_expanded = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.sidebar,
            SidebarConfig {
                routes: "nav/routes.json".to_owned(),
                collapse_duration_ms: 400,
                pointer_guard_margin_ms: 50,
                external_link_prefix: "http".to_owned(),
                path_suffix_delimiter: "~".to_owned(),
                force_expanded: true,
            }
        );
    }

    #[test]
    fn test_partial_sidebar_section_keeps_defaults() {
        let toml = r"
[sidebar]
collapse_duration_ms = 0
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sidebar.collapse_duration_ms, 0);
        assert_eq!(config.sidebar.routes, "sidebar.yaml");
        assert_eq!(config.sidebar.pointer_guard_margin_ms, 100);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[sidebar]
routes = "nav/routes.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.routes_path, PathBuf::from("/project/nav/routes.yaml"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/project"));
        config.apply_cli_settings(&CliSettings {
            routes: Some(PathBuf::from("/other/routes.json")),
            force_expanded: Some(true),
        });
        assert_eq!(config.routes_path, PathBuf::from("/other/routes.json"));
        assert!(config.sidebar.force_expanded);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/project"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.routes_path, PathBuf::from("/project/sidebar.yaml"));
        assert!(!config.sidebar.force_expanded);
    }

    #[test]
    fn test_expand_env_vars_routes() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("RW_CONFIG_TEST_ROUTES", "generated");
        }
        let toml = r#"
[sidebar]
routes = "${RW_CONFIG_TEST_ROUTES}/sidebar.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        assert_eq!(config.sidebar.routes, "generated/sidebar.yaml");
        unsafe {
            std::env::remove_var("RW_CONFIG_TEST_ROUTES");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("RW_CONFIG_TEST_MISSING");
        }
        let toml = r#"
[sidebar]
external_link_prefix = "${RW_CONFIG_TEST_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("sidebar.external_link_prefix"));
    }

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_routes_empty() {
        let mut config = Config::default();
        config.sidebar.routes = String::new();
        assert_validation_error(&config, &["sidebar.routes", "empty"]);
    }

    #[test]
    fn test_validate_external_link_prefix_empty() {
        let mut config = Config::default();
        config.sidebar.external_link_prefix = String::new();
        assert_validation_error(&config, &["external_link_prefix", "empty"]);
    }

    #[test]
    fn test_validate_suffix_delimiter_empty() {
        let mut config = Config::default();
        config.sidebar.path_suffix_delimiter = String::new();
        assert_validation_error(&config, &["path_suffix_delimiter", "empty"]);
    }

    #[test]
    fn test_validate_collapse_duration_too_long() {
        let mut config = Config::default();
        config.sidebar.collapse_duration_ms = 10_001;
        assert_validation_error(&config, &["collapse_duration_ms", "10000"]);
    }

    #[test]
    fn test_validate_collapse_duration_at_limit() {
        let mut config = Config::default();
        config.sidebar.collapse_duration_ms = 10_000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let result = Config::load(Some(Path::new("/nonexistent/rw.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(
            &path,
            r#"
[sidebar]
routes = "nav.json"
collapse_duration_ms = 300
"#,
        )
        .unwrap();

        let settings = CliSettings {
            routes: None,
            force_expanded: Some(true),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.routes_path, dir.path().join("nav.json"));
        assert_eq!(config.sidebar.collapse_duration_ms, 300);
        assert!(config.sidebar.force_expanded);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[sidebar]\npath_suffix_delimiter = \"\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_from_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rw.toml");
        std::fs::write(&path, "[sidebar\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
