// Configuration loading and parsing (drafthub.toml).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::avatar::DEFAULT_IDENTICON_ENDPOINT;
use crate::model::UserProfile;
use crate::sample;

/// File name looked up in each config location.
pub const CONFIG_FILE_NAME: &str = "drafthub.toml";

/// The documented default configuration shipped with the crate.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../defaults/drafthub.toml");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("cannot determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub session: SessionConfig,
    #[serde(default = "sample::default_user")]
    pub user: UserProfile,
    pub avatar: AvatarConfig,
    pub invite: InviteConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ui: UiConfig::default(),
            session: SessionConfig::default(),
            user: sample::default_user(),
            avatar: AvatarConfig::default(),
            invite: InviteConfig::default(),
            data: DataConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Which tab the sign-in screen opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthTab {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_auth_tab: AuthTab,
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            default_auth_tab: AuthTab::Login,
            tick_rate_ms: 33,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub start_authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    pub endpoint: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        AvatarConfig {
            endpoint: DEFAULT_IDENTICON_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    pub share_base: String,
}

impl Default for InviteConfig {
    fn default() -> Self {
        InviteConfig {
            share_base: "https://draft-platform.example/join".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "drafthub_core=info,drafthub_app=info,drafthub_tui=info,warn".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate a specific config file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    parse_config(&text, path)
}

/// Candidate config files in lookup order: `config/drafthub.toml` under
/// `base_dir`, then the platform config directory.
pub fn config_search_paths(base_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![base_dir.join("config").join(CONFIG_FILE_NAME)];
    if let Some(dirs) = ProjectDirs::from("", "", "drafthub") {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
}

/// Load the first config file found from `base_dir`, or the defaults when
/// none exists.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    match config_search_paths(base_dir).into_iter().find(|p| p.is_file()) {
        Some(path) => {
            let config = load_config_from(&path)?;
            info!("Config loaded from {}", path.display());
            Ok(config)
        }
        None => {
            info!("No {} found; using built-in defaults", CONFIG_FILE_NAME);
            Ok(Config::default())
        }
    }
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(ConfigError::WorkingDir)?;
    load_config_in(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("https://") || s.starts_with("http://")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.ui.tick_rate_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "ui.tick_rate_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    let urls: &[(&str, &str)] = &[
        ("avatar.endpoint", &config.avatar.endpoint),
        ("invite.share_base", &config.invite.share_base),
    ];
    for (name, val) in urls {
        if !is_http_url(val) {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be an http(s) URL, got {val:?}"),
            });
        }
    }

    let user_fields: &[(&str, &str)] = &[("user.id", &config.user.id), ("user.name", &config.user.name)];
    for (name, val) in user_fields {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        parse_config(text, Path::new("test.toml"))
    }

    /// Fresh scratch directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("drafthub-config-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn shipped_defaults_match_builtin_defaults() {
        let config = parse(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = parse(
            r#"
            [ui]
            default_auth_tab = "signup"

            [data]
            seed_file = "data/seed.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.default_auth_tab, AuthTab::Signup);
        assert_eq!(config.ui.tick_rate_ms, 33);
        assert_eq!(config.data.seed_file, Some(PathBuf::from("data/seed.json")));
        assert_eq!(config.user.name, "Alex Johnson");
    }

    #[test]
    fn rejects_zero_tick_rate() {
        let err = parse("[ui]\ntick_rate_ms = 0\n").unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "ui.tick_rate_ms"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_http_avatar_endpoint() {
        let err = parse("[avatar]\nendpoint = \"ftp://x\"\n").unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "avatar.endpoint"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_user_name() {
        let err = parse("[user]\nid = \"u\"\nname = \" \"\nemail = \"u@example.com\"\n").unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "user.name"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let err = parse("[ui\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn unknown_auth_tab_is_parse_error() {
        let err = parse("[ui]\ndefault_auth_tab = \"register\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn file_not_found_for_missing_file() {
        let err = load_config_from(Path::new("/nonexistent/drafthub.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn working_dir_error_keeps_io_source() {
        use std::error::Error as _;
        let err = ConfigError::WorkingDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "cwd removed",
        ));
        assert_eq!(err.to_string(), "cannot determine working directory: cwd removed");
        assert!(err.source().is_some());
        assert!(!matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn load_in_prefers_project_config_dir() {
        let dir = scratch_dir("project");
        fs::create_dir_all(dir.join("config")).unwrap();
        fs::write(
            dir.join("config").join(CONFIG_FILE_NAME),
            "[session]\nstart_authenticated = true\n",
        )
        .unwrap();

        let config = load_config_in(&dir).unwrap();
        assert!(config.session.start_authenticated);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn search_paths_start_with_project_config() {
        let paths = config_search_paths(Path::new("/srv/app"));
        assert_eq!(paths[0], PathBuf::from("/srv/app/config/drafthub.toml"));
    }
}
