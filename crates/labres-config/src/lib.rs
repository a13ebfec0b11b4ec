//! Shared configuration for the labres CLI and TUI.
//!
//! TOML profiles layered under `LABRES_` environment overrides, and
//! translation to `labres_core::ServiceConfig`. Both binaries depend on
//! this crate; the CLI adds flag-aware wrappers on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use labres_core::{DEFAULT_SERVICE_URL, ServiceConfig, TlsVerification};

/// Name of the profile used when none is configured.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    UnknownProfile { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named service profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// The file `config init` writes: defaults plus one local profile.
    pub fn starter() -> Self {
        let mut config = Self::default();
        config
            .profiles
            .insert(DEFAULT_PROFILE.into(), Profile::local());
        config
    }

    /// Pick a profile by explicit name, else `default_profile`.
    ///
    /// The `default` profile always resolves, falling back to the local
    /// service when it is not written down.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE);

        match self.profiles.get(name) {
            Some(profile) => Ok((name.to_owned(), profile.clone())),
            None if name == DEFAULT_PROFILE => Ok((name.to_owned(), Profile::local())),
            None => Err(ConfigError::UnknownProfile {
                name: name.to_owned(),
                available: self.profile_names(),
            }),
        }
    }

    fn profile_names(&self) -> String {
        if self.profiles.is_empty() {
            return "none".into();
        }
        self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named reservation service profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL including the API prefix (e.g., "http://localhost:8080/api").
    pub service_url: String,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Profile {
    /// The local development service.
    pub fn local() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "labres", "labres").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("labres");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (missing file is fine) + `LABRES_` environment.
///
/// Nested keys use a double underscore: `LABRES_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LABRES_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ServiceConfig` from a profile, filling gaps from `defaults`.
pub fn profile_to_service_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ServiceConfig, ConfigError> {
    let base_url: url::Url =
        profile
            .service_url
            .parse()
            .map_err(|e: url::ParseError| ConfigError::Validation {
                field: "service_url".into(),
                reason: format!("invalid URL '{}': {e}", profile.service_url),
            })?;

    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "service_url".into(),
            reason: format!("unsupported scheme '{}'", base_url.scheme()),
        });
    }

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ServiceConfig {
        base_url,
        timeout,
        tls,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.default_profile.as_deref(), Some(DEFAULT_PROFILE));
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.defaults.timeout, 30);

        let (name, profile) = config.resolve_profile(None).unwrap();
        assert_eq!(name, DEFAULT_PROFILE);
        assert_eq!(profile.service_url, DEFAULT_SERVICE_URL);
    }

    #[test]
    fn file_profiles_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "campus"

[defaults]
output = "json"
timeout = 10

[profiles.campus]
service_url = "https://labs.example.edu/api"
timeout = 5
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.defaults.output, "json");

        let (name, profile) = config.resolve_profile(None).unwrap();
        assert_eq!(name, "campus");

        let service = profile_to_service_config(&profile, &config.defaults).unwrap();
        assert_eq!(service.base_url.as_str(), "https://labs.example.edu/api");
        assert_eq!(service.timeout, Duration::from_secs(5));
        assert_eq!(service.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn unknown_profile_lists_available() {
        let config = Config::starter();
        let err = config.resolve_profile(Some("lab-b")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "profile 'lab-b' not found (available: default)"
        );
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::starter();
        config.profiles.insert(
            "staging".into(),
            Profile {
                service_url: "https://staging.example.edu/api".into(),
                ca_cert: Some(PathBuf::from("/etc/ssl/lab-ca.pem")),
                insecure: None,
                timeout: Some(12),
            },
        );
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles, config.profiles);
    }

    #[test]
    fn tls_mode_follows_profile() {
        let defaults = Defaults::default();
        let mut profile = Profile::local();

        profile.ca_cert = Some(PathBuf::from("ca.pem"));
        assert_eq!(
            profile_to_service_config(&profile, &defaults).unwrap().tls,
            TlsVerification::CustomCa(PathBuf::from("ca.pem"))
        );

        profile.insecure = Some(true);
        assert_eq!(
            profile_to_service_config(&profile, &defaults).unwrap().tls,
            TlsVerification::DangerAcceptInvalid
        );
    }

    #[test]
    fn invalid_service_url_is_rejected() {
        let defaults = Defaults::default();
        let mut profile = Profile::local();

        profile.service_url = "not a url".into();
        assert!(matches!(
            profile_to_service_config(&profile, &defaults),
            Err(ConfigError::Validation { .. })
        ));

        profile.service_url = "ftp://labs.example.edu/api".into();
        assert!(matches!(
            profile_to_service_config(&profile, &defaults),
            Err(ConfigError::Validation { .. })
        ));
    }
}
