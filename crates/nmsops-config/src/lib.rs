//! Shared configuration for nmsops tools.
//!
//! TOML profiles with environment overrides, and translation to
//! `nmsops_core::ConsoleConfig`. The CLI layers its flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nmsops_core::{ConsoleConfig, CounterId, DEFAULT_EXPANSION_CEILING, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

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

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }

    /// The profile name to use: explicit choice, then `default_profile`,
    /// then `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_expansion_ceiling")]
    pub expansion_ceiling: u64,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            expansion_ceiling: default_expansion_ceiling(),
            insecure: false,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_expansion_ceiling() -> u64 {
    DEFAULT_EXPANSION_CEILING
}

/// A named backend profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:8080").
    pub server: String,

    /// Override request timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Override the CIDR expansion ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion_ceiling: Option<u64>,

    /// Override insecure TLS setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Counter id charted as disk usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_counter: Option<u16>,

    /// Counter id charted as CPU usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_counter: Option<u16>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "nmsops", "nmsops").map_or_else(
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
    p.push("nmsops");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file is not an error.
///
/// Environment overrides use the `NMSOPS_` prefix with `__` as the
/// nesting separator, e.g. `NMSOPS_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NMSOPS_").split("__"));

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

/// Build a `ConsoleConfig` from a profile and the global defaults.
pub fn profile_to_console_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ConsoleConfig, ConfigError> {
    let server: url::Url = profile
        .server
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", profile.server),
        })?;

    if !matches!(server.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "server".into(),
            reason: format!("unsupported scheme '{}', expected http or https", server.scheme()),
        });
    }

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = ConsoleConfig::new(server);
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.expansion_ceiling = profile
        .expansion_ceiling
        .unwrap_or(defaults.expansion_ceiling);
    if let Some(id) = profile.disk_counter {
        config.disk_counter = CounterId(id);
    }
    if let Some(id) = profile.cpu_counter {
        config.cpu_counter = CounterId(id);
    }
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_config() -> Config {
        let mut profiles = HashMap::new();
        profiles.insert(
            "lab".to_owned(),
            Profile {
                server: "http://10.0.0.2:8080".into(),
                timeout: Some(5),
                expansion_ceiling: Some(1024),
                cpu_counter: Some(9),
                ..Profile::default()
            },
        );
        Config {
            default_profile: Some("lab".into()),
            defaults: Defaults::default(),
            profiles,
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = sample_config();
        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.defaults.expansion_ceiling, 4096);
        assert_eq!(loaded.defaults.output, "table");
        assert!(loaded.profiles.is_empty());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[profiles.default]\nserver = \"http://localhost:8080\"\n",
        )
        .unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.active_profile_name(None), "default");
        assert_eq!(
            loaded.profile("default").unwrap().server,
            "http://localhost:8080"
        );
        assert_eq!(loaded.defaults.timeout, 30);
    }

    #[test]
    fn profile_overrides_defaults() {
        let cfg = sample_config();
        let console = profile_to_console_config(cfg.profile("lab").unwrap(), &cfg.defaults).unwrap();

        assert_eq!(console.server.as_str(), "http://10.0.0.2:8080/");
        assert_eq!(console.timeout, Duration::from_secs(5));
        assert_eq!(console.expansion_ceiling, 1024);
        assert_eq!(console.disk_counter, CounterId::DISK_USAGE);
        assert_eq!(console.cpu_counter, CounterId(9));
        assert_eq!(console.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let profile = Profile {
            server: "https://nms.example".into(),
            insecure: Some(true),
            ca_cert: Some("/tmp/ca.pem".into()),
            ..Profile::default()
        };
        let console = profile_to_console_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(console.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn rejects_bad_server() {
        for server in ["not a url", "ftp://nms.example"] {
            let profile = Profile {
                server: server.into(),
                ..Profile::default()
            };
            assert!(matches!(
                profile_to_console_config(&profile, &Defaults::default()),
                Err(ConfigError::Validation { .. })
            ));
        }
    }

    #[test]
    fn unknown_profile() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.profile("nope"),
            Err(ConfigError::UnknownProfile { .. })
        ));
        assert_eq!(cfg.active_profile_name(Some("x")), "x");
    }
}
