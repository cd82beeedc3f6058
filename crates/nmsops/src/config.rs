//! CLI-side profile resolution.
//!
//! Re-exports the shared config crate and layers the global flags
//! (`--profile`, `--server`, `--timeout`, `--insecure`) on top of it.

pub use nmsops_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

use nmsops_core::ConsoleConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Pick the active profile and apply flag overrides.
///
/// With no matching profile, `--server` alone is enough to build one.
/// An explicitly requested profile that does not exist is an error.
pub fn effective_profile(global: &GlobalOpts, config: &Config) -> Result<Profile, CliError> {
    let name = active_profile_name(global, config);

    let mut profile = match (config.profiles.get(&name), &global.server) {
        (Some(profile), _) => profile.clone(),
        (None, Some(server)) => Profile {
            server: server.clone(),
            ..Profile::default()
        },
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    Ok(profile)
}

/// Translate the effective profile into a `ConsoleConfig`.
///
/// This is the single boundary where CLI config types cross into core types.
pub fn resolve_console_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ConsoleConfig, CliError> {
    let profile = effective_profile(global, config)?;
    Ok(nmsops_config::profile_to_console_config(
        &profile,
        &config.defaults,
    )?)
}

/// Expansion ceiling for offline commands: active profile, then defaults.
pub fn expansion_ceiling(global: &GlobalOpts, config: &Config) -> u64 {
    let name = active_profile_name(global, config);
    config
        .profiles
        .get(&name)
        .and_then(|p| p.expansion_ceiling)
        .unwrap_or(config.defaults.expansion_ceiling)
}

pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use nmsops_core::TlsVerification;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["nmsops"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["devices", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_lab() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                server: "http://10.0.0.2:8080".into(),
                timeout: Some(5),
                expansion_ceiling: Some(512),
                ..Profile::default()
            },
        );
        cfg.default_profile = Some("lab".into());
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_lab();
        let console = resolve_console_config(
            &global(&["--server", "https://nms.example", "--timeout", "9", "-k"]),
            &cfg,
        )
        .unwrap();

        assert_eq!(console.server.as_str(), "https://nms.example/");
        assert_eq!(console.timeout, Duration::from_secs(9));
        assert_eq!(console.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(console.expansion_ceiling, 512);
    }

    #[test]
    fn server_flag_without_profile() {
        let console =
            resolve_console_config(&global(&["--server", "http://localhost:8080"]), &Config::default())
                .unwrap();
        assert_eq!(console.timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_backend_is_reported() {
        let err = resolve_console_config(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));

        let err = resolve_console_config(&global(&["--profile", "prod"]), &config_with_lab())
            .unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "prod");
                assert_eq!(available, "lab");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ceiling_falls_back_to_defaults() {
        assert_eq!(expansion_ceiling(&global(&[]), &config_with_lab()), 512);
        assert_eq!(expansion_ceiling(&global(&[]), &Config::default()), 4096);
    }
}
