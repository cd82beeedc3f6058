//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use nmsops_config::ConfigError;
use nmsops_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(nmsops::connection_failed),
        help(
            "Check that the backend is running and accessible.\n\
             Reason: {reason}\n\
             Try: nmsops devices list --server <url>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(nmsops::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(nmsops::not_found),
        help("Run: nmsops {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(nmsops::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nmsops::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(nmsops::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: nmsops config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(nmsops::no_config),
        help(
            "Create a profile with: nmsops config init\n\
             Or pass --server <url> (NMSOPS_SERVER).\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(nmsops::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(nmsops::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::ApiError { .. } | Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

/// The input field an operator error refers to, if it is one.
fn input_field(err: &CoreError) -> Option<&'static str> {
    match err {
        CoreError::InvalidAddressFormat { .. }
        | CoreError::InvalidCidrFormat { .. }
        | CoreError::TargetSetTooLarge { .. } => Some("targets"),
        CoreError::EmptyCredentialAssociation | CoreError::DuplicateCredentialProfile { .. } => {
            Some("credentials")
        }
        CoreError::InvalidPort { .. } => Some("port"),
        CoreError::InvalidTimeWindow { .. } => Some("duration"),
        CoreError::EmptyProvisioningSelection => Some("devices"),
        CoreError::ValidationFailed { .. } => Some("input"),
        _ => None,
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if let Some(field) = input_field(&err) {
            return CliError::Validation {
                field: field.into(),
                reason: err.to_string(),
            };
        }

        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound { identifier } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier,
                list_command: "--help".into(),
            },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "unknown".into(), |s| s.to_string()),
                message,
            },

            CoreError::MalformedTelemetryResponse { reason } => CliError::ApiError {
                code: "malformed".into(),
                message: reason,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "server".into(),
                reason: message,
            },

            other => CliError::ApiError {
                code: "internal".into(),
                message: other.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_exit_with_usage() {
        for err in [
            CoreError::InvalidAddressFormat {
                tokens: vec!["x".into()],
            },
            CoreError::TargetSetTooLarge {
                size: 65_536,
                ceiling: 4096,
            },
            CoreError::EmptyCredentialAssociation,
            CoreError::EmptyProvisioningSelection,
        ] {
            assert_eq!(CliError::from(err).exit_code(), exit_code::USAGE);
        }
    }

    #[test]
    fn transport_errors_keep_their_exit_codes() {
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(CoreError::ConnectionFailed {
                url: "http://nms".into(),
                reason: "refused".into(),
            })
            .exit_code(),
            exit_code::CONNECTION
        );
        assert_eq!(
            CliError::from(CoreError::NotFound {
                identifier: "devices/9".into(),
            })
            .exit_code(),
            exit_code::NOT_FOUND
        );
        assert_eq!(
            CliError::from(CoreError::Api {
                message: "boom".into(),
                status: Some(500),
            })
            .exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn credential_field_is_named() {
        match CliError::from(CoreError::DuplicateCredentialProfile { id: 3 }) {
            CliError::Validation { field, .. } => assert_eq!(field, "credentials"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
