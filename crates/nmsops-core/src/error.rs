// ── Core error types ──
//
// User-facing errors from nmsops-core. Target and telemetry validation
// failures are first-class variants so callers can render field-level
// diagnostics. The `From<nmsops_api::Error>` impl translates transport
// failures into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Target errors ────────────────────────────────────────────────
    /// One or more address tokens failed to parse. Every failing token is
    /// listed, in input order.
    #[error("Invalid IP address format: {}", tokens.join(", "))]
    InvalidAddressFormat { tokens: Vec<String> },

    #[error("Invalid CIDR format: {input:?} (expected a.b.c.d/n with n in 0..=32)")]
    InvalidCidrFormat { input: String },

    #[error("Target set of {size} addresses exceeds the expansion ceiling of {ceiling}")]
    TargetSetTooLarge { size: u64, ceiling: u64 },

    // ── Profile errors ───────────────────────────────────────────────
    #[error("At least one credential profile must be selected")]
    EmptyCredentialAssociation,

    #[error("Credential profile {id} is selected more than once")]
    DuplicateCredentialProfile { id: i64 },

    #[error("Invalid port {input:?}: must be an integer between 0 and 65535")]
    InvalidPort { input: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Telemetry errors ─────────────────────────────────────────────
    #[error("Invalid time window: from ({from}) must be before to ({to})")]
    InvalidTimeWindow { from: i64, to: i64 },

    /// Never fatal: the normalizer returns an empty series alongside it.
    #[error("Malformed telemetry response: {reason}")]
    MalformedTelemetryResponse { reason: String },

    // ── Provisioning errors ──────────────────────────────────────────
    #[error("No devices selected for provisioning")]
    EmptyProvisioningSelection,

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Backend errors (wrapped, not exposed raw) ────────────────────
    #[error("Not found: {identifier}")]
    NotFound { identifier: String },

    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for errors caused by operator input rather than
    /// the backend or transport.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddressFormat { .. }
                | Self::InvalidCidrFormat { .. }
                | Self::TargetSetTooLarge { .. }
                | Self::EmptyCredentialAssociation
                | Self::DuplicateCredentialProfile { .. }
                | Self::InvalidPort { .. }
                | Self::ValidationFailed { .. }
                | Self::InvalidTimeWindow { .. }
                | Self::EmptyProvisioningSelection
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<nmsops_api::Error> for CoreError {
    fn from(err: nmsops_api::Error) -> Self {
        match err {
            nmsops_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else if e.status().map(|s| s.as_u16()) == Some(404) {
                    CoreError::NotFound {
                        identifier: e.url().map(|u| u.path().to_string()).unwrap_or_default(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            nmsops_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            nmsops_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            nmsops_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                identifier: message,
            },
            nmsops_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            nmsops_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_lists_every_token() {
        let err = CoreError::InvalidAddressFormat {
            tokens: vec!["999.1.1.1".into(), "abc".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid IP address format: 999.1.1.1, abc"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn api_404_becomes_not_found() {
        let err: CoreError = nmsops_api::Error::Api {
            status: 404,
            message: "no such profile".into(),
        }
        .into();
        assert_eq!(
            err,
            CoreError::NotFound {
                identifier: "no such profile".into()
            }
        );
    }

    #[test]
    fn api_500_keeps_status() {
        let err: CoreError = nmsops_api::Error::Api {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
        assert!(!err.is_validation());
    }
}
