// ── Credential profile types ──

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A credential profile as known to the console.
///
/// Discovery profiles reference these by `id` only; the console never
/// holds the password of an existing profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialProfileRef {
    pub id: i64,
    pub hostname: String,
    pub port: u16,
}

/// A validated create/update payload for a credential profile.
#[derive(Debug, Clone)]
pub struct CredentialProfileDraft {
    pub hostname: String,
    pub password: SecretString,
    pub port: u16,
}

impl CredentialProfileDraft {
    /// Validate raw form input.
    ///
    /// Hostname and password must be non-empty; `port` is the text the
    /// operator typed and must be an integer in `0..=65535`. The backend
    /// re-validates; this only catches obvious mistakes early.
    pub fn new(
        hostname: &str,
        password: SecretString,
        port: &str,
    ) -> Result<Self, CoreError> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "hostname must not be empty".into(),
            });
        }
        if password.expose_secret().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "password must not be empty".into(),
            });
        }

        Ok(Self {
            hostname: hostname.to_owned(),
            password,
            port: parse_port(port)?,
        })
    }
}

/// Parse a port number typed by the operator.
pub fn parse_port(text: &str) -> Result<u16, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidPort {
            input: text.to_owned(),
        });
    }
    trimmed.parse().map_err(|_| CoreError::InvalidPort {
        input: text.to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn accepts_valid_draft() {
        let draft = CredentialProfileDraft::new(" admin ", secret("pw"), "22").unwrap();
        assert_eq!(draft.hostname, "admin");
        assert_eq!(draft.port, 22);
    }

    #[test]
    fn port_bounds() {
        assert_eq!(parse_port("0").unwrap(), 0);
        assert_eq!(parse_port("65535").unwrap(), 65535);
        for bad in ["65536", "-1", "22.5", "ssh", "", "+22"] {
            assert!(
                matches!(parse_port(bad), Err(CoreError::InvalidPort { .. })),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_empty_fields() {
        assert!(matches!(
            CredentialProfileDraft::new("  ", secret("pw"), "22"),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert!(matches!(
            CredentialProfileDraft::new("admin", secret(""), "22"),
            Err(CoreError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let draft = CredentialProfileDraft::new("admin", secret("hunter2"), "22").unwrap();
        assert!(!format!("{draft:?}").contains("hunter2"));
    }
}
