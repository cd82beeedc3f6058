// ── Runtime console configuration ──
//
// Describes *how* to reach a backend and the tuning knobs the core needs.
// Never touches disk: nmsops-config (or a test) builds a `ConsoleConfig`
// and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::telemetry::CounterId;

/// Default upper bound on addresses materialized from one CIDR block.
pub const DEFAULT_EXPANSION_CEILING: u64 = 4096;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend URL (e.g., `http://localhost:8080`). `/api` is appended
    /// by the client when missing.
    pub server: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Upper bound for [`CidrBlock::expand`](crate::model::CidrBlock::expand).
    pub expansion_ceiling: u64,
    /// Counter charted as disk usage.
    pub disk_counter: CounterId,
    /// Counter charted as CPU usage.
    pub cpu_counter: CounterId,
}

impl ConsoleConfig {
    pub fn new(server: Url) -> Self {
        Self {
            server,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            expansion_ceiling: DEFAULT_EXPANSION_CEILING,
            disk_counter: CounterId::DISK_USAGE,
            cpu_counter: CounterId::CPU_USAGE,
        }
    }

    pub(crate) fn transport(&self) -> nmsops_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => nmsops_api::TlsMode::System,
            TlsVerification::CustomCa(path) => nmsops_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => nmsops_api::TlsMode::DangerAcceptInvalid,
        };
        nmsops_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
