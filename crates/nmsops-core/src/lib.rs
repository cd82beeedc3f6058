//! Domain model and console services between `nmsops-api` and the CLI.
//!
//! - **[`Console`]**: async facade over the backend. Lists and converts
//!   devices and profiles, submits drafts and selections, and fetches the
//!   paired disk/CPU telemetry for a device concurrently.
//!
//! - **Targets** ([`target`]): the [`TargetSetResolver`] state machine that
//!   validates comma-separated address lists and CIDR blocks as the operator
//!   types, and bounded CIDR expansion.
//!
//! - **Telemetry** ([`telemetry`]): the pure query builder (injected clock,
//!   interval lookup) and the normalizer that folds both counter-store
//!   response shapes into ascending millisecond samples.
//!
//! - **Domain model** ([`model`]): [`DeviceAddress`] (the IPv4 codec),
//!   [`CidrBlock`], [`Device`], and credential profile types.
//!
//! Everything except [`Console`] is synchronous and free of I/O.

pub mod config;
pub mod console;
pub mod convert;
pub mod discovery;
pub mod error;
pub mod model;
pub mod provisioning;
pub mod target;
pub mod telemetry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, DEFAULT_EXPANSION_CEILING, TlsVerification};
pub use console::{Console, DeviceTelemetry};
pub use discovery::{DiscoveryDraft, DiscoveryProfile, DiscoveryProfileSummary, DiscoverySubmission};
pub use error::CoreError;
pub use provisioning::ProvisioningSelection;
pub use target::{ResolvedTargetSet, ResolvedTargets, TargetMode, TargetSetResolver, TargetSpec};
pub use telemetry::{
    AggregationMode, CounterId, DurationPreset, NormalizedSeries, TelemetrySample, TimeWindow,
};

pub use model::{CidrBlock, CredentialProfileDraft, CredentialProfileRef, Device, DeviceAddress};
