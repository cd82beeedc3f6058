// ── Domain model ──
//
// Canonical nmsops types. Everything the console reads from the backend is
// converted into these before it reaches a consumer (CLI or tests).

pub mod address;
pub mod cidr;
pub mod credential;
pub mod device;

// ── Re-exports ──────────────────────────────────────────────────────

pub use address::DeviceAddress;
pub use cidr::CidrBlock;
pub use credential::{CredentialProfileDraft, CredentialProfileRef};
pub use device::Device;
