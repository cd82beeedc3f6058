// ── Target set resolution ──
//
// Turns operator-typed discovery targets into a validated address set.
// Two input modes exist: a comma-separated list of dotted quads, or one
// CIDR block. The resolver is a small state machine: switching mode wipes
// the input, and every edit re-validates synchronously so a form can show
// the error next to the field as the operator types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::CoreError;
use crate::model::{CidrBlock, DeviceAddress};

// ── TargetMode ──────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetMode {
    #[default]
    List,
    Cidr,
}

// ── TargetSpec ──────────────────────────────────────────────────────

/// Raw target input, split but not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// Trimmed, non-empty tokens in input order.
    ExplicitList(Vec<String>),
    /// The trimmed block text.
    CidrBlock(String),
}

impl TargetSpec {
    pub fn from_input(mode: TargetMode, text: &str) -> Self {
        match mode {
            TargetMode::List => Self::ExplicitList(
                text.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            TargetMode::Cidr => Self::CidrBlock(text.trim().to_owned()),
        }
    }

    pub fn mode(&self) -> TargetMode {
        match self {
            Self::ExplicitList(_) => TargetMode::List,
            Self::CidrBlock(_) => TargetMode::Cidr,
        }
    }

    /// Validate every token.
    ///
    /// A list reports *all* failing tokens in one
    /// [`CoreError::InvalidAddressFormat`], in input order.
    pub fn resolve(&self) -> Result<ResolvedTargets, CoreError> {
        match self {
            Self::ExplicitList(tokens) => {
                let mut set = BTreeSet::new();
                let mut invalid = Vec::new();
                for token in tokens {
                    match DeviceAddress::parse(token) {
                        Ok(addr) => {
                            set.insert(addr);
                        }
                        Err(_) => invalid.push(token.clone()),
                    }
                }
                if invalid.is_empty() {
                    Ok(ResolvedTargets::Addresses(ResolvedTargetSet(set)))
                } else {
                    Err(CoreError::InvalidAddressFormat { tokens: invalid })
                }
            }
            Self::CidrBlock(text) => CidrBlock::parse(text).map(ResolvedTargets::Block),
        }
    }
}

// ── ResolvedTargetSet ───────────────────────────────────────────────

/// A deduplicated set of addresses, iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTargetSet(BTreeSet<DeviceAddress>);

impl ResolvedTargetSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, addr: DeviceAddress) -> bool {
        self.0.contains(&addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = DeviceAddress> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<DeviceAddress> {
        self.iter().collect()
    }
}

impl FromIterator<DeviceAddress> for ResolvedTargetSet {
    fn from_iter<I: IntoIterator<Item = DeviceAddress>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ResolvedTargetSet {
    type Item = DeviceAddress;
    type IntoIter = std::collections::btree_set::IntoIter<DeviceAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ResolvedTargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, addr) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{addr}")?;
        }
        Ok(())
    }
}

// ── ResolvedTargets ─────────────────────────────────────────────────

/// The outcome of a successful resolution. CIDR blocks stay compact
/// until explicitly expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTargets {
    Addresses(ResolvedTargetSet),
    Block(CidrBlock),
}

impl ResolvedTargets {
    pub fn is_cidr(&self) -> bool {
        matches!(self, Self::Block(_))
    }

    /// Number of distinct addresses covered.
    pub fn size(&self) -> u64 {
        match self {
            Self::Addresses(set) => u64::try_from(set.len()).unwrap_or(u64::MAX),
            Self::Block(block) => block.size(),
        }
    }

    pub fn contains(&self, addr: DeviceAddress) -> bool {
        match self {
            Self::Addresses(set) => set.contains(addr),
            Self::Block(block) => block.contains(addr),
        }
    }

    /// Materialize the targets, refusing blocks larger than `ceiling`.
    /// Explicit lists are already materialized and never refused.
    pub fn expand(&self, ceiling: u64) -> Result<ResolvedTargetSet, CoreError> {
        match self {
            Self::Addresses(set) => Ok(set.clone()),
            Self::Block(block) => Ok(block.expand(ceiling)?.into_iter().collect()),
        }
    }
}

impl fmt::Display for ResolvedTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addresses(set) => write!(f, "{set}"),
            Self::Block(block) => write!(f, "{block}"),
        }
    }
}

// ── TargetSetResolver ───────────────────────────────────────────────

/// Input state for a target field.
///
/// The error reflects the current text only. A pristine field (just
/// created or just switched) carries no error even in CIDR mode, where
/// empty text would not resolve.
#[derive(Debug, Clone, Default)]
pub struct TargetSetResolver {
    mode: TargetMode,
    text: String,
    error: Option<CoreError>,
}

impl TargetSetResolver {
    pub fn new(mode: TargetMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Seed a resolver with existing text, validating it immediately.
    pub fn with_text(mode: TargetMode, text: impl Into<String>) -> Self {
        let mut resolver = Self::new(mode);
        resolver.edit(text);
        resolver
    }

    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Switch input mode. A real switch clears the text and any error;
    /// selecting the current mode again is a no-op.
    pub fn set_mode(&mut self, mode: TargetMode) {
        if mode != self.mode {
            self.mode = mode;
            self.text.clear();
            self.error = None;
        }
    }

    /// Replace the text and re-validate.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.error = self.spec().resolve().err();
    }

    /// The validation error for the current text, if any.
    pub fn error(&self) -> Option<&CoreError> {
        self.error.as_ref()
    }

    pub fn spec(&self) -> TargetSpec {
        TargetSpec::from_input(self.mode, &self.text)
    }

    pub fn resolve(&self) -> Result<ResolvedTargets, CoreError> {
        self.spec().resolve()
    }
}
