// ── Discovery profiles ──
//
// A discovery profile pairs a target set with the credential profiles the
// backend should try against it. `DiscoveryDraft` is the editable form:
// a target resolver plus the credential association, checked as a whole
// on submit.

use serde::Serialize;

use crate::error::CoreError;
use crate::target::{ResolvedTargets, TargetMode, TargetSetResolver};

/// A discovery profile as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryProfile {
    pub id: i64,
    pub targets: ResolvedTargets,
    pub credential_profile_ids: Vec<i64>,
    /// Whether the profile was entered as a CIDR block.
    pub is_cidr: bool,
}

/// A validated discovery submission. `id` is set when updating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySubmission {
    pub id: Option<i64>,
    pub targets: ResolvedTargets,
    pub credential_profile_ids: Vec<i64>,
}

// ── DiscoveryDraft ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DiscoveryDraft {
    editing: Option<i64>,
    targets: TargetSetResolver,
    credential_ids: Vec<i64>,
}

impl DiscoveryDraft {
    /// A blank draft for a new profile, in list mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft for editing `profile`.
    ///
    /// Stored address lists are seeded as list text joined by `", "`.
    /// Backends list block profiles as addresses too, so those come back
    /// in list mode; a profile still holding a block reopens in CIDR mode.
    pub fn for_edit(profile: &DiscoveryProfile) -> Self {
        let (mode, text) = match &profile.targets {
            ResolvedTargets::Addresses(set) => (TargetMode::List, set.to_string()),
            ResolvedTargets::Block(block) => (TargetMode::Cidr, block.to_string()),
        };
        Self {
            editing: Some(profile.id),
            targets: TargetSetResolver::with_text(mode, text),
            credential_ids: profile.credential_profile_ids.clone(),
        }
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn targets(&self) -> &TargetSetResolver {
        &self.targets
    }

    pub fn set_mode(&mut self, mode: TargetMode) {
        self.targets.set_mode(mode);
    }

    pub fn edit_targets(&mut self, text: impl Into<String>) {
        self.targets.edit(text);
    }

    pub fn credential_ids(&self) -> &[i64] {
        &self.credential_ids
    }

    /// Replace the credential association as-is. Duplicates are kept so
    /// that `submit` can report them.
    pub fn set_credentials(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.credential_ids = ids.into_iter().collect();
    }

    /// Add or remove one credential profile.
    pub fn toggle_credential(&mut self, id: i64) {
        if let Some(pos) = self.credential_ids.iter().position(|&c| c == id) {
            self.credential_ids.remove(pos);
        } else {
            self.credential_ids.push(id);
        }
    }

    /// Whether a submit button should be enabled: no target error and at
    /// least one credential profile.
    pub fn can_submit(&self) -> bool {
        self.targets.error().is_none() && !self.credential_ids.is_empty()
    }

    /// Validate the whole draft.
    ///
    /// The credential association is checked before the targets, so an
    /// empty association is reported whatever the target text holds.
    pub fn submit(&self) -> Result<DiscoverySubmission, CoreError> {
        if self.credential_ids.is_empty() {
            return Err(CoreError::EmptyCredentialAssociation);
        }
        for (i, id) in self.credential_ids.iter().enumerate() {
            if self.credential_ids[..i].contains(id) {
                return Err(CoreError::DuplicateCredentialProfile { id: *id });
            }
        }

        let targets = self.targets.resolve()?;
        if targets.size() == 0 {
            return Err(CoreError::ValidationFailed {
                message: "at least one target address is required".into(),
            });
        }

        Ok(DiscoverySubmission {
            id: self.editing,
            targets,
            credential_profile_ids: self.credential_ids.clone(),
        })
    }
}

/// Summary row for listings.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryProfileSummary {
    pub id: i64,
    pub targets: String,
    pub target_count: u64,
    pub credential_profile_ids: Vec<i64>,
    pub is_cidr: bool,
}

impl From<&DiscoveryProfile> for DiscoveryProfileSummary {
    fn from(p: &DiscoveryProfile) -> Self {
        Self {
            id: p.id,
            targets: p.targets.to_string(),
            target_count: p.targets.size(),
            credential_profile_ids: p.credential_profile_ids.clone(),
            is_cidr: p.is_cidr,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{CidrBlock, DeviceAddress};
    use crate::target::ResolvedTargetSet;

    fn addr(s: &str) -> DeviceAddress {
        DeviceAddress::parse(s).unwrap()
    }

    #[test]
    fn empty_credentials_rejected_regardless_of_targets() {
        for (mode, text) in [
            (TargetMode::List, "10.0.0.1"),
            (TargetMode::List, "not an ip"),
            (TargetMode::Cidr, "10.0.0.0/8"),
            (TargetMode::Cidr, ""),
        ] {
            let mut draft = DiscoveryDraft::new();
            draft.set_mode(mode);
            draft.edit_targets(text);
            assert_eq!(
                draft.submit().unwrap_err(),
                CoreError::EmptyCredentialAssociation,
                "{mode} {text:?}"
            );
            assert!(!draft.can_submit());
        }
    }

    #[test]
    fn duplicate_credentials_rejected() {
        let mut draft = DiscoveryDraft::new();
        draft.edit_targets("10.0.0.1");
        draft.set_credentials([1, 2, 1]);
        assert_eq!(
            draft.submit().unwrap_err(),
            CoreError::DuplicateCredentialProfile { id: 1 }
        );
    }

    #[test]
    fn toggle_credential_adds_and_removes() {
        let mut draft = DiscoveryDraft::new();
        draft.toggle_credential(4);
        draft.toggle_credential(5);
        draft.toggle_credential(4);
        assert_eq!(draft.credential_ids(), &[5]);
    }

    #[test]
    fn target_error_blocks_submit() {
        let mut draft = DiscoveryDraft::new();
        draft.toggle_credential(1);
        draft.edit_targets("10.0.0.1, 999.1.1.1");
        assert!(!draft.can_submit());
        assert_eq!(
            draft.submit().unwrap_err(),
            CoreError::InvalidAddressFormat {
                tokens: vec!["999.1.1.1".into()]
            }
        );
    }

    #[test]
    fn empty_target_list_rejected() {
        let mut draft = DiscoveryDraft::new();
        draft.toggle_credential(1);
        assert!(matches!(
            draft.submit(),
            Err(CoreError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn cidr_submission_keeps_block() {
        let mut draft = DiscoveryDraft::new();
        draft.set_mode(TargetMode::Cidr);
        draft.edit_targets("192.168.1.0/24");
        draft.toggle_credential(3);
        assert!(draft.can_submit());

        let submission = draft.submit().unwrap();
        assert_eq!(submission.id, None);
        assert_eq!(
            submission.targets,
            ResolvedTargets::Block(CidrBlock::parse("192.168.1.0/24").unwrap())
        );
        assert_eq!(submission.credential_profile_ids, vec![3]);
    }

    #[test]
    fn edit_seeds_list_text() {
        let profile = DiscoveryProfile {
            id: 9,
            targets: ResolvedTargets::Addresses(
                [addr("10.0.0.2"), addr("10.0.0.1")]
                    .into_iter()
                    .collect::<ResolvedTargetSet>(),
            ),
            credential_profile_ids: vec![1, 2],
            is_cidr: false,
        };
        let draft = DiscoveryDraft::for_edit(&profile);
        assert_eq!(draft.editing(), Some(9));
        assert_eq!(draft.targets().mode(), TargetMode::List);
        assert_eq!(draft.targets().text(), "10.0.0.1, 10.0.0.2");
        assert_eq!(draft.submit().unwrap().id, Some(9));
    }
}
