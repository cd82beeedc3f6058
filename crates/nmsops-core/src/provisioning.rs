// ── Provisioning selection ──
//
// Which devices the operator has ticked for a bulk provisioning update.
// The tracker only holds the set; whether the device table is in "update
// mode" is the caller's concern.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::model::DeviceAddress;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisioningSelection {
    selected: BTreeSet<DeviceAddress>,
}

impl ProvisioningSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one device. Returns `true` if it is selected afterwards.
    pub fn toggle(&mut self, addr: DeviceAddress) -> bool {
        if self.selected.remove(&addr) {
            false
        } else {
            self.selected.insert(addr);
            true
        }
    }

    /// Replace the selection with exactly `devices`.
    pub fn select_all(&mut self, devices: impl IntoIterator<Item = DeviceAddress>) {
        self.selected = devices.into_iter().collect();
    }

    /// Header-checkbox behavior: clear when everything in `devices` is
    /// already selected, otherwise select all of it.
    pub fn toggle_all(&mut self, devices: &[DeviceAddress]) {
        if self.is_all_selected(devices.len()) {
            self.clear();
        } else {
            self.select_all(devices.iter().copied());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, addr: DeviceAddress) -> bool {
        self.selected.contains(&addr)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DeviceAddress> + '_ {
        self.selected.iter().copied()
    }

    /// Every one of `total` devices is selected. An empty table is never
    /// "all selected".
    pub fn is_all_selected(&self, total: usize) -> bool {
        total > 0 && self.selected.len() == total
    }

    /// Some, but not all, of `total` devices are selected.
    pub fn is_partially_selected(&self, total: usize) -> bool {
        !self.selected.is_empty() && self.selected.len() < total
    }

    /// The addresses to submit, ascending. Fails on an empty selection.
    pub fn request(&self) -> Result<Vec<DeviceAddress>, CoreError> {
        if self.selected.is_empty() {
            return Err(CoreError::EmptyProvisioningSelection);
        }
        Ok(self.iter().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn devices() -> Vec<DeviceAddress> {
        ["10.0.0.1", "10.0.0.2", "10.0.0.3"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect()
    }

    #[test]
    fn starts_empty() {
        let sel = ProvisioningSelection::new();
        assert!(sel.is_empty());
        assert!(!sel.is_all_selected(3));
        assert!(!sel.is_partially_selected(3));
    }

    #[test]
    fn toggle_flips_membership() {
        let all = devices();
        let mut sel = ProvisioningSelection::new();
        assert!(sel.toggle(all[0]));
        assert!(sel.contains(all[0]));
        assert!(!sel.toggle(all[0]));
        assert!(!sel.contains(all[0]));
    }

    #[test]
    fn select_all_then_toggle_one_is_partial() {
        let all = devices();
        let mut sel = ProvisioningSelection::new();
        sel.select_all(all.iter().copied());
        assert!(sel.is_all_selected(all.len()));
        assert!(!sel.is_partially_selected(all.len()));

        sel.toggle(all[1]);
        assert!(sel.is_partially_selected(all.len()));
        assert!(!sel.is_all_selected(all.len()));
    }

    #[test]
    fn select_all_replaces_prior_selection() {
        let all = devices();
        let stray: DeviceAddress = "10.9.9.9".parse().unwrap();
        let mut sel = ProvisioningSelection::new();
        sel.toggle(stray);

        sel.select_all(all[..2].iter().copied());
        assert!(!sel.contains(stray));
        assert_eq!(sel.request().unwrap(), vec![all[0], all[1]]);
        assert!(sel.is_all_selected(2));
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let all = devices();
        let mut sel = ProvisioningSelection::new();
        sel.toggle(all[2]);

        sel.toggle_all(&all);
        assert_eq!(sel.len(), 3);

        sel.toggle_all(&all);
        assert!(sel.is_empty());
    }

    #[test]
    fn empty_table_is_never_all_selected() {
        let mut sel = ProvisioningSelection::new();
        assert!(!sel.is_all_selected(0));
        sel.toggle_all(&[]);
        assert!(sel.is_empty());
    }

    #[test]
    fn request_requires_selection() {
        let all = devices();
        let mut sel = ProvisioningSelection::new();
        assert_eq!(sel.request().unwrap_err(), CoreError::EmptyProvisioningSelection);

        sel.toggle(all[2]);
        sel.toggle(all[0]);
        assert_eq!(sel.request().unwrap(), vec![all[0], all[2]]);
    }
}
