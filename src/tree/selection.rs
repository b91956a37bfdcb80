//! Checked-node selection and the derived save set

use std::collections::{BTreeMap, BTreeSet};

use crate::client::{OrgId, Organization};

#[derive(Debug, Clone)]
struct Checked {
    org: Organization,
    /// Descendants collected when the node was checked, within budget
    descendants: BTreeSet<OrgId>,
}

/// Organizations the user explicitly checked.
///
/// This is the only authoritative selection state. Each entry keeps the
/// descendant closure collected when it was checked; the save set is the
/// union of those closures, so a budget-truncated check saves exactly what
/// it reported.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    checked: BTreeMap<OrgId, Checked>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an organization as checked with its collected descendants.
    ///
    /// Re-checking replaces the recorded closure. Returns `false` if the
    /// organization was already checked.
    pub fn check(&mut self, org: Organization, descendants: BTreeSet<OrgId>) -> bool {
        self.checked
            .insert(org.organization_id, Checked { org, descendants })
            .is_none()
    }

    /// Remove an organization, returning the descendants recorded for it
    pub fn uncheck(&mut self, id: OrgId) -> Option<BTreeSet<OrgId>> {
        self.checked.remove(&id).map(|c| c.descendants)
    }

    /// Checked organizations in ascending ID order (the "selected" panel)
    pub fn displayed(&self) -> impl Iterator<Item = &Organization> {
        self.checked.values().map(|c| &c.org)
    }

    /// Checked IDs unioned with their recorded descendants
    pub fn save_ids(&self) -> BTreeSet<OrgId> {
        let mut ids = BTreeSet::new();
        for (id, checked) in &self.checked {
            ids.insert(*id);
            ids.extend(checked.descendants.iter().copied());
        }
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.checked.clear();
    }
}
