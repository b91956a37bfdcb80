//! Arena of fetched organizations with a lazily populated children index

use std::collections::HashMap;

use crate::client::{OrgId, Organization, ParentKey};

/// Every organization fetched so far, plus which levels have been listed.
///
/// A level is "fetched" once its key is present in the children index, even
/// if the listing came back empty or failed. Entries are never invalidated
/// for the lifetime of the store.
#[derive(Debug, Default, Clone)]
pub struct OrgStore {
    nodes: HashMap<OrgId, Organization>,
    children: HashMap<ParentKey, Vec<OrgId>>,
}

impl OrgStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the level under `key` has been listed
    pub fn is_fetched(&self, key: &ParentKey) -> bool {
        self.children.contains_key(key)
    }

    /// Record the listing of one level, in server order.
    ///
    /// Re-recording a level replaces its child list.
    pub fn insert_level(&mut self, key: ParentKey, orgs: Vec<Organization>) {
        let ids = orgs.iter().map(|o| o.organization_id).collect();
        for org in orgs {
            self.nodes.insert(org.organization_id, org);
        }
        self.children.insert(key, ids);
    }

    /// Child IDs of a level, or `None` if it has not been fetched
    pub fn children_of(&self, key: &ParentKey) -> Option<&[OrgId]> {
        self.children.get(key).map(Vec::as_slice)
    }

    /// Child organizations of a level in server order (empty if unfetched)
    pub fn child_orgs<'a>(&'a self, key: &ParentKey) -> impl Iterator<Item = &'a Organization> + 'a {
        self.children_of(key)
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.nodes.get(id))
    }

    pub fn get(&self, id: OrgId) -> Option<&Organization> {
        self.nodes.get(&id)
    }

    /// Number of organizations known
    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels listed
    #[cfg(test)]
    pub fn level_count(&self) -> usize {
        self.children.len()
    }

    /// Drop everything
    #[cfg(test)]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.children.clear();
    }
}
