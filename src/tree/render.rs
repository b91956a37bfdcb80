//! Tree rows for display
//!
//! Rendering is a pure function of the store, the save set and the expanded
//! nodes. It never fetches: a node's children appear only once its level has
//! been listed and the node is expanded.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use super::OrgStore;
use crate::client::{OrgId, Organization, ParentKey};

/// Expansion affordance shown next to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Expander {
    /// Children never listed
    Unloaded,
    /// Listed, has children, not expanded
    Collapsed,
    /// Listed, has children, expanded
    Expanded,
    /// Listed, no children
    Leaf,
}

/// One visible line of the tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeRow {
    /// Nesting level, top level is 0
    pub depth: usize,
    pub organization: Organization,
    /// Member of the save set
    pub checked: bool,
    pub expander: Expander,
}

/// Flatten the visible tree in display order.
pub fn render_rows(
    store: &OrgStore,
    save_ids: &BTreeSet<OrgId>,
    expanded: &HashSet<OrgId>,
) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut on_path = HashSet::new();
    push_level(
        store,
        save_ids,
        expanded,
        &ParentKey::root(),
        0,
        &mut on_path,
        &mut rows,
    );
    rows
}

fn push_level(
    store: &OrgStore,
    save_ids: &BTreeSet<OrgId>,
    expanded: &HashSet<OrgId>,
    key: &ParentKey,
    depth: usize,
    on_path: &mut HashSet<OrgId>,
    rows: &mut Vec<TreeRow>,
) {
    for org in store.child_orgs(key) {
        let id = org.organization_id;
        let child_key = org.child_key();

        let expander = match store.children_of(&child_key) {
            None => Expander::Unloaded,
            Some([]) => Expander::Leaf,
            Some(_) if expanded.contains(&id) => Expander::Expanded,
            Some(_) => Expander::Collapsed,
        };

        rows.push(TreeRow {
            depth,
            organization: org.clone(),
            checked: save_ids.contains(&id),
            expander,
        });

        if expander == Expander::Expanded && on_path.insert(id) {
            push_level(store, save_ids, expanded, &child_key, depth + 1, on_path, rows);
            on_path.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::org;

    fn store() -> OrgStore {
        let mut store = OrgStore::new();
        store.insert_level(ParentKey::root(), vec![org(10, "A", "1"), org(20, "B", "1")]);
        store.insert_level(ParentKey::from(10), vec![org(11, "C", "10")]);
        store
    }

    #[test]
    fn test_collapsed_node_hides_children() {
        let rows = render_rows(&store(), &BTreeSet::new(), &HashSet::new());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].expander, Expander::Collapsed);
        assert_eq!(rows[1].expander, Expander::Unloaded);
    }

    #[test]
    fn test_expanded_node_shows_cached_children() {
        let rows = render_rows(&store(), &BTreeSet::new(), &HashSet::from([10]));

        let ids: Vec<OrgId> = rows.iter().map(|r| r.organization.organization_id).collect();
        assert_eq!(ids, vec![10, 11, 20]);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[0].expander, Expander::Expanded);
    }

    #[test]
    fn test_expanded_but_unfetched_node_renders_nothing_below() {
        let rows = render_rows(&store(), &BTreeSet::new(), &HashSet::from([20]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].expander, Expander::Unloaded);
    }

    #[test]
    fn test_checked_reflects_save_set() {
        let save = BTreeSet::from([10, 11]);
        let rows = render_rows(&store(), &save, &HashSet::from([10]));

        assert!(rows[0].checked);
        assert!(rows[1].checked);
        assert!(!rows[2].checked);
    }

    #[test]
    fn test_empty_level_is_leaf() {
        let mut store = store();
        store.insert_level(ParentKey::from(20), vec![]);

        let rows = render_rows(&store, &BTreeSet::new(), &HashSet::from([20]));
        assert_eq!(rows[1].expander, Expander::Leaf);
    }

    #[test]
    fn test_unfetched_root_renders_empty() {
        let rows = render_rows(&OrgStore::new(), &BTreeSet::new(), &HashSet::new());
        assert!(rows.is_empty());
    }
}
