//! Descendant collection with on-demand fetching

use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use super::OrgStore;
use super::fetch::ensure_fetched;
use crate::client::{OrgId, OrganizationApi, ParentKey};

/// Bound on how far a single collection may explore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectBudget {
    /// Levels below the start node to collect (children are level 1)
    pub max_depth: usize,
    /// Descendant IDs to collect before stopping
    pub max_nodes: usize,
}

impl CollectBudget {
    pub fn new(max_depth: usize, max_nodes: usize) -> Self {
        Self {
            max_depth,
            max_nodes,
        }
    }
}

impl Default for CollectBudget {
    fn default() -> Self {
        Self::new(32, 10_000)
    }
}

/// Result of a descendant collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Closure {
    /// Every descendant ID found. The start node is never included, even
    /// when a cyclic `upCode` chain leads back to it.
    pub ids: BTreeSet<OrgId>,
    /// Exploration stopped at the budget; `ids` may be incomplete
    pub truncated: bool,
    /// Listing requests issued while collecting
    pub fetches: usize,
}

/// Collect every descendant of the level `start`, fetching unlisted levels.
///
/// Levels are fetched one at a time, each awaited before its children are
/// explored. An ID already collected is not explored again.
pub async fn collect_descendant_ids<A>(
    api: &A,
    store: &mut OrgStore,
    start: &ParentKey,
    budget: CollectBudget,
) -> Closure
where
    A: OrganizationApi + ?Sized,
{
    let start_id = start.as_str().parse::<OrgId>().ok().filter(|_| !start.is_root());
    let mut closure = Closure::default();
    let mut stack: Vec<(ParentKey, usize)> = vec![(start.clone(), 0)];

    'walk: while let Some((key, depth)) = stack.pop() {
        if ensure_fetched(api, store, &key).await {
            closure.fetches += 1;
        }

        let children = store.children_of(&key).unwrap_or(&[]).to_vec();
        let mut next = Vec::with_capacity(children.len());

        for child in children {
            if Some(child) == start_id || closure.ids.contains(&child) {
                continue;
            }
            if closure.ids.len() >= budget.max_nodes {
                closure.truncated = true;
                break 'walk;
            }
            closure.ids.insert(child);

            let child_key = ParentKey::from(child);
            if depth + 1 < budget.max_depth {
                next.push((child_key, depth + 1));
            } else if store.children_of(&child_key).is_none_or(|c| !c.is_empty()) {
                // Unlisted or non-empty level left unexplored
                closure.truncated = true;
            }
        }

        // Reverse so the first child is explored first
        stack.extend(next.into_iter().rev());
    }

    debug!(
        "Collected {} descendants under {} ({} fetches{})",
        closure.ids.len(),
        start,
        closure.fetches,
        if closure.truncated { ", truncated" } else { "" }
    );

    closure
}
