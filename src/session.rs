//! Assignment session
//!
//! One [`AssignmentSession`] holds everything a user builds up while picking
//! organizations for an evaluation period: the fetched tree, the checked
//! nodes and which nodes are expanded. Every mutation takes `&mut self`, so
//! toggles and saves are applied one at a time in call order.

use std::collections::{BTreeSet, HashSet, VecDeque};

use log::{debug, error, info};
use serde::Serialize;

use crate::client::{EvaluationAssignment, OrgId, Organization, OrganizationApi, ParentKey};
use crate::tree::{
    Closure, CollectBudget, OrgStore, Selection, TreeRow, collect_descendant_ids, ensure_fetched,
    render_rows,
};

/// Result of [`AssignmentSession::save`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The assignment was accepted
    Saved { organization_ids: Vec<OrgId> },
    /// Nothing is selected; no request was sent
    NothingSelected,
    /// The request failed; selection state is unchanged
    Failed { message: String },
}

/// Session-scoped organization picker bound to one evaluation period.
pub struct AssignmentSession<A> {
    api: A,
    period_id: String,
    budget: CollectBudget,
    store: OrgStore,
    selection: Selection,
    expanded: HashSet<OrgId>,
}

impl<A: OrganizationApi> AssignmentSession<A> {
    /// Create an empty session with the default collect budget
    pub fn new(api: A, period_id: impl Into<String>) -> Self {
        Self::with_budget(api, period_id, CollectBudget::default())
    }

    pub fn with_budget(api: A, period_id: impl Into<String>, budget: CollectBudget) -> Self {
        Self {
            api,
            period_id: period_id.into(),
            budget,
            store: OrgStore::new(),
            selection: Selection::new(),
            expanded: HashSet::new(),
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &OrgStore {
        &self.store
    }

    // ========================================================================
    // Tree
    // ========================================================================

    /// List the top level if it has not been listed yet.
    ///
    /// Returns the number of top-level organizations.
    pub async fn load_root(&mut self) -> usize {
        let root = ParentKey::root();
        ensure_fetched(&self.api, &mut self.store, &root).await;
        self.store.children_of(&root).map_or(0, <[OrgId]>::len)
    }

    /// Expand a node, listing its children first if needed.
    ///
    /// Returns the number of children now visible under the node.
    pub async fn expand(&mut self, id: OrgId) -> usize {
        let key = ParentKey::from(id);
        ensure_fetched(&self.api, &mut self.store, &key).await;
        self.expanded.insert(id);
        self.store.children_of(&key).map_or(0, <[OrgId]>::len)
    }

    pub fn collapse(&mut self, id: OrgId) {
        self.expanded.remove(&id);
    }

    pub fn is_expanded(&self, id: OrgId) -> bool {
        self.expanded.contains(&id)
    }

    /// Fetch and expand the whole forest, within the collect budget.
    pub async fn expand_all(&mut self) -> Closure {
        let closure = collect_descendant_ids(
            &self.api,
            &mut self.store,
            &ParentKey::root(),
            self.budget,
        )
        .await;
        self.expanded.extend(closure.ids.iter().copied());
        closure
    }

    /// Descendant closure of a node, fetching unlisted levels on the way.
    pub async fn collect_descendant_ids(&mut self, id: OrgId) -> Closure {
        collect_descendant_ids(
            &self.api,
            &mut self.store,
            &ParentKey::from(id),
            self.budget,
        )
        .await
    }

    /// Find an organization by ID, walking the tree breadth-first from the
    /// top level and fetching levels as needed.
    ///
    /// Stops after visiting the budget's node count.
    pub async fn locate(&mut self, id: OrgId) -> Option<Organization> {
        if let Some(org) = self.store.get(id) {
            return Some(org.clone());
        }

        let mut queue = VecDeque::from([ParentKey::root()]);
        let mut visited = HashSet::new();

        while let Some(key) = queue.pop_front() {
            ensure_fetched(&self.api, &mut self.store, &key).await;

            for &child in self.store.children_of(&key).unwrap_or(&[]) {
                if child == id {
                    return self.store.get(id).cloned();
                }
                if visited.len() >= self.budget.max_nodes {
                    debug!("Gave up locating {} after {} nodes", id, visited.len());
                    return None;
                }
                if visited.insert(child) {
                    queue.push_back(ParentKey::from(child));
                }
            }
        }

        None
    }

    /// Locate an organization and expand every ancestor so it is visible.
    ///
    /// Ancestors are followed through `upCode` as far as the cache knows
    /// them. Returns the organization if it was found.
    pub async fn reveal(&mut self, id: OrgId) -> Option<Organization> {
        let org = self.locate(id).await?;

        let mut up_code = org.up_code.clone();
        let mut seen = HashSet::from([id]);
        while let Ok(parent) = up_code.parse::<OrgId>() {
            if ParentKey::from(parent).is_root() || !seen.insert(parent) {
                break;
            }
            let Some(parent_org) = self.store.get(parent) else {
                break;
            };
            up_code = parent_org.up_code.clone();
            self.expanded.insert(parent);
        }

        Some(org)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Check or uncheck an organization.
    ///
    /// Checking fetches the node's whole subtree (within budget) so its
    /// descendants join the save set. Unchecking never fetches.
    /// Either way the descendants recorded for the node are returned.
    pub async fn handle_select(&mut self, org: &Organization, checked: bool) -> Closure {
        if checked {
            self.check(org).await
        } else {
            self.uncheck(org.organization_id)
        }
    }

    pub async fn check(&mut self, org: &Organization) -> Closure {
        let closure = self.collect_descendant_ids(org.organization_id).await;
        self.selection.check(org.clone(), closure.ids.clone());
        debug!(
            "Checked {} with {} descendants{}",
            org.organization_id,
            closure.ids.len(),
            if closure.truncated { " (truncated)" } else { "" }
        );
        closure
    }

    /// Uncheck a node. The returned closure is the one recorded at check
    /// time; it is empty if the node was not checked.
    pub fn uncheck(&mut self, id: OrgId) -> Closure {
        Closure {
            ids: self.selection.uncheck(id).unwrap_or_default(),
            ..Closure::default()
        }
    }

    /// Organizations the user checked directly, in ascending ID order
    pub fn display_selection(&self) -> Vec<&Organization> {
        self.selection.displayed().collect()
    }

    /// IDs that would be submitted: checked nodes plus the descendants
    /// collected for them
    pub fn save_selection(&self) -> BTreeSet<OrgId> {
        self.selection.save_ids()
    }

    /// Visible tree rows
    pub fn rows(&self) -> Vec<TreeRow> {
        render_rows(&self.store, &self.save_selection(), &self.expanded)
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Whether [`save`](Self::save) would send a request
    pub fn can_save(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Submit the save set for the session's evaluation period.
    ///
    /// Takes `&mut self` so no toggle or second save can run while the
    /// request is in flight. Failures are logged and reported in the outcome;
    /// selection state is never modified, so the caller may simply retry.
    pub async fn save(&mut self) -> SaveOutcome {
        let ids: Vec<OrgId> = self.save_selection().into_iter().collect();
        if ids.is_empty() {
            return SaveOutcome::NothingSelected;
        }

        let body = EvaluationAssignment {
            organization_ids: ids,
            period_id: self.period_id.clone(),
        };

        match self.api.assign_evaluation(&body).await {
            Ok(()) => {
                let names: Vec<&str> = self
                    .selection
                    .displayed()
                    .map(|o| o.full_name.as_str())
                    .collect();
                info!("Displayed organizations: {:?}", names);
                info!("Saved organization IDs: {:?}", body.organization_ids);
                debug!("Assignment payload: {:?}", body);
                SaveOutcome::Saved {
                    organization_ids: body.organization_ids,
                }
            }
            Err(e) => {
                error!("Error saving evaluations: {}", e);
                SaveOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Return the session to its freshly created state.
    #[cfg(test)]
    pub fn reset(&mut self) {
        self.store.clear();
        self.selection.clear();
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{org, sample_tree, MockOrganizationClient};
    use crate::error::ApiError;
    use crate::tree::Expander;

    async fn session() -> AssignmentSession<MockOrganizationClient> {
        let mut session = AssignmentSession::new(sample_tree().await, "2024-H1");
        session.load_root().await;
        session
    }

    fn a() -> Organization {
        org(10, "A", "1")
    }

    fn b() -> Organization {
        org(20, "B", "1")
    }

    fn display_ids<A: OrganizationApi>(s: &AssignmentSession<A>) -> Vec<OrgId> {
        s.display_selection()
            .iter()
            .map(|o| o.organization_id)
            .collect()
    }

    #[tokio::test]
    async fn test_check_scenario() {
        let mut s = session().await;

        s.handle_select(&a(), true).await;
        assert_eq!(s.save_selection(), BTreeSet::from([10, 11]));
        assert_eq!(display_ids(&s), vec![10]);

        s.handle_select(&b(), true).await;
        assert_eq!(s.save_selection(), BTreeSet::from([10, 11, 20]));

        s.handle_select(&a(), false).await;
        assert_eq!(s.save_selection(), BTreeSet::from([20]));
        assert_eq!(display_ids(&s), vec![20]);
        assert_eq!(s.display_selection()[0].org_name, "B");
    }

    #[tokio::test]
    async fn test_check_then_uncheck_restores_state() {
        let mut s = session().await;
        s.check(&b()).await;
        let before_save = s.save_selection();
        let before_display = display_ids(&s);

        s.handle_select(&a(), true).await;
        s.handle_select(&a(), false).await;

        assert_eq!(s.save_selection(), before_save);
        assert_eq!(display_ids(&s), before_display);
    }

    /// Every descendant reachable through listed levels
    fn listed_descendants(store: &OrgStore, id: OrgId) -> BTreeSet<OrgId> {
        let mut found = BTreeSet::new();
        let mut stack = vec![ParentKey::from(id)];
        while let Some(key) = stack.pop() {
            for &child in store.children_of(&key).unwrap_or(&[]) {
                if found.insert(child) {
                    stack.push(ParentKey::from(child));
                }
            }
        }
        found
    }

    #[tokio::test]
    async fn test_descendant_closure_invariant() {
        let mut s = session().await;
        s.check(&a()).await;
        s.check(&b()).await;

        let save = s.save_selection();
        for id in s.display_selection().iter().map(|o| o.organization_id) {
            assert!(save.contains(&id));
            assert!(listed_descendants(s.store(), id).is_subset(&save));
        }
    }

    #[tokio::test]
    async fn test_truncated_check_saves_only_collected_descendants() {
        let api = MockOrganizationClient::new()
            .with_children(ParentKey::root(), vec![a()])
            .await
            .with_children(
                ParentKey::from(10),
                (11..=14).map(|id| org(id, "child", "10")).collect(),
            )
            .await;
        let mut s = AssignmentSession::with_budget(api, "2024-H1", CollectBudget::new(32, 2));
        s.load_root().await;

        let closure = s.check(&a()).await;

        assert!(closure.truncated);
        assert_eq!(closure.ids, BTreeSet::from([11, 12]));
        assert_eq!(s.save_selection(), BTreeSet::from([10, 11, 12]));
        assert_eq!(
            s.save().await,
            SaveOutcome::Saved {
                organization_ids: vec![10, 11, 12]
            }
        );
    }

    #[tokio::test]
    async fn test_uncheck_returns_recorded_closure_without_fetching() {
        let mut s = session().await;
        s.check(&a()).await;
        let calls_before = s.api().call_counts().await.total();

        let closure = s.handle_select(&a(), false).await;

        assert_eq!(closure.ids, BTreeSet::from([11]));
        assert_eq!(s.api().call_counts().await.total(), calls_before);
    }

    #[tokio::test]
    async fn test_auto_included_descendant_renders_checked() {
        let mut s = session().await;
        s.check(&a()).await;
        s.expand(10).await;

        let rows = s.rows();
        let c = rows
            .iter()
            .find(|r| r.organization.organization_id == 11)
            .unwrap();
        assert!(c.checked);
        assert!(s.save_selection().contains(&11));
        assert!(!s.save_selection().contains(&20));
    }

    #[tokio::test]
    async fn test_failed_fetch_renders_as_leaf() {
        let api = MockOrganizationClient::new()
            .with_children(ParentKey::root(), vec![org(5, "five", "1")])
            .await
            .with_failing_key(ParentKey::from(5))
            .await;
        let mut s = AssignmentSession::new(api, "p");
        s.load_root().await;

        let visible = s.expand(5).await;

        assert_eq!(visible, 0);
        assert_eq!(s.store().children_of(&ParentKey::from(5)), Some(&[][..]));
        let rows = s.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expander, Expander::Leaf);
    }

    #[tokio::test]
    async fn test_expand_reuses_cache() {
        let mut s = session().await;
        s.expand(10).await;
        s.collapse(10);
        s.expand(10).await;

        assert!(s.is_expanded(10));
        assert_eq!(s.api().call_counts().await.fetches_of(&ParentKey::from(10)), 1);
    }

    #[tokio::test]
    async fn test_save_with_empty_selection_sends_nothing() {
        let mut s = session().await;
        assert!(!s.can_save());

        let outcome = s.save().await;

        assert_eq!(outcome, SaveOutcome::NothingSelected);
        assert_eq!(s.api().call_counts().await.assign_evaluation, 0);
    }

    #[tokio::test]
    async fn test_save_posts_sorted_ids_and_period() {
        let mut s = session().await;
        s.check(&b()).await;
        s.check(&a()).await;

        let outcome = s.save().await;

        assert_eq!(
            outcome,
            SaveOutcome::Saved {
                organization_ids: vec![10, 11, 20]
            }
        );
        let sent = s.api().captured_assignments().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].organization_ids, vec![10, 11, 20]);
        assert_eq!(sent[0].period_id, "2024-H1");
    }

    #[tokio::test]
    async fn test_save_failure_leaves_selection_unchanged() {
        let api = sample_tree()
            .await
            .with_assign_error(ApiError::ServerError("down".into()))
            .await;
        let mut s = AssignmentSession::new(api, "2024-H1");
        s.load_root().await;
        s.check(&a()).await;
        let save_before = s.save_selection();
        let display_before = display_ids(&s);

        let outcome = s.save().await;

        assert!(matches!(outcome, SaveOutcome::Failed { .. }));
        assert_eq!(s.save_selection(), save_before);
        assert_eq!(display_ids(&s), display_before);

        // Manual retry goes through
        assert!(matches!(s.save().await, SaveOutcome::Saved { .. }));
    }

    #[tokio::test]
    async fn test_locate_walks_levels() {
        let mut s = AssignmentSession::new(sample_tree().await, "p");

        let found = s.locate(11).await.unwrap();
        assert_eq!(found.org_name, "C");
        assert!(s.locate(999).await.is_none());
    }

    #[tokio::test]
    async fn test_locate_respects_node_budget() {
        let mut s =
            AssignmentSession::with_budget(sample_tree().await, "p", CollectBudget::new(32, 1));
        assert!(s.locate(11).await.is_none());
        assert!(s.locate(20).await.is_some());
    }

    #[tokio::test]
    async fn test_reveal_expands_ancestors() {
        let api = sample_tree()
            .await
            .with_children(ParentKey::from(11), vec![org(12, "D", "11")])
            .await;
        let mut s = AssignmentSession::new(api, "p");

        let found = s.reveal(12).await.unwrap();

        assert_eq!(found.org_name, "D");
        assert!(s.is_expanded(10));
        assert!(s.is_expanded(11));
        let ids: Vec<OrgId> = s
            .rows()
            .iter()
            .map(|r| r.organization.organization_id)
            .collect();
        assert_eq!(ids, vec![10, 11, 12, 20]);
    }

    #[tokio::test]
    async fn test_expand_all() {
        let mut s = AssignmentSession::new(sample_tree().await, "p");

        let closure = s.expand_all().await;

        assert_eq!(closure.ids, BTreeSet::from([10, 11, 20]));
        assert_eq!(s.rows().len(), 3);
    }

    #[tokio::test]
    async fn test_reset_empties_session() {
        let mut s = session().await;
        s.check(&a()).await;
        s.expand(10).await;

        s.reset();

        assert!(s.save_selection().is_empty());
        assert!(s.display_selection().is_empty());
        assert!(!s.is_expanded(10));
        assert_eq!(s.store().node_count(), 0);
        assert!(s.rows().is_empty());
    }
}
