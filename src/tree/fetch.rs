//! Fail-soft level fetching

use log::{debug, warn};

use super::OrgStore;
use crate::client::{OrganizationApi, ParentKey};

/// List one level and record it in the store.
///
/// On any failure the level is recorded as empty, so a subtree that fails to
/// load simply appears childless. Errors are logged, never returned.
/// Returns the number of children recorded.
pub async fn fetch_children<A>(api: &A, store: &mut OrgStore, key: &ParentKey) -> usize
where
    A: OrganizationApi + ?Sized,
{
    match api.list_children(key).await {
        Ok(orgs) => {
            debug!("Fetched {} organizations under upCode={}", orgs.len(), key);
            let count = orgs.len();
            store.insert_level(key.clone(), orgs);
            count
        }
        Err(e) => {
            warn!("Error fetching organizations under upCode={}: {}", key, e);
            store.insert_level(key.clone(), Vec::new());
            0
        }
    }
}

/// Fetch a level only if it has not been listed yet.
///
/// Returns `true` if a request was issued.
pub async fn ensure_fetched<A>(api: &A, store: &mut OrgStore, key: &ParentKey) -> bool
where
    A: OrganizationApi + ?Sized,
{
    if store.is_fetched(key) {
        debug!("Cache hit: upCode={}", key);
        return false;
    }
    fetch_children(api, store, key).await;
    true
}
