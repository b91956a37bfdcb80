//! Mock survey API client for testing
//!
//! Provides a mock implementation of [`OrganizationApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::OrganizationApi;
use super::models::{EvaluationAssignment, OrgId, Organization, ParentKey};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure the tree via builder methods, then hand it to the code under
/// test. Levels that were never configured list as empty (leaves).
///
/// # Example
/// ```ignore
/// let mock = MockOrganizationClient::new()
///     .with_children(ParentKey::root(), vec![org(10, "A"), org(20, "B")])
///     .await;
///
/// let level = mock.list_children(&ParentKey::root()).await?;
/// assert_eq!(level.len(), 2);
/// ```
#[derive(Default)]
pub struct MockOrganizationClient {
    /// Children to return per `upCode`
    children: Arc<Mutex<HashMap<ParentKey, Vec<Organization>>>>,
    /// Levels whose listing fails with a network error
    failing: Arc<Mutex<HashSet<ParentKey>>>,
    /// Error to return from the next assignment - consumed on first use
    assign_error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured assignment bodies for test assertions
    captured_assignments: Arc<Mutex<Vec<EvaluationAssignment>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_children: usize,
    pub assign_evaluation: usize,
    /// Listing calls per `upCode`
    pub per_key: HashMap<ParentKey, usize>,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_children + self.assign_evaluation
    }

    /// Number of listings issued for one level.
    pub fn fetches_of(&self, key: &ParentKey) -> usize {
        self.per_key.get(key).copied().unwrap_or(0)
    }
}

impl MockOrganizationClient {
    /// Create a new mock client with an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the children listed under one `upCode`.
    pub async fn with_children(self, key: ParentKey, orgs: Vec<Organization>) -> Self {
        self.children.lock().await.insert(key, orgs);
        self
    }

    /// Make listing of one `upCode` fail with a network error.
    pub async fn with_failing_key(self, key: ParentKey) -> Self {
        self.failing.lock().await.insert(key);
        self
    }

    /// Configure an error to return from the next assignment.
    /// The error is consumed after one use.
    pub async fn with_assign_error(self, error: ApiError) -> Self {
        *self.assign_error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured assignment bodies.
    pub async fn captured_assignments(&self) -> Vec<EvaluationAssignment> {
        self.captured_assignments.lock().await.clone()
    }
}

#[async_trait]
impl OrganizationApi for MockOrganizationClient {
    async fn list_children(&self, up_code: &ParentKey) -> Result<Vec<Organization>> {
        {
            let mut counts = self.call_count.lock().await;
            counts.list_children += 1;
            *counts.per_key.entry(up_code.clone()).or_insert(0) += 1;
        }

        if self.failing.lock().await.contains(up_code) {
            return Err(ApiError::Network(format!("simulated failure for {}", up_code)).into());
        }

        Ok(self
            .children
            .lock()
            .await
            .get(up_code)
            .cloned()
            .unwrap_or_default())
    }

    async fn assign_evaluation(&self, assignment: &EvaluationAssignment) -> Result<()> {
        {
            let mut counts = self.call_count.lock().await;
            counts.assign_evaluation += 1;
        }

        if let Some(e) = self.assign_error.lock().await.take() {
            return Err(e.into());
        }

        self.captured_assignments
            .lock()
            .await
            .push(assignment.clone());
        Ok(())
    }
}

/// Build an organization whose parent is `up_code`.
pub fn org(id: OrgId, name: &str, up_code: &str) -> Organization {
    Organization {
        organization_id: id,
        org_name: name.to_string(),
        full_name: format!("Org {}", name),
        oc_code: format!("OC{}", id),
        up_code: up_code.to_string(),
    }
}

/// The reference tree used across session tests:
///
/// ```text
/// root
/// ├── A (10)
/// │   └── C (11)
/// └── B (20)
/// ```
pub async fn sample_tree() -> MockOrganizationClient {
    MockOrganizationClient::new()
        .with_children(
            ParentKey::root(),
            vec![org(10, "A", "1"), org(20, "B", "1")],
        )
        .await
        .with_children(ParentKey::from(10), vec![org(11, "C", "10")])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_level_is_empty() {
        let mock = MockOrganizationClient::new();
        let level = mock.list_children(&ParentKey::from(99)).await.unwrap();
        assert!(level.is_empty());
        assert_eq!(mock.call_counts().await.fetches_of(&ParentKey::from(99)), 1);
    }

    #[tokio::test]
    async fn test_failing_key_errors() {
        let mock = MockOrganizationClient::new()
            .with_failing_key(ParentKey::from(5))
            .await;
        assert!(mock.list_children(&ParentKey::from(5)).await.is_err());
    }

    #[tokio::test]
    async fn test_assign_error_consumed_once() {
        let mock = MockOrganizationClient::new()
            .with_assign_error(ApiError::ServerError("down".into()))
            .await;
        let body = EvaluationAssignment {
            organization_ids: vec![1],
            period_id: "p".into(),
        };

        assert!(mock.assign_evaluation(&body).await.is_err());
        assert!(mock.assign_evaluation(&body).await.is_ok());
        assert_eq!(mock.captured_assignments().await.len(), 1);
        assert_eq!(mock.call_counts().await.total(), 2);
    }
}
