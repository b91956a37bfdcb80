//! Organization API trait

use async_trait::async_trait;

use crate::client::models::{EvaluationAssignment, Organization, ParentKey};
use crate::error::Result;

/// Organization tree and evaluation assignment operations
#[async_trait]
pub trait OrganizationApi: Send + Sync {
    /// List the direct children of one tree level.
    ///
    /// `up_code` is the root sentinel `"1"` for the top level, otherwise the
    /// string form of the parent's organization ID. Children are returned in
    /// server order.
    async fn list_children(&self, up_code: &ParentKey) -> Result<Vec<Organization>>;

    /// Assign a set of organizations to an evaluation period.
    ///
    /// Success is judged by HTTP status alone; the response body is ignored.
    async fn assign_evaluation(&self, assignment: &EvaluationAssignment) -> Result<()>;
}
