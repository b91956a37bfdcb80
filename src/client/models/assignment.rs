//! Evaluation assignment models

use serde::{Deserialize, Serialize};

use super::OrgId;

/// Body of `POST /api/organizations/evaluate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationAssignment {
    /// Every organization placed under evaluation for the period
    pub organization_ids: Vec<OrgId>,

    /// Evaluation period the organizations are assigned to
    pub period_id: String,
}
