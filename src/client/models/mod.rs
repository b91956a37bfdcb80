//! Survey backend data models
//!
//! Wire types exchanged with the organization endpoints.

mod assignment;
mod org;

pub use assignment::EvaluationAssignment;
pub use org::{OrgId, Organization, ParentKey, ROOT_UP_CODE};
