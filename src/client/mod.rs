//! Survey backend API client

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod survey;

pub use api::OrganizationApi;
pub use models::{EvaluationAssignment, OrgId, Organization, ParentKey, ROOT_UP_CODE};
pub use survey::SurveyClient;
