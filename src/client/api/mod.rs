//! API trait definitions
//!
//! The survey backend surface used by this tool is a single trait,
//! [`OrganizationApi`], covering the tree listing and the assignment save.

mod organization;

pub use organization::OrganizationApi;
