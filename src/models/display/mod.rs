//! Display model implementations for table and JSON output
//!
//! Display models transform API and tree types into CLI-friendly formats
//! with appropriate column names and serialization.

mod org;
mod tree;

pub use org::OrgDisplay;
pub use tree::TreeRowDisplay;
