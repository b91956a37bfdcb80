//! Lazily fetched organization tree
//!
//! - [`OrgStore`] - arena of fetched organizations plus the children index
//! - [`ensure_fetched`] - fail-soft listing of levels not yet listed
//! - [`collect_descendant_ids`] - budgeted descendant closure with on-demand fetches
//! - [`Selection`] - explicitly checked nodes and the derived save set
//! - [`render_rows`] - visible rows for the tree view

pub mod collect;
pub mod fetch;
pub mod render;
pub mod selection;
pub mod store;

pub use collect::{Closure, CollectBudget, collect_descendant_ids};
pub use fetch::ensure_fetched;
pub use render::{Expander, TreeRow, render_rows};
pub use selection::Selection;
pub use store::OrgStore;
