//! Tree row display model

use serde::Serialize;
use tabled::Tabled;

use crate::tree::{Expander, TreeRow};

/// One tree row flattened for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TreeRowDisplay {
    /// Name indented by depth
    #[tabled(rename = "ORGANIZATION")]
    pub name: String,

    #[tabled(rename = "ID")]
    pub id: i64,

    /// "yes" when the node is in the save set
    #[tabled(rename = "SELECTED")]
    pub selected: String,

    /// Children state: unloaded, collapsed, expanded, leaf
    #[tabled(rename = "CHILDREN")]
    pub children: String,
}

impl From<TreeRow> for TreeRowDisplay {
    fn from(row: TreeRow) -> Self {
        let children = match row.expander {
            Expander::Unloaded => "unloaded",
            Expander::Collapsed => "collapsed",
            Expander::Expanded => "expanded",
            Expander::Leaf => "leaf",
        };

        Self {
            name: format!("{}{}", "  ".repeat(row.depth), row.organization.org_name),
            id: row.organization.organization_id,
            selected: if row.checked { "yes" } else { "" }.to_string(),
            children: children.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::org;

    #[test]
    fn test_tree_row_display_indents_and_flags() {
        let display = TreeRowDisplay::from(TreeRow {
            depth: 2,
            organization: org(12, "Desk", "11"),
            checked: true,
            expander: Expander::Leaf,
        });

        assert_eq!(display.name, "    Desk");
        assert_eq!(display.id, 12);
        assert_eq!(display.selected, "yes");
        assert_eq!(display.children, "leaf");
    }
}
