//! Indented text rendering of tree rows

use colored::Colorize;

use crate::tree::{Expander, TreeRow};

/// Render rows as an indented checkbox tree.
///
/// ```text
/// ▾ [x] A (10)
///     · [x] C (11)
/// ▸ [ ] B (20)
/// ```
pub fn format_tree(rows: &[TreeRow]) -> String {
    if rows.is_empty() {
        return "No organizations loaded.".to_string();
    }

    rows.iter()
        .map(format_row)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row(row: &TreeRow) -> String {
    let indent = "    ".repeat(row.depth);
    let glyph = match row.expander {
        Expander::Unloaded | Expander::Collapsed => "▸",
        Expander::Expanded => "▾",
        Expander::Leaf => "·",
    };
    let checkbox = if row.checked {
        "[x]".green().to_string()
    } else {
        "[ ]".dimmed().to_string()
    };
    let org = &row.organization;

    format!(
        "{}{} {} {} ({})",
        indent, glyph, checkbox, org.org_name, org.organization_id
    )
}
