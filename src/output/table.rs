//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{
        Alignment, Modify, Style,
        object::{Columns, Rows},
    },
};

/// Header of the organization ID column, right-aligned so IDs line up
const ID_HEADER: &str = "ID";

/// Format organization rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No organizations found.".to_string();
    }

    let mut table = Table::new(data);
    table.with(Style::rounded());
    if let Some(col) = T::headers().iter().position(|h| h.as_ref() == ID_HEADER) {
        table.with(Modify::new(Columns::one(col)).with(Alignment::right()));
    }
    table.with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
