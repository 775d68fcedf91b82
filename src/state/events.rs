//! Store actions: the named, serialisable intents every mutation goes through

use crate::data::datatable::{Record, RowId};
use serde::{Deserialize, Serialize};

/// Mutations understood by the table store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum StoreAction {
    /// Replace the whole row list (imports, committed cell edits)
    SetRows(Vec<Record>),

    /// Remove one row; no-op when the id is unknown
    DeleteRow(RowId),

    /// Append a column to all three column lists; blanks and duplicates are ignored
    AddColumn(String),

    /// Show a hidden column or hide a visible one
    ToggleColumnVisibility(String),

    SetColumnOrder(Vec<String>),

    SetSearch(String),
}

impl StoreAction {
    /// Stable action name for logs and the action history
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::SetRows(_) => "table/setRows",
            StoreAction::DeleteRow(_) => "table/deleteRow",
            StoreAction::AddColumn(_) => "table/addColumn",
            StoreAction::ToggleColumnVisibility(_) => "table/toggleColumnVisibility",
            StoreAction::SetColumnOrder(_) => "table/setColumnOrder",
            StoreAction::SetSearch(_) => "table/setSearch",
        }
    }

    /// Whether applying this action can change the row list
    pub fn touches_rows(&self) -> bool {
        matches!(self, StoreAction::SetRows(_) | StoreAction::DeleteRow(_))
    }

    /// Short description suitable for a log line (row payloads are summarised)
    pub fn summary(&self) -> String {
        match self {
            StoreAction::SetRows(rows) => format!("{} ({} rows)", self.name(), rows.len()),
            StoreAction::DeleteRow(id) => format!("{} ({})", self.name(), id),
            StoreAction::AddColumn(name) | StoreAction::ToggleColumnVisibility(name) => {
                format!("{} ({})", self.name(), name)
            }
            StoreAction::SetColumnOrder(order) => {
                format!("{} ({})", self.name(), order.join(","))
            }
            StoreAction::SetSearch(text) => format!("{} ({:?})", self.name(), text),
        }
    }
}
