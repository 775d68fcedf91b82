use crate::data::datatable::{Record, RowId};
use crate::data::seed::{default_columns, seed_records};
use crate::state::events::StoreAction;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Authoritative table data: the records plus the column set.
///
/// This is exactly what gets persisted, field names included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub rows: Vec<Record>,

    /// Every known column, insertion ordered, no duplicates
    pub columns: Vec<String>,

    /// Subset of `columns`; may be ordered differently
    pub visible_columns: Vec<String>,

    /// Display order as last written to the store. Column drags in the grid
    /// do not write here.
    pub column_order: Vec<String>,

    #[serde(default)]
    pub search: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl TableState {
    /// Initial state: the built-in sample records with all columns visible
    pub fn seeded() -> Self {
        Self::with_rows(seed_records(), default_columns())
    }

    pub fn with_rows(rows: Vec<Record>, columns: Vec<String>) -> Self {
        Self {
            rows,
            visible_columns: columns.clone(),
            column_order: columns.clone(),
            columns,
            search: String::new(),
        }
    }

    pub fn row(&self, id: &RowId) -> Option<&Record> {
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        self.visible_columns.iter().any(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Reducer: apply an action in place. Returns whether anything changed.
    pub fn apply(&mut self, action: &StoreAction) -> bool {
        match action {
            StoreAction::SetRows(rows) => {
                self.rows = rows.clone();
                true
            }
            StoreAction::DeleteRow(id) => {
                let before = self.rows.len();
                self.rows.retain(|row| &row.id != id);
                self.rows.len() != before
            }
            StoreAction::AddColumn(name) => {
                let column = name.trim();
                if column.is_empty() || self.has_column(column) {
                    debug!(target: "store", "Ignoring column add for {:?}", name);
                    return false;
                }
                self.columns.push(column.to_string());
                self.visible_columns.push(column.to_string());
                self.column_order.push(column.to_string());
                true
            }
            StoreAction::ToggleColumnVisibility(name) => {
                if self.is_column_visible(name) {
                    self.visible_columns.retain(|c| c != name);
                } else {
                    self.visible_columns.push(name.clone());
                }
                true
            }
            StoreAction::SetColumnOrder(order) => {
                if &self.column_order == order {
                    return false;
                }
                self.column_order = order.clone();
                true
            }
            StoreAction::SetSearch(text) => {
                if &self.search == text {
                    return false;
                }
                self.search = text.clone();
                true
            }
        }
    }
}
