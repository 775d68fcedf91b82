//! Grid view: the per-session view over the store.
//!
//! Holds everything the grid needs that is not shared table data: sort key,
//! search text, page, the transient column display order, the cell being
//! edited and the row awaiting delete confirmation. Derived rows are
//! computed as sort, then filter, then paginate, with the first two stages
//! memoised.

use crate::data::datatable::{parse_number, Record, RowId};
use crate::data::datavalue_compare::{compare_cells, TextOrdering};
use crate::state::events::StoreAction;
use crate::state::store::Store;
use crate::ui::notifications::Notification;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, info};

/// The one column whose edits must be numeric
pub const NUMERIC_FIELD: &str = "age";

pub const PAGE_SIZE_OPTIONS: [PageSize; 3] = [PageSize::Five, PageSize::Ten, PageSize::Twenty];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
}

impl PageSize {
    pub fn rows(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
        }
    }

    pub fn from_rows(rows: usize) -> Option<Self> {
        PAGE_SIZE_OPTIONS.into_iter().find(|size| size.rows() == rows)
    }

    /// The following option, wrapping around
    pub fn next(self) -> Self {
        match self {
            PageSize::Five => PageSize::Ten,
            PageSize::Ten => PageSize::Twenty,
            PageSize::Twenty => PageSize::Five,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn arrow(self, use_glyphs: bool) -> &'static str {
        match (self, use_glyphs) {
            (SortOrder::Ascending, true) => "↑",
            (SortOrder::Descending, true) => "↓",
            (SortOrder::Ascending, false) => "^",
            (SortOrder::Descending, false) => "v",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Browsing,
    EditingEnabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} must be a valid number", title_case(.column))]
    NotNumeric { column: String },
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A cell open for editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row_id: RowId,
    pub column: String,
    pub pending: String,
    pub error: Option<ValidationError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SortKey {
    revision: u64,
    row_count: usize,
    column: String,
    order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterKey {
    sort: SortKey,
    search: String,
    visible: Vec<String>,
}

/// Memoised sort and filter stages, as indices into the store's rows
#[derive(Debug, Default)]
struct DerivedRows {
    sort_key: Option<SortKey>,
    sorted: Vec<usize>,
    filter_key: Option<FilterKey>,
    filtered: Vec<usize>,
    sort_passes: u64,
    filter_passes: u64,
}

pub struct GridView {
    mode: ViewMode,
    editing: Option<CellEdit>,

    sort_column: String,
    sort_order: SortOrder,
    search: String,
    page: usize,
    page_size: PageSize,

    /// Display order; reset whenever the store's visible columns change
    column_order: Vec<String>,
    synced_visible: Vec<String>,

    pending_delete: Option<RowId>,
    confirm_delete: bool,

    /// Column index picked up for a move, if any
    drag_source: Option<usize>,

    cursor_row: usize,
    cursor_col: usize,

    derived: DerivedRows,
    outbox: Vec<Notification>,
}

impl GridView {
    pub fn new(store: &Store) -> Self {
        let visible = store.visible_columns().to_vec();
        Self {
            mode: ViewMode::Browsing,
            editing: None,
            sort_column: "name".to_string(),
            sort_order: SortOrder::Ascending,
            search: store.state().search.clone(),
            page: 0,
            page_size: PageSize::default(),
            column_order: visible.clone(),
            synced_visible: visible,
            pending_delete: None,
            confirm_delete: true,
            drag_source: None,
            cursor_row: 0,
            cursor_col: 0,
            derived: DerivedRows::default(),
            outbox: Vec::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Whether deletes wait for a confirmation step
    pub fn with_confirm_delete(mut self, confirm: bool) -> Self {
        self.confirm_delete = confirm;
        self
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn editing(&self) -> Option<&CellEdit> {
        self.editing.as_ref()
    }

    pub fn sort(&self) -> (&str, SortOrder) {
        (&self.sort_column, self.sort_order)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn column_order(&self) -> &[String] {
        &self.column_order
    }

    pub fn pending_delete(&self) -> Option<&RowId> {
        self.pending_delete.as_ref()
    }

    pub fn drag_source(&self) -> Option<usize> {
        self.drag_source
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Number of times each stage actually recomputed
    pub fn derive_passes(&self) -> (u64, u64) {
        (self.derived.sort_passes, self.derived.filter_passes)
    }

    /// Drain notifications raised since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    /// Reset the display order when the store's visible columns moved on
    pub fn sync_columns(&mut self, store: &Store) {
        if store.visible_columns() == self.synced_visible.as_slice() {
            return;
        }
        debug!(target: "grid", "Visible columns changed, resetting display order");
        self.synced_visible = store.visible_columns().to_vec();
        self.column_order = self.synced_visible.clone();
        self.drag_source = None;
        self.cursor_col = self
            .cursor_col
            .min(self.column_order.len().saturating_sub(1));
    }

    pub fn toggle_edit_mode(&mut self) {
        self.editing = None;
        self.mode = match self.mode {
            ViewMode::Browsing => {
                self.outbox.push(Notification::info("Entered edit mode"));
                ViewMode::EditingEnabled
            }
            ViewMode::EditingEnabled => {
                self.outbox.push(Notification::plain("Exited edit mode"));
                ViewMode::Browsing
            }
        };
        debug!(target: "grid", "View mode is now {:?}", self.mode);
    }

    /// Open a cell for editing. Refused outside edit mode, while another
    /// cell is open, or when the row does not exist.
    pub fn begin_edit(&mut self, store: &Store, row_id: &RowId, column: &str) -> bool {
        if self.mode != ViewMode::EditingEnabled || self.editing.is_some() {
            return false;
        }
        let Some(record) = store.state().row(row_id) else {
            return false;
        };

        self.editing = Some(CellEdit {
            row_id: row_id.clone(),
            column: column.to_string(),
            pending: record.display_value(column),
            error: None,
        });
        true
    }

    /// Open the cell under the cursor
    pub fn begin_edit_at_cursor(&mut self, store: &Store) -> bool {
        match self.current_cell(store) {
            Some((row_id, column)) => self.begin_edit(store, &row_id, &column),
            None => false,
        }
    }

    pub fn set_pending(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.editing {
            edit.pending = text.into();
        }
    }

    /// Validate and save the open cell. On a validation failure the cell
    /// stays open with the error attached.
    pub fn commit_edit(&mut self, store: &mut Store) -> Result<(), ValidationError> {
        let Some(edit) = &mut self.editing else {
            return Ok(());
        };

        if edit.column == NUMERIC_FIELD && parse_number(&edit.pending).is_none() {
            let error = ValidationError::NotNumeric {
                column: edit.column.clone(),
            };
            edit.error = Some(error.clone());
            self.outbox.push(Notification::error(format!(
                "Invalid input: {} must be numeric",
                title_case(&edit.column)
            )));
            return Err(error);
        }

        let rows: Vec<Record> = store
            .rows()
            .iter()
            .map(|row| {
                if row.id == edit.row_id {
                    let mut row = row.clone();
                    row.set(edit.column.clone(), edit.pending.clone());
                    row
                } else {
                    row.clone()
                }
            })
            .collect();

        info!(target: "grid", "Saving {}.{} = {:?}", edit.row_id, edit.column, edit.pending);
        store.dispatch(StoreAction::SetRows(rows));
        self.editing = None;
        self.outbox.push(Notification::success("Changes saved successfully"));
        Ok(())
    }

    /// Start deleting a row. Returns true when a confirmation is now pending;
    /// without confirmation the row is deleted immediately.
    pub fn request_delete(&mut self, store: &mut Store, row_id: RowId) -> bool {
        self.pending_delete = Some(row_id);
        if self.confirm_delete {
            return true;
        }
        self.confirm_delete(store);
        false
    }

    pub fn confirm_delete(&mut self, store: &mut Store) {
        let Some(row_id) = self.pending_delete.take() else {
            return;
        };
        if self.editing.as_ref().is_some_and(|e| e.row_id == row_id) {
            self.editing = None;
        }
        store.dispatch(StoreAction::DeleteRow(row_id));
        self.outbox.push(Notification::warning("Row deleted"));
        self.clamp_cursor(store);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Move the column at `source` to `destination` in the display order.
    /// A missing destination (dropped outside the header) changes nothing.
    pub fn reorder_columns(&mut self, source: usize, destination: Option<usize>) {
        let Some(destination) = destination else {
            return;
        };
        if source >= self.column_order.len() {
            return;
        }

        let column = self.column_order.remove(source);
        let destination = destination.min(self.column_order.len());
        self.column_order.insert(destination, column);
        self.cursor_col = destination;
        self.outbox.push(Notification::info("Columns reordered"));
        debug!(target: "grid", "Display order: {:?}", self.column_order);
    }

    /// Pick up the column under the cursor
    pub fn begin_column_drag(&mut self) {
        if !self.column_order.is_empty() {
            self.drag_source = Some(self.cursor_col);
        }
    }

    /// Drop the picked-up column at the cursor, or abandon the move
    pub fn finish_column_drag(&mut self, drop_at_cursor: bool) {
        if let Some(source) = self.drag_source.take() {
            let destination = drop_at_cursor.then_some(self.cursor_col);
            self.reorder_columns(source, destination);
        }
    }

    /// Header click: flip to descending when already ascending on this
    /// column, otherwise sort ascending by it
    pub fn sort_by_column(&mut self, column: &str) {
        if self.sort_column == column && self.sort_order == SortOrder::Ascending {
            self.sort_order = SortOrder::Descending;
        } else {
            self.sort_column = column.to_string();
            self.sort_order = SortOrder::Ascending;
        }
        debug!(target: "grid", "Sorting by {} {:?}", self.sort_column, self.sort_order);
    }

    pub fn sort_by_cursor_column(&mut self) {
        if let Some(column) = self.column_order.get(self.cursor_col).cloned() {
            self.sort_by_column(&column);
        }
    }

    /// Update the search text and remember it in the store. The page is
    /// left where it is.
    pub fn set_search(&mut self, store: &mut Store, text: impl Into<String>) {
        self.search = text.into();
        store.dispatch(StoreAction::SetSearch(self.search.clone()));
    }

    /// Jump to a page; out-of-range pages are kept and render empty
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.cursor_row = 0;
    }

    pub fn has_next_page(&mut self, store: &Store) -> bool {
        (self.page + 1) * self.page_size.rows() < self.filtered_count(store)
    }

    pub fn next_page(&mut self, store: &Store) -> bool {
        if !self.has_next_page(store) {
            return false;
        }
        self.set_page(self.page + 1);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.set_page(self.page - 1);
        true
    }

    pub fn page_count(&mut self, store: &Store) -> usize {
        self.filtered_count(store).div_ceil(self.page_size.rows())
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.set_page(0);
    }

    pub fn cycle_page_size(&mut self) -> PageSize {
        self.set_page_size(self.page_size.next());
        self.page_size
    }

    /// Bring both memoised stages up to date with the store and this view
    pub fn refresh(&mut self, store: &Store) {
        self.sync_columns(store);
        let rows = store.rows();

        let sort_key = SortKey {
            revision: store.revision(),
            row_count: rows.len(),
            column: self.sort_column.clone(),
            order: self.sort_order,
        };
        if self.derived.sort_key.as_ref() != Some(&sort_key) {
            let mut sorted: Vec<usize> = (0..rows.len()).collect();
            let column = sort_key.column.as_str();
            let text = TextOrdering::for_values(rows.iter().map(|row| row.get(column)));
            sorted.sort_by(|&a, &b| {
                let ord: Ordering = compare_cells(
                    rows[a].cell(column).as_deref(),
                    rows[b].cell(column).as_deref(),
                    text,
                );
                match sort_key.order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            });
            self.derived.sorted = sorted;
            self.derived.sort_key = Some(sort_key.clone());
            self.derived.sort_passes += 1;
            self.derived.filter_key = None;
        }

        let filter_key = FilterKey {
            sort: sort_key,
            search: self.search.clone(),
            visible: store.visible_columns().to_vec(),
        };
        if self.derived.filter_key.as_ref() != Some(&filter_key) {
            self.derived.filtered = if filter_key.search.trim().is_empty() {
                self.derived.sorted.clone()
            } else {
                let needle = filter_key.search.to_lowercase();
                self.derived
                    .sorted
                    .iter()
                    .copied()
                    .filter(|&idx| {
                        filter_key.visible.iter().any(|column| {
                            rows[idx]
                                .display_value(column)
                                .to_lowercase()
                                .contains(&needle)
                        })
                    })
                    .collect()
            };
            self.derived.filter_key = Some(filter_key);
            self.derived.filter_passes += 1;
        }
    }

    /// Sorted and filtered rows, before pagination
    pub fn filtered_rows<'a>(&mut self, store: &'a Store) -> Vec<&'a Record> {
        self.refresh(store);
        let rows = store.rows();
        self.derived
            .filtered
            .iter()
            .filter_map(|&idx| rows.get(idx))
            .collect()
    }

    pub fn filtered_count(&mut self, store: &Store) -> usize {
        self.refresh(store);
        self.derived.filtered.len()
    }

    /// The rows on the current page
    pub fn page_rows<'a>(&mut self, store: &'a Store) -> Vec<&'a Record> {
        self.refresh(store);
        let rows = store.rows();
        let size = self.page_size.rows();
        self.derived
            .filtered
            .iter()
            .skip(self.page * size)
            .take(size)
            .filter_map(|&idx| rows.get(idx))
            .collect()
    }

    pub fn move_up(&mut self, count: usize) {
        self.cursor_row = self.cursor_row.saturating_sub(count);
    }

    pub fn move_down(&mut self, store: &Store, count: usize) {
        let last = self.page_rows(store).len().saturating_sub(1);
        self.cursor_row = (self.cursor_row + count).min(last);
    }

    pub fn move_left(&mut self, count: usize) {
        self.cursor_col = self.cursor_col.saturating_sub(count);
    }

    pub fn move_right(&mut self, count: usize) {
        let last = self.column_order.len().saturating_sub(1);
        self.cursor_col = (self.cursor_col + count).min(last);
    }

    pub fn move_to_first_row(&mut self) {
        self.cursor_row = 0;
    }

    pub fn move_to_last_row(&mut self, store: &Store) {
        self.cursor_row = self.page_rows(store).len().saturating_sub(1);
    }

    /// Keep the cursor on the page after rows disappear
    pub fn clamp_cursor(&mut self, store: &Store) {
        let last = self.page_rows(store).len().saturating_sub(1);
        self.cursor_row = self.cursor_row.min(last);
    }

    /// Row id and column under the cursor, if the page has rows
    pub fn current_cell(&mut self, store: &Store) -> Option<(RowId, String)> {
        let column = self.column_order.get(self.cursor_col)?.clone();
        let row_id = self.page_rows(store).get(self.cursor_row)?.id.clone();
        Some((row_id, column))
    }
}
