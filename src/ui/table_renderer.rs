// Pure table rendering function that depends only on TableRenderContext
// This is completely decoupled from the app and the store

use crate::data::datatable::Record;
use crate::ui::grid_view::{CellEdit, SortOrder};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Constraint,
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

const MIN_COLUMN_WIDTH: u16 = 4;
const MAX_COLUMN_WIDTH: u16 = 40;

/// Everything needed to draw one page of the grid
pub struct TableRenderContext<'a> {
    pub columns: &'a [String],
    pub rows: Vec<&'a Record>,
    pub sort_column: &'a str,
    pub sort_order: SortOrder,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub editing: Option<&'a CellEdit>,
    pub editing_enabled: bool,
    pub drag_source: Option<usize>,
    pub show_row_numbers: bool,
    pub use_glyphs: bool,
    /// Absolute index of the first row on the page
    pub first_row_number: usize,
    pub title: String,
    pub palette: &'a Palette,
}

impl TableRenderContext<'_> {
    fn is_editing(&self, row: &Record, column: &str) -> bool {
        self.editing
            .is_some_and(|edit| edit.row_id == row.id && edit.column == column)
    }

    fn cell_text(&self, row: &Record, column: &str) -> String {
        match self.editing {
            Some(edit) if self.is_editing(row, column) => format!("{}▏", edit.pending),
            _ => row.display_value(column),
        }
    }
}

/// Render a table using only the provided context
pub fn render_table(f: &mut Frame, area: Rect, ctx: &TableRenderContext) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(ctx.title.clone())
        .border_style(Style::default().fg(ctx.palette.primary))
        .style(Style::default().bg(ctx.palette.paper).fg(ctx.palette.text));

    if ctx.columns.is_empty() || ctx.rows.is_empty() {
        let message = if ctx.columns.is_empty() {
            "No visible columns - press c to manage columns"
        } else {
            "No rows to display"
        };
        let empty = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(ctx.palette.muted));
        f.render_widget(empty, area);
        return;
    }

    let header = build_header_row(ctx);
    let rows = build_data_rows(ctx);
    let widths = calculate_column_widths(ctx);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

/// Build the header row with sort indicators and the picked-up column
fn build_header_row(ctx: &TableRenderContext) -> Row<'static> {
    let mut header_cells: Vec<Cell> = Vec::new();

    if ctx.show_row_numbers {
        header_cells.push(
            Cell::from("#").style(
                Style::default()
                    .fg(ctx.palette.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
        );
    }

    for (idx, column) in ctx.columns.iter().enumerate() {
        let sort_indicator = if column == ctx.sort_column {
            format!(" {}", ctx.sort_order.arrow(ctx.use_glyphs))
        } else {
            String::new()
        };
        let drag_indicator = if ctx.drag_source == Some(idx) {
            if ctx.use_glyphs {
                "⇄ "
            } else {
                "<> "
            }
        } else {
            ""
        };

        let mut style = Style::default()
            .fg(ctx.palette.primary)
            .add_modifier(Modifier::BOLD);
        if idx == ctx.cursor_col {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if ctx.drag_source == Some(idx) {
            style = style.fg(ctx.palette.secondary).add_modifier(Modifier::REVERSED);
        }

        header_cells.push(
            Cell::from(format!("{}{}{}", drag_indicator, column, sort_indicator)).style(style),
        );
    }

    Row::new(header_cells).style(Style::default().bg(ctx.palette.background))
}

/// Build the data rows with cursor and edit styling
fn build_data_rows(ctx: &TableRenderContext) -> Vec<Row<'static>> {
    ctx.rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let mut cells: Vec<Cell> = Vec::new();
            let is_current_row = row_idx == ctx.cursor_row;

            if ctx.show_row_numbers {
                let row_num = ctx.first_row_number + row_idx + 1;
                cells.push(
                    Cell::from(row_num.to_string()).style(Style::default().fg(ctx.palette.muted)),
                );
            }

            for (col_idx, column) in ctx.columns.iter().enumerate() {
                let mut cell = Cell::from(ctx.cell_text(row, column));

                if ctx.is_editing(row, column) {
                    let border = match ctx.editing.and_then(|e| e.error.as_ref()) {
                        Some(_) => ctx.palette.error,
                        None => ctx.palette.success,
                    };
                    cell = cell.style(
                        Style::default()
                            .fg(border)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    );
                } else if is_current_row && col_idx == ctx.cursor_col {
                    let mut style = Style::default()
                        .bg(ctx.palette.primary)
                        .fg(ctx.palette.paper)
                        .add_modifier(Modifier::BOLD);
                    if ctx.editing_enabled {
                        style = style.add_modifier(Modifier::ITALIC);
                    }
                    cell = cell.style(style);
                }

                cells.push(cell);
            }

            let row_style = if is_current_row {
                Style::default().bg(ctx.palette.selection)
            } else {
                Style::default()
            };

            Row::new(cells).style(row_style)
        })
        .collect()
}

/// Width of each column: the longest of header and page values, clamped
fn calculate_column_widths(ctx: &TableRenderContext) -> Vec<Constraint> {
    let mut widths: Vec<Constraint> = Vec::new();

    if ctx.show_row_numbers {
        widths.push(Constraint::Length(5));
    }

    for column in ctx.columns {
        // Room for the sort arrow and drag marker
        let header_width = column.chars().count() + 4;
        let content_width = ctx
            .rows
            .iter()
            .map(|row| ctx.cell_text(row, column).chars().count())
            .max()
            .unwrap_or(0);
        let width = header_width.max(content_width) as u16;
        widths.push(Constraint::Length(
            width.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH),
        ));
    }

    widths
}
