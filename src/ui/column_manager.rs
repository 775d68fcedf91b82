//! Column visibility dialog: a checkbox per known column plus a field for
//! adding a new one

use crate::state::events::StoreAction;
use crate::state::store::Store;
use crate::ui::theme::Palette;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::debug;
use tui_input::{backend::crossterm::EventHandler, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerFocus {
    Columns,
    NewColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnManagerAction {
    None,
    Close,
}

pub struct ColumnManagerDialog {
    selected: usize,
    focus: ManagerFocus,
    new_column: Input,
}

impl ColumnManagerDialog {
    pub fn new() -> Self {
        Self {
            selected: 0,
            focus: ManagerFocus::Columns,
            new_column: Input::default(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn focus(&self) -> ManagerFocus {
        self.focus
    }

    /// Flip visibility of the highlighted column
    pub fn toggle_selected(&mut self, store: &mut Store) {
        if let Some(column) = store.columns().get(self.selected).cloned() {
            store.dispatch(StoreAction::ToggleColumnVisibility(column));
        }
    }

    /// Add the typed column. Blank and duplicate names are ignored by the
    /// store; the field is cleared either way.
    pub fn submit_new_column(&mut self, store: &mut Store) -> bool {
        let name = self.new_column.value().to_string();
        self.new_column.reset();
        let added = store.dispatch(StoreAction::AddColumn(name.clone()));
        debug!(target: "grid", "Add column {:?}: {}", name, added);
        if added {
            self.selected = store.columns().len().saturating_sub(1);
        }
        added
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &mut Store) -> ColumnManagerAction {
        if key.code == KeyCode::Esc {
            return ColumnManagerAction::Close;
        }

        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                ManagerFocus::Columns => ManagerFocus::NewColumn,
                ManagerFocus::NewColumn => ManagerFocus::Columns,
            };
            return ColumnManagerAction::None;
        }

        match self.focus {
            ManagerFocus::Columns => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let last = store.columns().len().saturating_sub(1);
                    self.selected = (self.selected + 1).min(last);
                }
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(store),
                KeyCode::Char('q') | KeyCode::Char('c') => return ColumnManagerAction::Close,
                _ => {}
            },
            ManagerFocus::NewColumn => match key.code {
                KeyCode::Enter => {
                    self.submit_new_column(store);
                }
                _ => {
                    self.new_column.handle_event(&Event::Key(key));
                }
            },
        }
        ColumnManagerAction::None
    }

    pub fn render(&self, f: &mut Frame, area: Rect, store: &Store, palette: &Palette) {
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Manage Columns - Space toggles, Tab to add, Esc closes ")
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.paper).fg(palette.text));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(inner);

        let items: Vec<ListItem> = store
            .columns()
            .iter()
            .map(|column| {
                let mark = if store.state().is_column_visible(column) {
                    "[x]"
                } else {
                    "[ ]"
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, Style::default().fg(palette.secondary)),
                    Span::raw(" "),
                    Span::raw(column.clone()),
                ]))
            })
            .collect();

        let highlight = if self.focus == ManagerFocus::Columns {
            Style::default()
                .bg(palette.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let list = List::new(items).highlight_style(highlight);
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        f.render_stateful_widget(list, chunks[0], &mut list_state);

        let border = if self.focus == ManagerFocus::NewColumn {
            palette.primary
        } else {
            palette.muted
        };
        let field = Paragraph::new(self.new_column.value()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("New column")
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(field, chunks[1]);

        if self.focus == ManagerFocus::NewColumn {
            let cursor = self.new_column.visual_cursor() as u16;
            f.set_cursor_position((chunks[1].x + 1 + cursor, chunks[1].y + 1));
        }
    }
}

impl Default for ColumnManagerDialog {
    fn default() -> Self {
        Self::new()
    }
}
