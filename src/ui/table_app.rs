//! The interactive shell: owns the store, the grid view and the theme, maps
//! keys to grid operations and draws everything each frame.

use crate::config::config::Config;
use crate::data::csv_bridge::{CsvBridge, ImportOptions, DEFAULT_EXPORT_FILE};
use crate::state::events::StoreAction;
use crate::state::store::Store;
use crate::ui::actions::{can_perform_action, Action, ActionContext, AppMode, NavigateAction};
use crate::ui::column_manager::{ColumnManagerAction, ColumnManagerDialog};
use crate::ui::grid_view::{GridView, ViewMode, NUMERIC_FIELD};
use crate::ui::key_mapper::KeyMapper;
use crate::ui::notifications::{Notification, NotificationCenter, NotificationVariant};
use crate::ui::table_renderer::{render_table, TableRenderContext};
use crate::ui::theme::{ColorMode, Palette, ThemePreference};
use crate::utils::logging::LogRingBuffer;
use crate::widgets::help_widget::{HelpAction, HelpWidget};
use crate::widgets::log_widget::LogWidget;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tui_input::{backend::crossterm::EventHandler, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Import,
    Export,
}

pub struct TableApp {
    store: Store,
    grid: GridView,
    theme: ThemePreference,
    config: Config,
    key_mapper: KeyMapper,
    mode: AppMode,

    search_input: Input,
    cell_input: Input,
    prompt_input: Input,
    prompt_kind: PromptKind,
    alert: Option<String>,

    column_manager: ColumnManagerDialog,
    help: HelpWidget,
    log: LogWidget,
    log_buffer: Option<LogRingBuffer>,
    notifications: NotificationCenter,

    should_quit: bool,
}

impl TableApp {
    pub fn new(
        store: Store,
        theme: ThemePreference,
        config: Config,
        log_buffer: Option<LogRingBuffer>,
    ) -> Self {
        let grid = GridView::new(&store)
            .with_page_size(config.display.page_size())
            .with_confirm_delete(config.behavior.confirm_delete);
        let notifications = NotificationCenter::new(
            Duration::from_millis(config.behavior.notification_timeout_ms),
            config.behavior.max_notifications,
        );
        let search_input = Input::new(grid.search().to_string());

        Self {
            store,
            grid,
            theme,
            config,
            key_mapper: KeyMapper::new(),
            mode: AppMode::Browse,
            search_input,
            cell_input: Input::default(),
            prompt_input: Input::default(),
            prompt_kind: PromptKind::Import,
            alert: None,
            column_manager: ColumnManagerDialog::new(),
            help: HelpWidget::new(),
            log: LogWidget::new(),
            log_buffer,
            notifications,
            should_quit: false,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn theme_mode(&self) -> ColorMode {
        self.theme.mode()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.visible()
    }

    fn action_context(&mut self) -> ActionContext {
        ActionContext {
            mode: self.mode,
            view_mode: self.grid.mode(),
            dragging_column: self.grid.drag_source().is_some(),
            page_row_count: self.grid.page_rows(&self.store).len(),
            column_count: self.grid.column_order().len(),
            page: self.grid.page(),
            has_next_page: self.grid.has_next_page(&self.store),
        }
    }

    /// Route one key press to whatever currently owns the keyboard
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.mode {
            AppMode::Browse => self.handle_browse_key(key)?,
            AppMode::Search => self.handle_search_key(key),
            AppMode::EditCell => self.handle_edit_key(key),
            AppMode::ColumnManager => {
                if self.column_manager.handle_key(key, &mut self.store)
                    == ColumnManagerAction::Close
                {
                    self.mode = AppMode::Browse;
                }
            }
            AppMode::Prompt => self.handle_prompt_key(key),
            AppMode::Confirm => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.grid.confirm_delete(&mut self.store);
                    self.mode = AppMode::Browse;
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.grid.cancel_delete();
                    self.mode = AppMode::Browse;
                }
                _ => {}
            },
            AppMode::Alert => {
                self.alert = None;
                self.mode = AppMode::Browse;
            }
            AppMode::Help => {
                if self.help.handle_key(key) == HelpAction::Exit {
                    self.mode = AppMode::Browse;
                }
            }
            AppMode::Log => {
                if self.log.handle_key(key) {
                    self.mode = AppMode::Browse;
                }
            }
        }

        for notification in self.grid.take_notifications() {
            self.notifications.push(notification);
        }
        Ok(())
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<()> {
        let context = self.action_context();
        let Some(action) = self.key_mapper.map_key(key, &context) else {
            return Ok(());
        };
        if !can_perform_action(&action, &context) {
            debug!(target: "grid", "{:?} not available here", action);
            return Ok(());
        }
        self.apply_action(action)
    }

    pub fn apply_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Navigate(nav) => match nav {
                NavigateAction::Up(n) => self.grid.move_up(n),
                NavigateAction::Down(n) => self.grid.move_down(&self.store, n),
                NavigateAction::Left(n) => self.grid.move_left(n),
                NavigateAction::Right(n) => self.grid.move_right(n),
                NavigateAction::Home => self.grid.move_to_first_row(),
                NavigateAction::End => self.grid.move_to_last_row(&self.store),
            },
            Action::Sort => self.grid.sort_by_cursor_column(),
            Action::StartSearch => {
                self.search_input = Input::new(self.grid.search().to_string());
                self.mode = AppMode::Search;
            }
            Action::ToggleEditMode => self.grid.toggle_edit_mode(),
            Action::Activate => {
                if self.grid.drag_source().is_some() {
                    self.grid.finish_column_drag(true);
                } else if self.grid.begin_edit_at_cursor(&self.store) {
                    let pending = self
                        .grid
                        .editing()
                        .map(|e| e.pending.clone())
                        .unwrap_or_default();
                    self.cell_input = Input::new(pending);
                    self.mode = AppMode::EditCell;
                }
            }
            Action::DeleteRow => {
                if let Some((row_id, _)) = self.grid.current_cell(&self.store) {
                    if self.grid.request_delete(&mut self.store, row_id) {
                        self.mode = AppMode::Confirm;
                    }
                }
            }
            Action::ToggleColumnDrag => {
                if self.grid.drag_source().is_some() {
                    self.grid.finish_column_drag(true);
                } else {
                    self.grid.begin_column_drag();
                }
            }
            Action::ExitCurrentMode => {
                if self.grid.drag_source().is_some() {
                    self.grid.finish_column_drag(false);
                }
            }
            Action::NextPage => {
                self.grid.next_page(&self.store);
            }
            Action::PreviousPage => {
                self.grid.previous_page();
            }
            Action::CyclePageSize => {
                let size = self.grid.cycle_page_size();
                debug!(target: "grid", "Showing {} rows per page", size.rows());
            }
            Action::ManageColumns => self.mode = AppMode::ColumnManager,
            Action::Import => {
                self.prompt_kind = PromptKind::Import;
                self.prompt_input = Input::default();
                self.mode = AppMode::Prompt;
            }
            Action::Export => {
                self.prompt_kind = PromptKind::Export;
                self.prompt_input = Input::new(DEFAULT_EXPORT_FILE.to_string());
                self.mode = AppMode::Prompt;
            }
            Action::ToggleTheme => {
                let mode = self.theme.toggle();
                info!(target: "theme", "Theme set to {}", mode);
            }
            Action::ShowHelp => self.mode = AppMode::Help,
            Action::ShowLog => {
                let actions = self.store.action_history().map(String::from).collect();
                self.log.refresh(self.log_buffer.as_ref(), actions);
                self.mode = AppMode::Log;
            }
            Action::Quit | Action::ForceQuit => self.should_quit = true,
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.mode = AppMode::Browse,
            _ => {
                self.search_input.handle_event(&Event::Key(key));
                if self.search_input.value() != self.grid.search() {
                    let text = self.search_input.value().to_string();
                    self.grid.set_search(&mut self.store, text);
                }
            }
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            // Leaving the cell saves it; a failed check keeps it open
            KeyCode::Enter | KeyCode::Esc => {
                self.grid.set_pending(self.cell_input.value());
                if self.grid.commit_edit(&mut self.store).is_ok() {
                    self.mode = AppMode::Browse;
                }
            }
            _ => {
                self.cell_input.handle_event(&Event::Key(key));
                self.grid.set_pending(self.cell_input.value());
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = AppMode::Browse,
            KeyCode::Enter => {
                let path = self.prompt_input.value().trim().to_string();
                self.mode = AppMode::Browse;
                if path.is_empty() {
                    return;
                }
                match self.prompt_kind {
                    PromptKind::Import => self.import_csv(Path::new(&path)),
                    PromptKind::Export => self.export_csv(Path::new(&path)),
                }
            }
            _ => {
                self.prompt_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn import_options(&self) -> ImportOptions {
        if self.config.behavior.strict_import {
            ImportOptions::strict(
                self.config.behavior.required_columns.clone(),
                vec![NUMERIC_FIELD.to_string()],
            )
        } else {
            ImportOptions::default()
        }
    }

    /// Replace every row with the file's contents; failures leave the store
    /// untouched and show a blocking message
    pub fn import_csv(&mut self, path: &Path) {
        match CsvBridge::import_file(path, &self.import_options()) {
            Ok(rows) => {
                self.store.dispatch(StoreAction::SetRows(rows));
                self.show_alert("CSV imported successfully!");
            }
            Err(e) => self.show_alert(e.to_string()),
        }
    }

    /// Write every row, projected to the visible columns
    pub fn export_csv(&mut self, path: &Path) {
        match CsvBridge::export_file(self.store.rows(), self.store.visible_columns(), path) {
            Ok(count) => self.notifications.push(Notification::success(format!(
                "Exported {} rows to {}",
                count,
                path.display()
            ))),
            Err(e) => self.show_alert(e.to_string()),
        }
    }

    fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
        self.mode = AppMode::Alert;
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!(target: "grid", "Table view started with {} rows", self.store.rows().len());

        while !self.should_quit {
            self.notifications.expire(Instant::now());
            terminal.draw(|f| self.render(f))?;

            if !event::poll(Duration::from_millis(250))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key)?;
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, f: &mut Frame) {
        let palette = *self.theme.palette();
        let area = f.area();
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title(f, chunks[0], &palette);
        self.render_search(f, chunks[1], &palette);
        self.render_grid(f, chunks[2], &palette);
        self.render_status(f, chunks[3], &palette);
        self.render_notifications(f, area, &palette);

        match self.mode {
            AppMode::ColumnManager => {
                let popup = centered_rect(50, 60, area);
                self.column_manager.render(f, popup, &self.store, &palette);
            }
            AppMode::Prompt => self.render_prompt(f, centered_rect(60, 20, area), &palette),
            AppMode::Confirm => self.render_message(
                f,
                centered_rect(50, 20, area),
                " Delete row ",
                "Delete this row? (y/n)",
                palette.warning,
                &palette,
            ),
            AppMode::Alert => {
                let message = self.alert.clone().unwrap_or_default();
                self.render_message(
                    f,
                    centered_rect(50, 20, area),
                    " Notice ",
                    &message,
                    palette.primary,
                    &palette,
                );
            }
            AppMode::Help => self.help.render(f, centered_rect(70, 80, area), &palette),
            AppMode::Log => self.log.render(f, centered_rect(90, 80, area), &palette),
            AppMode::Browse | AppMode::Search | AppMode::EditCell => {}
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let edit = match self.grid.mode() {
            ViewMode::EditingEnabled => Span::styled(
                " EDIT MODE ",
                Style::default()
                    .bg(palette.secondary)
                    .fg(palette.paper)
                    .add_modifier(Modifier::BOLD),
            ),
            ViewMode::Browsing => Span::raw(""),
        };
        let title = Line::from(vec![
            Span::styled(
                " table-cli ",
                Style::default()
                    .bg(palette.primary)
                    .fg(palette.paper)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            edit,
            Span::styled(
                format!("  {} theme  F1 help", self.theme.mode()),
                Style::default().fg(palette.muted),
            ),
        ]);
        f.render_widget(Paragraph::new(title), area);
    }

    fn render_search(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let focused = self.mode == AppMode::Search;
        let border = if focused { palette.primary } else { palette.muted };
        let search = Paragraph::new(self.search_input.value())
            .style(Style::default().fg(palette.text).bg(palette.paper))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search (/)")
                    .border_style(Style::default().fg(border)),
            );
        f.render_widget(search, area);

        if focused {
            let cursor = self.search_input.visual_cursor() as u16;
            f.set_cursor_position((area.x + 1 + cursor, area.y + 1));
        }
    }

    fn render_grid(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let page = self.grid.page();
        let page_size = self.grid.page_size().rows();
        let total = self.grid.filtered_count(&self.store);
        let rows = self.grid.page_rows(&self.store);
        let (sort_column, sort_order) = self.grid.sort();
        let (cursor_row, cursor_col) = self.grid.cursor();

        let ctx = TableRenderContext {
            columns: self.grid.column_order(),
            rows,
            sort_column,
            sort_order,
            cursor_row,
            cursor_col,
            editing: self.grid.editing(),
            editing_enabled: self.grid.mode() == ViewMode::EditingEnabled,
            drag_source: self.grid.drag_source(),
            show_row_numbers: self.config.display.show_row_numbers,
            use_glyphs: self.config.display.use_glyphs,
            first_row_number: page * page_size,
            title: format!(" Table ({} of {} rows) ", total, self.store.rows().len()),
            palette,
        };
        render_table(f, area, &ctx);
    }

    fn render_status(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let line = if let Some(error) = self.grid.editing().and_then(|e| e.error.as_ref()) {
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
            ))
        } else {
            let total = self.grid.filtered_count(&self.store);
            let size = self.grid.page_size().rows();
            let page = self.grid.page();
            let first = (page * size).min(total);
            let last = ((page + 1) * size).min(total);
            let pages = self.grid.page_count(&self.store).max(1);
            let from = if last > first { first + 1 } else { first };
            Line::from(Span::styled(
                format!(
                    " {}-{} of {}  page {}/{}  {} per page  [n]ext [p]rev [z] size [c]olumns [e]dit",
                    from,
                    last,
                    total,
                    page + 1,
                    pages,
                    size
                ),
                Style::default().fg(palette.muted),
            ))
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_notifications(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let width = area.width.min(42);
        let mut y = area.bottom().saturating_sub(2);

        for notification in self.notifications.visible().collect::<Vec<_>>().into_iter().rev() {
            if y < area.y + 3 {
                break;
            }
            let color = match notification.variant {
                NotificationVariant::Default => palette.text,
                NotificationVariant::Info => palette.primary,
                NotificationVariant::Success => palette.success,
                NotificationVariant::Warning => palette.warning,
                NotificationVariant::Error => palette.error,
            };
            let rect = Rect::new(area.right().saturating_sub(width), y - 3, width, 3);
            let toast = Paragraph::new(notification.message.as_str())
                .style(Style::default().fg(color).bg(palette.paper))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                );
            f.render_widget(Clear, rect);
            f.render_widget(toast, rect);
            y -= 3;
        }
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let title = match self.prompt_kind {
            PromptKind::Import => " Import CSV - file path ",
            PromptKind::Export => " Export CSV - file path ",
        };
        let prompt = Paragraph::new(self.prompt_input.value())
            .style(Style::default().fg(palette.text).bg(palette.paper))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(palette.primary)),
            );
        f.render_widget(Clear, area);
        f.render_widget(prompt, area);
        let cursor = self.prompt_input.visual_cursor() as u16;
        f.set_cursor_position((area.x + 1 + cursor, area.y + 1));
    }

    fn render_message(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        message: &str,
        accent: ratatui::style::Color,
        palette: &Palette,
    ) {
        let body = Paragraph::new(message.to_string())
            .style(Style::default().fg(palette.text).bg(palette.paper))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title.to_string())
                    .border_style(Style::default().fg(accent)),
            );
        f.render_widget(Clear, area);
        f.render_widget(body, area);
    }
}

// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Set up the terminal, run the app and always restore the terminal
pub fn run_tui(mut app: TableApp) -> Result<()> {
    if let Err(e) = enable_raw_mode() {
        return Err(anyhow::anyhow!("Failed to enable raw mode: {}", e));
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(anyhow::anyhow!("Failed to setup terminal: {}", e));
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(anyhow::anyhow!("Failed to create terminal: {}", e));
        }
    };

    let res = app.run(&mut terminal);

    // Always restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datatable::RowId;
    use crate::data::table_state::TableState;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app() -> TableApp {
        TableApp::new(
            Store::new(TableState::seeded()),
            ThemePreference::new(ColorMode::Light),
            Config::default(),
            None,
        )
    }

    fn press(app: &mut TableApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    #[test]
    fn test_enter_does_nothing_outside_edit_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), AppMode::Browse);

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), AppMode::EditCell);
    }

    #[test]
    fn test_delete_flow_asks_first() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode(), AppMode::Confirm);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store().rows().len(), 20);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store().rows().len(), 19);
        assert!(app
            .notifications()
            .any(|n| n.message == "Row deleted" && n.variant == NotificationVariant::Warning));
    }

    #[test]
    fn test_theme_key_flips_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme_mode(), ColorMode::Dark);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_draws_without_panicking() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        for code in [KeyCode::Char('c'), KeyCode::Esc, KeyCode::F(1)] {
            press(&mut app, code);
            terminal.draw(|f| app.render(f)).unwrap();
        }
    }

    #[test]
    fn test_leaving_cell_saves_it() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), AppMode::EditCell);
        assert_eq!(app.grid().editing().unwrap().column, "age");

        for code in [
            KeyCode::Backspace,
            KeyCode::Backspace,
            KeyCode::Char('4'),
            KeyCode::Char('1'),
            KeyCode::Esc,
        ] {
            press(&mut app, code);
        }
        assert_eq!(app.mode(), AppMode::Browse);
        assert!(app.grid().editing().is_none());
        let alice = app.store().state().row(&RowId::new("1")).unwrap();
        assert_eq!(alice.display_value("age"), "41");
    }

    #[test]
    fn test_leaving_invalid_cell_keeps_it_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        for code in [
            KeyCode::Backspace,
            KeyCode::Backspace,
            KeyCode::Char('x'),
            KeyCode::Esc,
        ] {
            press(&mut app, code);
        }

        assert_eq!(app.mode(), AppMode::EditCell);
        let edit = app.grid().editing().unwrap();
        assert_eq!(edit.pending, "x");
        assert!(edit.error.is_some());
        let alice = app.store().state().row(&RowId::new("1")).unwrap();
        assert_eq!(alice.display_value("age"), "25");
    }
}
