use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;
use crate::utils::logging::{LogEntry, LogRingBuffer};

/// How many entries the view pulls from the ring buffer
const LOG_VIEW_ENTRIES: usize = 500;

/// A self-contained log viewer over the in-memory ring buffer
pub struct LogWidget {
    entries: Vec<LogEntry>,
    /// Extra lines after the log: recent store actions
    footer: Vec<String>,
    scroll_offset: u16,
    max_scroll: u16,
}

impl LogWidget {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            footer: Vec::new(),
            scroll_offset: 0,
            max_scroll: 0,
        }
    }

    /// Snapshot the buffer and jump to the newest entry
    pub fn refresh(&mut self, buffer: Option<&LogRingBuffer>, actions: Vec<String>) {
        self.entries = buffer
            .map(|b| b.get_recent(LOG_VIEW_ENTRIES))
            .unwrap_or_default();
        self.footer = actions;
        self.max_scroll = u16::MAX;
        self.scroll_offset = u16::MAX;
    }

    pub fn line_count(&self) -> usize {
        self.entries.len() + self.footer.len() + usize::from(!self.footer.is_empty())
    }

    /// Handle key events; returns true when the view should close
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_offset = self.scroll_offset.saturating_add(1).min(self.max_scroll);
                false
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                false
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10).min(self.max_scroll);
                false
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.scroll_offset = 0;
                false
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.scroll_offset = self.max_scroll;
                false
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(5) => true,
            _ => false,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let mut lines: Vec<Line> = self
            .entries
            .iter()
            .map(|entry| {
                let color = match entry.level.as_str() {
                    "ERROR" => palette.error,
                    "WARN" => palette.warning,
                    "DEBUG" | "TRACE" => palette.muted,
                    _ => palette.text,
                };
                Line::from(Span::styled(
                    entry.format_for_display(),
                    Style::default().fg(color),
                ))
            })
            .collect();

        if !self.footer.is_empty() {
            lines.push(Line::from(Span::styled(
                "-- recent actions --",
                Style::default().fg(palette.secondary),
            )));
            lines.extend(self.footer.iter().map(|a| Line::from(a.clone())));
        }

        let visible = area.height.saturating_sub(2);
        self.max_scroll = (lines.len() as u16).saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll);

        let log = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Log ({} entries) - Esc to close ", self.entries.len()))
                    .border_style(Style::default().fg(palette.primary)),
            )
            .style(Style::default().bg(palette.paper))
            .scroll((self.scroll_offset, 0));

        f.render_widget(Clear, area);
        f.render_widget(log, area);
    }
}

impl Default for LogWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tracing::Level;

    #[test]
    fn test_refresh_snapshots_buffer() {
        let buffer = LogRingBuffer::new();
        buffer.push(LogEntry::new(Level::INFO, "store", "table/setRows".into()));
        buffer.push(LogEntry::new(Level::WARN, "store", "Failed to persist".into()));

        let mut widget = LogWidget::new();
        widget.refresh(Some(&buffer), vec!["table/deleteRow(5)".into()]);
        assert_eq!(widget.line_count(), 4);
    }

    #[test]
    fn test_close_keys() {
        let mut widget = LogWidget::new();
        assert!(!widget.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
        assert!(widget.handle_key(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE)));
    }
}
