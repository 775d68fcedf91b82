use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::Palette;

/// Actions that can be returned from the help widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    None,
    Exit,
    ScrollUp,
    ScrollDown,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpSection {
    Table,
    Editing,
    Columns,
    Data,
}

impl HelpSection {
    fn title(self) -> &'static str {
        match self {
            HelpSection::Table => "Table",
            HelpSection::Editing => "Editing",
            HelpSection::Columns => "Columns",
            HelpSection::Data => "Data & Display",
        }
    }

    fn bindings(self) -> &'static [(&'static str, &'static str)] {
        match self {
            HelpSection::Table => &[
                ("↑↓←→ / hjkl", "Move the cursor"),
                ("Home / End", "First / last row on the page"),
                ("s", "Sort by the current column (again to reverse)"),
                ("/", "Search every visible column"),
                ("n / PgDn", "Next page"),
                ("p / PgUp", "Previous page"),
                ("z", "Cycle rows per page: 5, 10, 20"),
            ],
            HelpSection::Editing => &[
                ("e", "Toggle edit mode"),
                ("Enter", "Edit the current cell, Enter again to save"),
                ("Esc", "Leave the cell, saving it like Enter"),
                ("d", "Delete the current row"),
            ],
            HelpSection::Columns => &[
                ("m", "Pick up the current column, move, m/Enter to drop"),
                ("Esc", "Put a picked-up column back"),
                ("c", "Show, hide and add columns"),
            ],
            HelpSection::Data => &[
                ("i", "Import rows from a CSV file"),
                ("x", "Export visible columns to CSV"),
                ("t", "Switch light / dark theme"),
                ("F5", "Show the log"),
                ("F1 / ?", "This help"),
                ("q", "Quit"),
            ],
        }
    }
}

const SECTIONS: [HelpSection; 4] = [
    HelpSection::Table,
    HelpSection::Editing,
    HelpSection::Columns,
    HelpSection::Data,
];

/// Help overlay listing the key bindings
pub struct HelpWidget {
    scroll_offset: u16,
    max_scroll: u16,
}

impl HelpWidget {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            max_scroll: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> HelpAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) | KeyCode::Char('?') => {
                HelpAction::Exit
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll);
                HelpAction::ScrollDown
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                HelpAction::ScrollUp
            }
            KeyCode::Char('G') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.scroll_offset = self.max_scroll;
                HelpAction::End
            }
            KeyCode::End => {
                self.scroll_offset = self.max_scroll;
                HelpAction::End
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.scroll_offset = 0;
                HelpAction::Home
            }
            _ => HelpAction::None,
        }
    }

    fn build_text(palette: &Palette) -> Text<'static> {
        let mut lines = Vec::new();
        for section in SECTIONS {
            lines.push(Line::from(Span::styled(
                section.title(),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            )));
            for (keys, description) in section.bindings() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<14}", keys),
                        Style::default().fg(palette.secondary),
                    ),
                    Span::styled(*description, Style::default().fg(palette.text)),
                ]));
            }
            lines.push(Line::from(""));
        }
        Text::from(lines)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let text = Self::build_text(palette);
        let visible = area.height.saturating_sub(2);
        self.max_scroll = (text.lines.len() as u16).saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll);

        let help = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Esc to close ")
                    .border_style(Style::default().fg(palette.primary)),
            )
            .style(Style::default().bg(palette.paper))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0));

        f.render_widget(Clear, area);
        f.render_widget(help, area);
    }
}

impl Default for HelpWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{design_tokens, ColorMode};

    #[test]
    fn test_exit_keys() {
        let mut widget = HelpWidget::new();
        for code in [KeyCode::Esc, KeyCode::F(1), KeyCode::Char('?')] {
            assert_eq!(
                widget.handle_key(KeyEvent::new(code, KeyModifiers::NONE)),
                HelpAction::Exit
            );
        }
    }

    #[test]
    fn test_every_section_is_listed() {
        let text = HelpWidget::build_text(&design_tokens(ColorMode::Light));
        let rendered: Vec<String> = text.lines.iter().map(|l| l.to_string()).collect();
        for section in SECTIONS {
            assert!(rendered.iter().any(|l| l == section.title()));
        }
    }
}
