// Maps keyboard input to actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::ui::actions::{Action, ActionContext, AppMode, NavigateAction};

/// Maps keyboard input to actions based on context
pub struct KeyMapper {
    /// Static mappings that don't depend on mode
    global_mappings: HashMap<(KeyCode, KeyModifiers), Action>,

    /// Mode-specific mappings
    mode_mappings: HashMap<AppMode, HashMap<(KeyCode, KeyModifiers), Action>>,

    /// Vim-style count buffer for motions
    count_buffer: String,
}

impl KeyMapper {
    pub fn new() -> Self {
        let mut mapper = Self {
            global_mappings: HashMap::new(),
            mode_mappings: HashMap::new(),
            count_buffer: String::new(),
        };

        mapper.init_global_mappings();
        mapper.init_browse_mappings();
        mapper
    }

    /// Initialize mappings that work regardless of mode
    fn init_global_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        self.global_mappings
            .insert((Char('c'), Mod::CONTROL), Action::ForceQuit);
        self.global_mappings
            .insert((Char('C'), Mod::CONTROL), Action::ForceQuit);
    }

    /// Initialize Browse mode mappings
    fn init_browse_mappings(&mut self) {
        use KeyCode::*;
        use KeyModifiers as Mod;

        let mut mappings = HashMap::new();

        mappings.insert((Up, Mod::NONE), Action::Navigate(NavigateAction::Up(1)));
        mappings.insert((Down, Mod::NONE), Action::Navigate(NavigateAction::Down(1)));
        mappings.insert((Left, Mod::NONE), Action::Navigate(NavigateAction::Left(1)));
        mappings.insert(
            (Right, Mod::NONE),
            Action::Navigate(NavigateAction::Right(1)),
        );
        mappings.insert((Home, Mod::NONE), Action::Navigate(NavigateAction::Home));
        mappings.insert((End, Mod::NONE), Action::Navigate(NavigateAction::End));

        // Vim navigation
        mappings.insert(
            (Char('h'), Mod::NONE),
            Action::Navigate(NavigateAction::Left(1)),
        );
        mappings.insert(
            (Char('j'), Mod::NONE),
            Action::Navigate(NavigateAction::Down(1)),
        );
        mappings.insert(
            (Char('k'), Mod::NONE),
            Action::Navigate(NavigateAction::Up(1)),
        );
        mappings.insert(
            (Char('l'), Mod::NONE),
            Action::Navigate(NavigateAction::Right(1)),
        );

        // Paging
        mappings.insert((PageDown, Mod::NONE), Action::NextPage);
        mappings.insert((PageUp, Mod::NONE), Action::PreviousPage);
        mappings.insert((Char('n'), Mod::NONE), Action::NextPage);
        mappings.insert((Char('p'), Mod::NONE), Action::PreviousPage);
        mappings.insert((Char('z'), Mod::NONE), Action::CyclePageSize);

        // Grid operations
        mappings.insert((Char('s'), Mod::NONE), Action::Sort);
        mappings.insert((Char('/'), Mod::NONE), Action::StartSearch);
        mappings.insert((Char('e'), Mod::NONE), Action::ToggleEditMode);
        mappings.insert((Enter, Mod::NONE), Action::Activate);
        mappings.insert((Char('d'), Mod::NONE), Action::DeleteRow);
        mappings.insert((Char('m'), Mod::NONE), Action::ToggleColumnDrag);
        mappings.insert((Esc, Mod::NONE), Action::ExitCurrentMode);

        // Dialogs and data
        mappings.insert((Char('c'), Mod::NONE), Action::ManageColumns);
        mappings.insert((Char('i'), Mod::NONE), Action::Import);
        mappings.insert((Char('x'), Mod::NONE), Action::Export);
        mappings.insert((Char('t'), Mod::NONE), Action::ToggleTheme);

        // Views
        mappings.insert((F(1), Mod::NONE), Action::ShowHelp);
        mappings.insert((Char('?'), Mod::NONE), Action::ShowHelp);
        mappings.insert((Char('?'), Mod::SHIFT), Action::ShowHelp);
        mappings.insert((F(5), Mod::NONE), Action::ShowLog);

        mappings.insert((Char('q'), Mod::NONE), Action::Quit);

        self.mode_mappings.insert(AppMode::Browse, mappings);
    }

    /// Map a key event to an action based on current context
    pub fn map_key(&mut self, key: KeyEvent, context: &ActionContext) -> Option<Action> {
        // Handle vim-style counts (e.g., "5j" for moving down 5 lines)
        if context.mode == AppMode::Browse {
            if let KeyCode::Char(c) = key.code {
                if c.is_ascii_digit() && key.modifiers.is_empty() {
                    self.count_buffer.push(c);
                    return None; // Collecting count, no action yet
                }
            }
        }

        let action = self.map_key_internal(key, context);

        // Apply count if we have one
        if !self.count_buffer.is_empty() {
            if let Some(mut action) = action {
                if let Ok(count) = self.count_buffer.parse::<usize>() {
                    action = self.apply_count_to_action(action, count);
                }
                self.count_buffer.clear();
                return Some(action);
            }
            self.count_buffer.clear();
        }

        action
    }

    /// Internal key mapping without count handling
    fn map_key_internal(&self, key: KeyEvent, context: &ActionContext) -> Option<Action> {
        let key_combo = (key.code, key.modifiers);

        if let Some(action) = self.global_mappings.get(&key_combo) {
            return Some(action.clone());
        }

        self.mode_mappings
            .get(&context.mode)
            .and_then(|mappings| mappings.get(&key_combo))
            .cloned()
    }

    /// Apply a count to an action (for vim-style motions)
    fn apply_count_to_action(&self, action: Action, count: usize) -> Action {
        match action {
            Action::Navigate(NavigateAction::Up(_)) => Action::Navigate(NavigateAction::Up(count)),
            Action::Navigate(NavigateAction::Down(_)) => {
                Action::Navigate(NavigateAction::Down(count))
            }
            Action::Navigate(NavigateAction::Left(_)) => {
                Action::Navigate(NavigateAction::Left(count))
            }
            Action::Navigate(NavigateAction::Right(_)) => {
                Action::Navigate(NavigateAction::Right(count))
            }
            // Other actions don't support counts
            _ => action,
        }
    }

    /// Clear any pending state (like count buffer)
    pub fn clear_pending(&mut self) {
        self.count_buffer.clear();
    }

    /// Get the current count buffer for display
    pub fn get_count_buffer(&self) -> &str {
        &self.count_buffer
    }
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::grid_view::ViewMode;

    fn context(mode: AppMode) -> ActionContext {
        ActionContext {
            mode,
            view_mode: ViewMode::Browsing,
            dragging_column: false,
            page_row_count: 10,
            column_count: 4,
            page: 0,
            has_next_page: true,
        }
    }

    #[test]
    fn test_basic_navigation_mapping() {
        let mut mapper = KeyMapper::new();
        let context = context(AppMode::Browse);

        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(
            mapper.map_key(key, &context),
            Some(Action::Navigate(NavigateAction::Down(1)))
        );

        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(
            mapper.map_key(key, &context),
            Some(Action::Navigate(NavigateAction::Down(1)))
        );
    }

    #[test]
    fn test_vim_count_motion() {
        let mut mapper = KeyMapper::new();
        let context = context(AppMode::Browse);

        let key = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(mapper.map_key(key, &context), None);
        assert_eq!(mapper.get_count_buffer(), "3");

        let key = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(
            mapper.map_key(key, &context),
            Some(Action::Navigate(NavigateAction::Right(3)))
        );
        assert_eq!(mapper.get_count_buffer(), "");
    }

    #[test]
    fn test_grid_bindings() {
        let mut mapper = KeyMapper::new();
        let context = context(AppMode::Browse);
        let cases = [
            (KeyCode::Char('s'), Action::Sort),
            (KeyCode::Char('e'), Action::ToggleEditMode),
            (KeyCode::Enter, Action::Activate),
            (KeyCode::Char('m'), Action::ToggleColumnDrag),
            (KeyCode::PageDown, Action::NextPage),
            (KeyCode::Char('z'), Action::CyclePageSize),
            (KeyCode::Char('t'), Action::ToggleTheme),
            (KeyCode::F(5), Action::ShowLog),
        ];
        for (code, expected) in cases {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(mapper.map_key(key, &context), Some(expected));
        }
    }

    #[test]
    fn test_other_modes_only_see_globals() {
        let mut mapper = KeyMapper::new();
        let context = context(AppMode::Search);

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(mapper.map_key(key, &context), None);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(mapper.map_key(key, &context), Some(Action::ForceQuit));
    }
}
