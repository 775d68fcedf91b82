// Action system for UI operations
// Keys are mapped to actions first, then dispatched by the app

use crate::ui::grid_view::ViewMode;

/// Which surface currently owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Moving around the grid
    Browse,
    /// Typing into the search box
    Search,
    /// Typing into an open cell
    EditCell,
    /// Column visibility dialog
    ColumnManager,
    /// Asking for a file path
    Prompt,
    /// Yes/no question (delete confirmation)
    Confirm,
    /// Blocking message, any key dismisses
    Alert,
    Help,
    Log,
}

/// All possible actions that can be triggered from the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(NavigateAction),

    // Grid operations
    Sort,
    StartSearch,
    ToggleEditMode,
    /// Open the current cell, or drop a picked-up column
    Activate,
    DeleteRow,
    ToggleColumnDrag,
    ExitCurrentMode,

    // Paging
    NextPage,
    PreviousPage,
    CyclePageSize,

    // Dialogs and data
    ManageColumns,
    Import,
    Export,
    ToggleTheme,

    // View operations
    ShowHelp,
    ShowLog,

    // Application control
    Quit,
    ForceQuit,
}

/// Navigation actions with optional counts for vim-style motions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateAction {
    Up(usize),
    Down(usize),
    Left(usize),
    Right(usize),
    Home,
    End,
}

/// Context needed to determine action availability
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub mode: AppMode,
    pub view_mode: ViewMode,
    pub dragging_column: bool,
    pub page_row_count: usize,
    pub column_count: usize,
    pub page: usize,
    pub has_next_page: bool,
}

/// Default implementation for checking action availability
pub fn can_perform_action(action: &Action, context: &ActionContext) -> bool {
    if context.mode != AppMode::Browse {
        return matches!(action, Action::ForceQuit);
    }

    match action {
        Action::Navigate(NavigateAction::Left(_) | NavigateAction::Right(_)) => {
            context.column_count > 0
        }
        Action::Navigate(_) => context.page_row_count > 0,

        // Cells only open in edit mode, and never mid-drag
        Action::Activate if context.dragging_column => true,
        Action::Activate => {
            context.view_mode == ViewMode::EditingEnabled && context.page_row_count > 0
        }

        Action::DeleteRow => context.page_row_count > 0 && !context.dragging_column,
        Action::Sort | Action::ToggleColumnDrag => context.column_count > 0,

        // Page buttons are disabled at the ends
        Action::NextPage => context.has_next_page,
        Action::PreviousPage => context.page > 0,

        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browse_context() -> ActionContext {
        ActionContext {
            mode: AppMode::Browse,
            view_mode: ViewMode::Browsing,
            dragging_column: false,
            page_row_count: 10,
            column_count: 4,
            page: 0,
            has_next_page: true,
        }
    }

    #[test]
    fn test_navigation_action_creation() {
        let action = Action::Navigate(NavigateAction::Down(5));
        assert_eq!(action, Action::Navigate(NavigateAction::Down(5)));
    }

    #[test]
    fn test_activate_needs_edit_mode() {
        let mut context = browse_context();
        assert!(!can_perform_action(&Action::Activate, &context));

        context.view_mode = ViewMode::EditingEnabled;
        assert!(can_perform_action(&Action::Activate, &context));

        // Dropping a column works in either mode
        context.view_mode = ViewMode::Browsing;
        context.dragging_column = true;
        assert!(can_perform_action(&Action::Activate, &context));
    }

    #[test]
    fn test_page_buttons_disable_at_ends() {
        let mut context = browse_context();
        assert!(can_perform_action(&Action::NextPage, &context));
        assert!(!can_perform_action(&Action::PreviousPage, &context));

        context.page = 1;
        context.has_next_page = false;
        assert!(!can_perform_action(&Action::NextPage, &context));
        assert!(can_perform_action(&Action::PreviousPage, &context));
    }

    #[test]
    fn test_modal_modes_block_grid_actions() {
        let mut context = browse_context();
        context.mode = AppMode::Confirm;
        assert!(!can_perform_action(&Action::DeleteRow, &context));
        assert!(can_perform_action(&Action::ForceQuit, &context));
    }
}
