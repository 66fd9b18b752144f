use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_editor_key(key_event: KeyEvent) -> EditorAction {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        match key_event.code {
            KeyCode::Char('c') if ctrl => EditorAction::Quit,
            KeyCode::Char('z') | KeyCode::Char('u') if ctrl => EditorAction::Undo,
            KeyCode::Char('y') | KeyCode::Char('r') if ctrl => EditorAction::Redo,
            KeyCode::Char(_) if ctrl => EditorAction::None,
            KeyCode::Esc => EditorAction::Quit,
            KeyCode::F(1) => EditorAction::ToggleHelpMode,
            KeyCode::Enter => EditorAction::Commit,
            KeyCode::Backspace => EditorAction::Backspace,
            KeyCode::Delete => EditorAction::Delete,
            KeyCode::Left => EditorAction::MoveCursorLeft,
            KeyCode::Right => EditorAction::MoveCursorRight,
            KeyCode::Home => EditorAction::MoveCursorHome,
            KeyCode::End => EditorAction::MoveCursorEnd,
            KeyCode::Char(c) => EditorAction::InsertChar(c),
            _ => EditorAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::F(1) => HelpModeAction::ExitHelpMode,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                HelpModeAction::Quit
            }
            _ => HelpModeAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum EditorAction {
    None,
    Quit,
    ToggleHelpMode,
    Commit,
    Undo,
    Redo,
    Backspace,
    Delete,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    InsertChar(char),
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
    Quit,
}
