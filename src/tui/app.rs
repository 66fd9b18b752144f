use crate::tui::handlers::{EditorAction, HelpModeAction, KeyHandler};
use anyhow::Result;
use crossterm::event::KeyEvent;
use edit_history::history::EditHistory;

/// Single-line editor backed by an [`EditHistory`] of buffer snapshots.
///
/// Keystrokes revise the current entry in place. After Enter, undo or redo
/// the next keystroke starts a fresh entry, so each committed snapshot
/// survives as its own undo step.
#[derive(Debug)]
pub struct App {
    pub history: EditHistory<String>,
    pub buffer: String,
    pub cursor_position: usize,
    pub should_quit: bool,
    pub help_mode: bool,
    pub status_message: Option<String>,
    start_new_entry: bool,
}

impl App {
    pub fn new(history: EditHistory<String>) -> Self {
        let mut app = Self {
            history,
            buffer: String::new(),
            cursor_position: 0,
            should_quit: false,
            help_mode: false,
            status_message: None,
            start_new_entry: false,
        };
        match app.history.peek() {
            Some(current) => app.buffer = current.clone(),
            None => app.history.push(String::new()),
        }
        app.cursor_position = app.buffer.len();
        app
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.help_mode {
            self.handle_help_mode_key(key_event)
        } else {
            self.handle_editor_key(key_event)
        }
    }

    fn handle_editor_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match KeyHandler::handle_editor_key(key_event) {
            EditorAction::None => {}
            EditorAction::Quit => self.should_quit = true,
            EditorAction::ToggleHelpMode => self.help_mode = true,
            EditorAction::Commit => self.commit(),
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
            EditorAction::Backspace => self.backspace(),
            EditorAction::Delete => self.delete(),
            EditorAction::MoveCursorLeft => self.move_cursor_left(),
            EditorAction::MoveCursorRight => self.move_cursor_right(),
            EditorAction::MoveCursorHome => self.cursor_position = 0,
            EditorAction::MoveCursorEnd => self.cursor_position = self.buffer.len(),
            EditorAction::InsertChar(c) => self.insert_char(c),
        }
        Ok(())
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match KeyHandler::handle_help_mode_key(key_event) {
            HelpModeAction::ExitHelpMode => self.help_mode = false,
            HelpModeAction::Quit => self.should_quit = true,
            HelpModeAction::None => {}
        }
        Ok(())
    }

    fn commit(&mut self) {
        self.start_new_entry = true;
        self.status_message = Some(format!("Committed \"{}\"", self.buffer));
    }

    fn undo(&mut self) {
        match self.history.undo().cloned() {
            Some(restored) => {
                self.restore(restored);
                self.status_message = None;
            }
            None => self.status_message = Some("Nothing to undo".to_string()),
        }
    }

    fn redo(&mut self) {
        match self.history.redo().cloned() {
            Some(restored) => {
                self.restore(restored);
                self.status_message = None;
            }
            None => self.status_message = Some("Nothing to redo".to_string()),
        }
    }

    fn restore(&mut self, text: String) {
        self.buffer = text;
        self.cursor_position = self.buffer.len();
        self.start_new_entry = true;
    }

    /// Records the buffer after a text change.
    fn record_change(&mut self) {
        if self.start_new_entry {
            self.history.push(self.buffer.clone());
            self.start_new_entry = false;
        } else {
            self.history.edit(self.buffer.clone());
        }
        self.status_message = None;
    }

    fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
        self.record_change();
    }

    fn backspace(&mut self) {
        if let Some(previous) = self.buffer[..self.cursor_position].chars().next_back() {
            self.cursor_position -= previous.len_utf8();
            self.buffer.remove(self.cursor_position);
            self.record_change();
        }
    }

    fn delete(&mut self) {
        if self.cursor_position < self.buffer.len() {
            self.buffer.remove(self.cursor_position);
            self.record_change();
        }
    }

    fn move_cursor_left(&mut self) {
        if let Some(previous) = self.buffer[..self.cursor_position].chars().next_back() {
            self.cursor_position -= previous.len_utf8();
        }
    }

    fn move_cursor_right(&mut self) {
        if let Some(next) = self.buffer[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn create_test_app() -> App {
        App::new(EditHistory::new(3).unwrap())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(KeyEvent::from(KeyCode::Char(c))).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code)).unwrap();
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
            .unwrap();
    }

    #[test]
    fn test_new_app_starts_with_empty_entry() {
        let app = create_test_app();
        assert_eq!(app.buffer, "");
        assert_eq!(app.history.peek(), Some(&String::new()));
        assert_eq!(app.history.undo_amount(), 0);
    }

    #[test]
    fn test_new_app_resumes_existing_history() {
        let mut history = EditHistory::new(3).unwrap();
        history.push("draft".to_string());
        let app = App::new(history);
        assert_eq!(app.buffer, "draft");
        assert_eq!(app.cursor_position, 5);
    }

    #[test]
    fn test_typing_edits_current_entry() {
        let mut app = create_test_app();
        type_text(&mut app, "abc");
        assert_eq!(app.buffer, "abc");
        assert_eq!(app.history.peek(), Some(&"abc".to_string()));
        assert_eq!(app.history.undo_amount(), 0);
    }

    #[test]
    fn test_commit_then_typing_pushes_new_entry() {
        let mut app = create_test_app();
        type_text(&mut app, "ab");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "cd");

        assert_eq!(app.buffer, "abcd");
        assert_eq!(app.history.undo_amount(), 1);
        assert_eq!(app.history.past().cloned().collect::<Vec<_>>(), vec!["ab"]);
    }

    #[test]
    fn test_undo_and_redo_restore_buffer() {
        let mut app = create_test_app();
        type_text(&mut app, "one");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, " two");

        ctrl(&mut app, 'z');
        assert_eq!(app.buffer, "one");
        assert_eq!(app.cursor_position, 3);
        assert_eq!(app.history.redo_amount(), 1);

        ctrl(&mut app, 'y');
        assert_eq!(app.buffer, "one two");
        assert_eq!(app.history.redo_amount(), 0);
    }

    #[test]
    fn test_typing_after_undo_discards_redo() {
        let mut app = create_test_app();
        type_text(&mut app, "a");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "b");
        ctrl(&mut app, 'z');

        type_text(&mut app, "x");
        assert_eq!(app.buffer, "ax");
        assert_eq!(app.history.redo_amount(), 0);
        // The restored entry is kept; the new text is its own step.
        assert_eq!(app.history.undo_amount(), 1);
        ctrl(&mut app, 'z');
        assert_eq!(app.buffer, "a");
    }

    #[test]
    fn test_undo_with_nothing_to_undo() {
        let mut app = create_test_app();
        type_text(&mut app, "abc");
        ctrl(&mut app, 'z');
        assert_eq!(app.buffer, "abc");
        assert_eq!(app.status_message.as_deref(), Some("Nothing to undo"));

        ctrl(&mut app, 'y');
        assert_eq!(app.status_message.as_deref(), Some("Nothing to redo"));
    }

    #[test]
    fn test_cursor_editing_with_multibyte_chars() {
        let mut app = create_test_app();
        type_text(&mut app, "héllo");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.buffer, "hllo");

        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.buffer, "hll");
        press(&mut app, KeyCode::Left);
        type_text(&mut app, "é");
        assert_eq!(app.buffer, "hlél");
        assert_eq!(app.history.peek(), Some(&"hlél".to_string()));
    }

    #[test]
    fn test_backspace_at_start_does_nothing() {
        let mut app = create_test_app();
        type_text(&mut app, "a");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.buffer, "a");
        // No change was recorded, so the commit is still pending.
        assert_eq!(app.history.undo_amount(), 0);
    }

    #[test]
    fn test_eviction_through_editor() {
        let mut app = create_test_app();
        for word in ["a", "b", "c", "d", "e"] {
            type_text(&mut app, word);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.history.undo_amount(), 3);
        while app.history.can_undo() {
            ctrl(&mut app, 'z');
        }
        assert_eq!(app.buffer, "ab");
    }

    #[test]
    fn test_help_mode_toggle() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::F(1));
        assert!(app.help_mode);

        // Typing in help mode does not touch the buffer.
        type_text(&mut app, "x");
        assert_eq!(app.buffer, "");

        press(&mut app, KeyCode::Esc);
        assert!(!app.help_mode);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_escape_quits_editor() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
