use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // first 'g' of 'gg'
    /// Jump to the nav item at this index
    GoToSection(usize),
    HireMe,
    ToggleMenu,
    MenuUp,
    MenuDown,
    MenuSelect,
    CloseMenu,
    OpenProjects,
    ListUp,
    ListDown,
    Select,
    OpenGithub,
    OpenLive,
    OpenContact,
    NextField,
    PrevField,
    InputChar(char),
    Newline,
    Backspace,
    Submit,
    ShowHelp,
    Back,
    None,
}

/// Map a key press to an action for the current mode
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.mode {
        Mode::Help => return Action::Back,
        Mode::Contact => return handle_contact_mode(key),
        Mode::ProjectPicker { .. } => return handle_picker_mode(key),
        Mode::ProjectDetail { .. } => return handle_detail_mode(key),
        Mode::Normal => {}
    }

    if app.is_menu_open() {
        return handle_menu_mode(key);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::PageDown,

        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,

        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoToSection(c as usize - '1' as usize)
        }
        (KeyCode::Char('H'), _) => Action::HireMe,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::ToggleMenu,

        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::OpenProjects,
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::OpenContact,
        (KeyCode::Char('?'), _) => Action::ShowHelp,

        _ => Action::None,
    }
}

fn handle_menu_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MenuDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MenuUp,
        KeyCode::Enter => Action::MenuSelect,
        KeyCode::Char(c @ '1'..='9') => Action::GoToSection(c as usize - '1' as usize),
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => Action::CloseMenu,
        _ => Action::None,
    }
}

fn handle_picker_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Action::ListDown,
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Action::ListUp,
        KeyCode::Enter | KeyCode::Char('l') => Action::Select,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('p') => Action::Back,
        _ => Action::None,
    }
}

fn handle_detail_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('o') => Action::OpenGithub,
        KeyCode::Char('b') => Action::OpenLive,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Backspace => Action::Back,
        _ => Action::None,
    }
}

/// Text entry: every printable key goes into the focused field
fn handle_contact_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => Action::Submit,
        (KeyCode::Esc, _) => Action::Back,
        (KeyCode::Tab, _) => Action::NextField,
        (KeyCode::BackTab, _) => Action::PrevField,
        (KeyCode::Enter, _) => Action::Newline,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::content::ContentStore;
    use folio_core::AppConfig;
    use std::sync::Arc;

    use crate::theme::Theme;

    fn app() -> App {
        let portfolio = ContentStore::builtin().unwrap();
        App::new(Arc::new(AppConfig::default()), portfolio, Theme::default(), 2026).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_normal_mode_bindings() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ScrollDown);
        assert_eq!(handle_key_event(ctrl('d'), &app), Action::HalfPageDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('3')), &app), Action::GoToSection(2));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT), &app),
            Action::HireMe
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
    }

    #[test]
    fn test_second_g_jumps_to_top() {
        let mut app = app();
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);
    }

    #[test]
    fn test_contact_mode_captures_text() {
        let mut app = app();
        app.mode = Mode::Contact;
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::InputChar('q'));
        assert_eq!(handle_key_event(ctrl('s'), &app), Action::Submit);
        assert_eq!(handle_key_event(key(KeyCode::Tab), &app), Action::NextField);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::Back);
        assert_eq!(handle_key_event(ctrl('c'), &app), Action::Quit);
    }

    #[test]
    fn test_menu_overlay_bindings() {
        let mut app = app();
        app.nav.toggle_menu();
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::MenuDown);
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::MenuSelect);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::CloseMenu);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        app.mode = Mode::Help;
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app), Action::Back);
    }
}
