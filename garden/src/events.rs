//! Event handling for the garden TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::ui::Overlay;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.is_editing() {
        return handle_dialog_key(app, key);
    }
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }
    handle_garden_key(app, key)
}

/// Keys while browsing the garden
fn handle_garden_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('n') | KeyCode::Char('p') => {
            app.start_planting();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.open_selected();
            EventResult::NeedsRedraw
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Tab | KeyCode::Char('l') | KeyCode::Char('j') => {
            app.select_next();
            EventResult::NeedsRedraw
        }
        KeyCode::Left | KeyCode::Up | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('k') => {
            app.select_prev();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('a') => {
            app.toggle_about();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,
        _ => EventResult::Continue,
    }
}

/// Keys in the planting and reflecting dialogs (free text input)
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            if !app.submit() {
                if app.is_loading() {
                    app.set_status("Still listening for the next question...");
                } else if app.input_buffer().trim().is_empty() {
                    app.set_status("Write a few words first");
                }
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Keys while About or Help is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char(' ') => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('?') if matches!(app.overlay(), Some(Overlay::Help)) => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('a') if matches!(app.overlay(), Some(Overlay::About)) => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::testing::{seeded_rng, ScriptedFollowUps};
    use garden_core::{FollowUpGenerator, GardenSession, GardenStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn app_in(dir: &std::path::Path) -> App {
        let generator: Arc<dyn FollowUpGenerator> = Arc::new(ScriptedFollowUps::default());
        let session =
            GardenSession::with_parts(GardenStore::in_dir(dir), generator, seeded_rng(3)).await;
        App::new(session)
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut app = app_in(temp_dir.path()).await;

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, ctrl_c), EventResult::Quit);

        // First run opens About; q closes it rather than quitting.
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('q'))), EventResult::NeedsRedraw);
        assert!(!app.has_overlay());
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('q'))), EventResult::Quit);
    }

    #[tokio::test]
    async fn test_typing_in_dialog_does_not_trigger_hotkeys() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut app = app_in(temp_dir.path()).await;
        handle_event(&mut app, key(KeyCode::Esc));

        handle_event(&mut app, key(KeyCode::Char('n')));
        assert!(app.is_editing());

        for c in "quiet".chars() {
            assert_eq!(handle_event(&mut app, key(KeyCode::Char(c))), EventResult::NeedsRedraw);
        }
        assert_eq!(app.input_buffer(), "quiet");

        handle_event(&mut app, key(KeyCode::Enter));
        assert!(!app.has_overlay());
        assert!(app.pending_action.is_some());
    }

    #[tokio::test]
    async fn test_keys_ignored_while_question_loads() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut app = app_in(temp_dir.path()).await;
        handle_event(&mut app, key(KeyCode::Esc));

        handle_event(&mut app, key(KeyCode::Char('n')));
        for c in "roots".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_event(&mut app, key(KeyCode::Enter));
        app.run_pending().await;

        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.is_loading());

        for c in "hidden".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.input_buffer(), "");

        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.is_loading());
        assert!(app.pending_action.is_none());
    }

    #[tokio::test]
    async fn test_enter_with_blank_input_keeps_dialog() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut app = app_in(temp_dir.path()).await;
        handle_event(&mut app, key(KeyCode::Esc));

        handle_event(&mut app, key(KeyCode::Char('n')));
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.is_editing());
        assert!(app.pending_action.is_none());

        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.has_overlay());
    }
}
