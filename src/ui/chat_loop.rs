//! Main chat event loop
//!
//! Owns the terminal lifecycle, polls keyboard input, dispatches it to the
//! focused surface (picker, search overlay, playground, or composer), and
//! drains simulated work from the responder channel between frames.

use std::{error::Error, io, time::Duration};

use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::commands::{process_input, CommandResult};
use crate::core::app::{App, AppInit};
use crate::core::config::Config;
use crate::core::responder::{ResponderEvent, ResponderService};
use crate::ui::renderer::ui;
use crate::ui::sidebar::right_sidebar_items;
use crate::utils::input::{
    delete_at_cursor, delete_before_cursor, insert_char, move_end, move_home, move_left,
    move_right, sanitize_text_input,
};

pub async fn run_chat(init: AppInit) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let (responder, mut events) = ResponderService::new();
    let mut app = App::new(config, responder, init)?;
    app.start_sign_in();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut mpsc::UnboundedReceiver<(ResponderEvent, u64)>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(app, key) {
                        return Ok(());
                    }
                }
                Event::Paste(text) => handle_paste(app, &text),
                _ => {}
            }
        }

        // Drain simulated work delivered since the last frame.
        while let Ok((event, request_id)) = events.try_recv() {
            app.handle_responder_event(event, request_id);
        }
    }
}

fn handle_paste(app: &mut App, text: &str) {
    let sanitized = sanitize_text_input(text);
    if app.ui.picker.is_some() {
        return;
    }
    if let Some(search) = app.ui.search.as_mut() {
        search.term.push_str(sanitized.replace('\n', " ").trim_end());
        app.search_term_changed();
        return;
    }
    if let Some(playground) = app.ui.playground.as_mut() {
        for c in sanitized.chars() {
            insert_char(&mut playground.buffer, &mut playground.cursor, c);
        }
        return;
    }
    app.ui.insert_into_input(&sanitized);
}

/// Returns true when the application should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if key.code == KeyCode::Char('c') && ctrl {
        return true;
    }

    if app.ui.picker.is_some() {
        handle_picker_key(app, key);
        return false;
    }
    if app.ui.search.is_some() {
        handle_search_key(app, key, ctrl);
        return false;
    }
    if app.ui.playground.is_some() {
        handle_playground_key(app, key, ctrl);
        return false;
    }

    match key.code {
        KeyCode::Char('b') if ctrl => {
            app.ui.sidebar_expanded = !app.ui.sidebar_expanded;
        }
        KeyCode::Char('g') if ctrl => {
            app.ui.show_right_sidebar = !app.ui.show_right_sidebar;
            app.ui.right_selected = 0;
        }
        KeyCode::Char('e') if ctrl => {
            app.ui.composer_expanded = !app.ui.composer_expanded;
        }
        KeyCode::Char('n') if ctrl => app.new_chat(),
        KeyCode::Char('p') if ctrl => app.open_provider_picker(),
        KeyCode::Char('f') if ctrl => app.open_brief_search(),
        KeyCode::Esc => {
            if !app.cancel_reply() {
                if app.ui.selected_brief.is_some() {
                    app.close_brief_panel();
                } else {
                    app.ui.clear_status();
                }
            }
        }
        KeyCode::Tab => {
            if app.ui.show_right_sidebar {
                app.ui.right_tab = app.ui.right_tab.toggled();
                app.ui.right_selected = 0;
            } else if welcome_visible(app) {
                app.ui.welcome_tab = app.ui.welcome_tab.next();
            }
        }
        KeyCode::Up if app.ui.show_right_sidebar => {
            app.ui.right_selected = app.ui.right_selected.saturating_sub(1);
        }
        KeyCode::Down if app.ui.show_right_sidebar => {
            let len = right_sidebar_items(app.ui.right_tab).len();
            if len > 0 {
                app.ui.right_selected = (app.ui.right_selected + 1).min(len - 1);
            }
        }
        KeyCode::PageUp if app.ui.selected_brief.is_some() => {
            app.ui.brief_panel_scroll = app.ui.brief_panel_scroll.saturating_sub(3);
        }
        KeyCode::PageDown if app.ui.selected_brief.is_some() => {
            app.ui.brief_panel_scroll = app.ui.brief_panel_scroll.saturating_add(3);
        }
        KeyCode::Enter if alt => {
            insert_char(&mut app.ui.input, &mut app.ui.input_cursor, '\n');
        }
        KeyCode::Enter => {
            if app.ui.show_right_sidebar {
                let items = right_sidebar_items(app.ui.right_tab);
                if let Some(name) = items.get(app.ui.right_selected) {
                    app.ui.insert_into_input(name);
                }
                app.ui.show_right_sidebar = false;
            } else if welcome_visible(app) && app.ui.input.trim().is_empty() {
                app.new_chat();
            } else {
                submit_input(app);
            }
        }
        KeyCode::Backspace => {
            delete_before_cursor(&mut app.ui.input, &mut app.ui.input_cursor);
        }
        KeyCode::Delete => {
            delete_at_cursor(&mut app.ui.input, &mut app.ui.input_cursor);
        }
        KeyCode::Left => move_left(&mut app.ui.input_cursor),
        KeyCode::Right => move_right(&app.ui.input, &mut app.ui.input_cursor),
        KeyCode::Home => move_home(&mut app.ui.input_cursor),
        KeyCode::End => move_end(&app.ui.input, &mut app.ui.input_cursor),
        KeyCode::Char(c) if !ctrl && !alt => {
            insert_char(&mut app.ui.input, &mut app.ui.input_cursor, c);
        }
        _ => {}
    }
    false
}

fn welcome_visible(app: &App) -> bool {
    app.workspace.is_empty() && app.ui.selected_brief.is_none() && app.ui.playground.is_none()
}

fn submit_input(app: &mut App) {
    if app.ui.input.trim().is_empty() {
        return;
    }
    let input = app.ui.input.clone();
    app.ui.clear_input();
    match process_input(app, &input) {
        CommandResult::Continue => {}
        CommandResult::ProcessAsMessage(text) => app.send_prompt(&text),
        CommandResult::OpenProviderPicker => app.open_provider_picker(),
        CommandResult::OpenThemePicker => app.open_theme_picker(),
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_picker(),
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(picker) = app.ui.picker.as_mut() {
                picker.state.move_up();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(picker) = app.ui.picker.as_mut() {
                picker.state.move_down();
            }
        }
        KeyCode::Enter => app.confirm_picker(),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Esc => app.close_brief_search(),
        KeyCode::Char('v') if ctrl => {
            if let Some(brief) = app.ui.search.as_ref().and_then(|s| s.selected_brief()) {
                app.view_brief_on_main(brief);
            }
        }
        KeyCode::Enter => {
            if let Some(brief) = app.ui.search.as_ref().and_then(|s| s.selected_brief()) {
                app.select_brief(brief);
            }
        }
        KeyCode::Up => {
            if let Some(search) = app.ui.search.as_mut() {
                search.move_up();
            }
        }
        KeyCode::Down => {
            if let Some(search) = app.ui.search.as_mut() {
                search.move_down();
            }
        }
        KeyCode::PageDown => app.search_load_more(),
        KeyCode::Backspace => {
            let changed = match app.ui.search.as_mut() {
                Some(search) => search.term.pop().is_some(),
                None => false,
            };
            if changed {
                app.search_term_changed();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(search) = app.ui.search.as_mut() {
                search.term.push(c);
            }
            app.search_term_changed();
        }
        _ => {}
    }
}

fn handle_playground_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    match key.code {
        KeyCode::Esc => app.close_playground(),
        KeyCode::Char('r') if ctrl => app.run_playground(),
        KeyCode::Char('u') if ctrl => app.revert_playground(),
        KeyCode::F(6) => {
            if let Some(playground) = app.ui.playground.as_mut() {
                playground.cycle_language();
            }
        }
        KeyCode::Enter => {
            if let Some(playground) = app.ui.playground.as_mut() {
                insert_char(&mut playground.buffer, &mut playground.cursor, '\n');
            }
        }
        KeyCode::Backspace => {
            if let Some(playground) = app.ui.playground.as_mut() {
                delete_before_cursor(&mut playground.buffer, &mut playground.cursor);
            }
        }
        KeyCode::Delete => {
            if let Some(playground) = app.ui.playground.as_mut() {
                delete_at_cursor(&mut playground.buffer, &mut playground.cursor);
            }
        }
        KeyCode::Left => {
            if let Some(playground) = app.ui.playground.as_mut() {
                move_left(&mut playground.cursor);
            }
        }
        KeyCode::Right => {
            if let Some(playground) = app.ui.playground.as_mut() {
                move_right(&playground.buffer, &mut playground.cursor);
            }
        }
        KeyCode::Home => {
            if let Some(playground) = app.ui.playground.as_mut() {
                move_home(&mut playground.cursor);
            }
        }
        KeyCode::End => {
            if let Some(playground) = app.ui.playground.as_mut() {
                move_end(&playground.buffer, &mut playground.cursor);
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(playground) = app.ui.playground.as_mut() {
                insert_char(&mut playground.buffer, &mut playground.cursor, c);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_app;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press_ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_any_surface() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, press_ctrl('c')));
        app.open_brief_search();
        assert!(handle_key(&mut app, press_ctrl('c')));
    }

    #[test]
    fn typing_edits_the_composer() {
        let mut app = create_test_app();
        for c in "hi".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        assert_eq!(app.ui.input, "hi");
        handle_key(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.ui.input, "h");
    }

    #[test]
    fn enter_on_welcome_with_empty_input_starts_a_conversation() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.workspace.conversations().len(), 1);
        assert_eq!(app.workspace.conversations()[0].model, "GPT-4o");
    }

    #[tokio::test]
    async fn enter_sends_a_typed_prompt() {
        let mut app = create_test_app();
        app.workspace.add_conversation("OpenAI", "GPT-4o");
        for c in "hello".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.ui.input.is_empty());
        assert!(app.ui.is_awaiting_reply);
        assert_eq!(
            app.workspace.conversations()[0].messages[0].content,
            "hello"
        );
    }

    #[test]
    fn alt_enter_inserts_a_newline() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Char('a')));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT),
        );
        handle_key(&mut app, press(KeyCode::Char('b')));
        assert_eq!(app.ui.input, "a\nb");
    }

    #[test]
    fn slash_commands_run_from_the_composer() {
        let mut app = create_test_app();
        for c in "/add openai o1-mini".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.workspace.conversations().len(), 1);
        assert_eq!(app.workspace.conversations()[0].model, "o1-mini");
    }

    #[tokio::test]
    async fn ctrl_f_opens_search_and_typing_filters() {
        let mut app = create_test_app();
        handle_key(&mut app, press_ctrl('f'));
        assert!(app.ui.search.is_some());
        handle_key(&mut app, press(KeyCode::Char('m')));
        assert_eq!(app.ui.search.as_ref().unwrap().term, "m");
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.ui.search.is_none());
    }

    #[tokio::test]
    async fn search_enter_opens_the_side_panel() {
        let mut app = create_test_app();
        app.open_brief_search();
        let id = app.session.current_search_id;
        app.handle_responder_event(
            ResponderEvent::BriefPage {
                start: 0,
                items: crate::core::library::briefs().iter().take(3).collect(),
                has_more: true,
            },
            id,
        );
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.ui.search.is_none());
        assert_eq!(
            app.ui.selected_brief.map(|b| b.id.as_str()),
            Some("2")
        );
    }

    #[tokio::test]
    async fn search_ctrl_v_promotes_to_main() {
        let mut app = create_test_app();
        app.open_brief_search();
        let id = app.session.current_search_id;
        app.handle_responder_event(
            ResponderEvent::BriefPage {
                start: 0,
                items: crate::core::library::briefs().iter().take(3).collect(),
                has_more: true,
            },
            id,
        );
        handle_key(&mut app, press_ctrl('v'));
        let conv = app.workspace.main_conversation().expect("brief pane");
        assert_eq!(conv.provider, "Case Brief");
    }

    #[test]
    fn sidebar_toggles() {
        let mut app = create_test_app();
        assert!(app.ui.sidebar_expanded);
        handle_key(&mut app, press_ctrl('b'));
        assert!(!app.ui.sidebar_expanded);
        handle_key(&mut app, press_ctrl('g'));
        assert!(app.ui.show_right_sidebar);
    }

    #[test]
    fn right_sidebar_enter_inserts_the_selection() {
        let mut app = create_test_app();
        handle_key(&mut app, press_ctrl('g'));
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.ui.input, "Case Analysis Framework");
        assert!(!app.ui.show_right_sidebar);
    }

    #[test]
    fn tab_cycles_welcome_then_right_sidebar() {
        let mut app = create_test_app();
        let first = app.ui.welcome_tab;
        handle_key(&mut app, press(KeyCode::Tab));
        assert_ne!(app.ui.welcome_tab, first);

        handle_key(&mut app, press_ctrl('g'));
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.ui.right_tab, crate::core::app::RightTab::Mutations);
    }

    #[tokio::test]
    async fn esc_interrupts_a_pending_reply_before_closing_panels() {
        let mut app = create_test_app();
        app.workspace.add_conversation("OpenAI", "GPT-4o");
        app.select_brief(&crate::core::library::briefs()[0]);
        app.send_prompt("q");
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.ui.is_awaiting_reply);
        assert!(app.ui.selected_brief.is_some());
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.ui.selected_brief.is_none());
    }

    #[tokio::test]
    async fn playground_keys_edit_and_close() {
        let mut app = create_test_app();
        app.workspace.add_conversation("OpenAI", "GPT-4o");
        app.send_prompt("seed");
        app.open_playground();

        handle_key(&mut app, press(KeyCode::Char('!')));
        assert!(app.ui.playground.as_ref().unwrap().buffer.ends_with('!'));
        handle_key(&mut app, press(KeyCode::F(6)));
        assert_eq!(
            app.ui.playground.as_ref().unwrap().language_name(),
            "Python"
        );
        handle_key(&mut app, press_ctrl('u'));
        assert_eq!(app.ui.playground.as_ref().unwrap().buffer, "seed");
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.ui.playground.is_none());
    }

    #[tokio::test]
    async fn paste_lands_in_the_focused_surface() {
        let mut app = create_test_app();
        handle_paste(&mut app, "pasted\ttext");
        assert_eq!(app.ui.input, "pasted    text");

        app.open_brief_search();
        handle_paste(&mut app, "marbury");
        assert_eq!(app.ui.search.as_ref().unwrap().term, "marbury");
    }
}
