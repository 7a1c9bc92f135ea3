//! Runtime application state
//!
//! `App` composes the session context, the conversation workspace, and the
//! transient UI state, and applies responder events to them. The chat loop
//! owns an `App` behind a mutex and calls into it from key handlers; slash
//! commands receive `&mut App` the same way.

use std::error::Error;

use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::library::{self, CaseBrief};
use crate::core::message::Message;
use crate::core::providers::{self, DEFAULT_PROVIDER};
use crate::core::responder::{
    BriefPageParams, ReplyParams, ResponderEvent, ResponderService,
};
use crate::core::workspace::Workspace;
use crate::ui::picker::{PickerItem, PickerState};
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;

pub mod session;
pub mod ui_state;

pub use session::SessionContext;
pub use ui_state::{
    BriefSearchState, PickerKind, PickerUi, PlaygroundState, RightTab, UiState, WelcomeTab,
};

/// Startup parameters resolved from the CLI.
#[derive(Default)]
pub struct AppInit {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub log_file: Option<String>,
    pub theme_override: Option<String>,
}

pub struct App {
    pub session: SessionContext,
    pub workspace: Workspace,
    pub ui: UiState,
    pub responder: ResponderService,
    pub config: Config,
}

impl App {
    pub fn new(
        config: Config,
        responder: ResponderService,
        init: AppInit,
    ) -> Result<Self, Box<dyn Error>> {
        let provider_name = init
            .provider
            .or_else(|| config.default_provider.clone())
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let provider = providers::find_provider(&provider_name).ok_or_else(|| {
            format!(
                "Unknown provider '{provider_name}'. Run 'osgood -p' to list providers."
            )
        })?;

        let model_name = init
            .model
            .or_else(|| config.get_default_model(provider.name).map(String::from))
            .unwrap_or_else(|| provider.models[0].to_string());
        let (provider_name, model_name) = providers::resolve_pair(provider.name, &model_name)
            .ok_or_else(|| {
                format!(
                    "Unknown model '{}' for provider '{}'. Run 'osgood -p {} -m' to list models.",
                    model_name, provider.name, provider.name
                )
            })?;

        let theme_name = init
            .theme_override
            .or_else(|| config.theme.clone())
            .unwrap_or_else(|| "dark".to_string());
        let theme = Theme::from_config_name(&theme_name, &config);

        let sidebar_expanded = config.sidebar_expanded.unwrap_or(true);
        let session = SessionContext::new(
            provider_name.to_string(),
            model_name.to_string(),
            LoggingState::new(init.log_file),
        );

        Ok(Self {
            session,
            workspace: Workspace::new(),
            ui: UiState::new(theme, sidebar_expanded),
            responder,
            config,
        })
    }

    // --- sign-in ---

    pub fn start_sign_in(&mut self) {
        let request_id = self.session.next_request_id();
        self.session.current_sign_in_id = request_id;
        self.responder.spawn_sign_in(request_id);
    }

    // --- prompt dispatch ---

    /// Fan the prompt out to every pane and schedule the simulated reply.
    pub fn send_prompt(&mut self, text: &str) {
        let Some(targets) = self.workspace.send(text) else {
            return;
        };
        self.ui.clear_status();

        let line = format!("{}: {}", self.session.user_display_name(), text);
        if let Err(e) = self.session.logging.log_message(&line) {
            self.ui.set_status(format!("Log error: {e}"));
        }

        let request_id = self.session.next_request_id();
        self.session.current_reply_id = request_id;
        let cancel_token = CancellationToken::new();
        self.session.reply_cancel_token = Some(cancel_token.clone());
        self.ui.is_awaiting_reply = true;
        self.ui.breakdown_stage = None;

        self.responder.spawn_reply(ReplyParams {
            targets,
            cancel_token,
            request_id,
        });
    }

    /// Cancel the in-flight reply, if any.
    pub fn cancel_reply(&mut self) -> bool {
        match self.session.reply_cancel_token.take() {
            Some(token) => {
                token.cancel();
                self.ui.is_awaiting_reply = false;
                self.ui.breakdown_stage = None;
                self.ui.set_status("Response interrupted.");
                true
            }
            None => false,
        }
    }

    // --- responder events ---

    pub fn handle_responder_event(&mut self, event: ResponderEvent, request_id: u64) {
        match event {
            ResponderEvent::Stage(stage) => {
                if request_id == self.session.current_reply_id && self.ui.is_awaiting_reply {
                    self.ui.breakdown_stage = Some(stage);
                }
            }
            ResponderEvent::Reply {
                conversation_id,
                content,
            } => {
                if request_id == self.session.current_reply_id {
                    if let Err(e) = self.session.logging.log_message(&content) {
                        self.ui.set_status(format!("Log error: {e}"));
                    }
                    self.workspace.apply_reply(conversation_id, content);
                }
            }
            ResponderEvent::ReplyDone => {
                if request_id == self.session.current_reply_id {
                    self.ui.is_awaiting_reply = false;
                    self.ui.breakdown_stage = None;
                    self.session.reply_cancel_token = None;
                }
            }
            ResponderEvent::BriefPage {
                start,
                items,
                has_more,
            } => {
                if request_id == self.session.current_search_id {
                    if let Some(search) = self.ui.search.as_mut() {
                        search.apply_page(start, items, has_more);
                    }
                }
            }
            ResponderEvent::SignedIn(profile) => {
                if request_id == self.session.current_sign_in_id {
                    self.session.user = Some(profile);
                }
            }
            ResponderEvent::RunComplete { conversation_id } => {
                if request_id == self.session.current_run_id {
                    if let Some(conv) = self.workspace.get_mut(conversation_id) {
                        conv.push(Message::system("Code executed successfully."));
                    }
                    if let Some(playground) = self.ui.playground.as_mut() {
                        playground.running = false;
                    }
                }
            }
        }
    }

    // --- panes ---

    /// Open a pane for a provider/model pair, making it the composer's
    /// current selection.
    pub fn add_pane(&mut self, provider: &str, model: &str) -> bool {
        match providers::resolve_pair(provider, model) {
            Some((provider, model)) => {
                self.workspace.add_conversation(provider, model);
                self.session.provider = provider.to_string();
                self.session.model = model.to_string();
                self.ui
                    .set_status(format!("Opened {model} ({provider}) pane."));
                true
            }
            None => {
                self.ui
                    .set_status(format!("Unknown provider/model: {provider} {model}"));
                false
            }
        }
    }

    /// New pane with the composer's current selection (sidebar "new chat").
    pub fn new_chat(&mut self) {
        let provider = self.session.provider.clone();
        let model = self.session.model.clone();
        self.add_pane(&provider, &model);
    }

    // --- case-brief search overlay ---

    pub fn open_brief_search(&mut self) {
        let mut search = BriefSearchState::default();
        search.reset();
        self.ui.search = Some(search);
        self.request_brief_page(0);
    }

    pub fn close_brief_search(&mut self) {
        self.ui.search = None;
    }

    pub fn search_term_changed(&mut self) {
        if let Some(search) = self.ui.search.as_mut() {
            let keep = search.term.clone();
            search.reset();
            search.term = keep;
            self.request_brief_page(0);
        }
    }

    /// Request the next page when scrolling past the loaded tail.
    pub fn search_load_more(&mut self) {
        let Some(search) = self.ui.search.as_ref() else {
            return;
        };
        if search.is_loading || !search.has_more {
            return;
        }
        let start = search.items.len();
        if let Some(search) = self.ui.search.as_mut() {
            search.is_loading = true;
        }
        self.request_brief_page(start);
    }

    fn request_brief_page(&mut self, start: usize) {
        let Some(search) = self.ui.search.as_ref() else {
            return;
        };
        let term = search.term.clone();
        let request_id = self.session.next_request_id();
        self.session.current_search_id = request_id;
        self.responder.spawn_brief_page(BriefPageParams {
            term,
            start,
            request_id,
        });
    }

    /// Open the side panel for a brief.
    pub fn select_brief(&mut self, brief: &'static CaseBrief) {
        self.ui.selected_brief = Some(brief);
        self.ui.brief_panel_scroll = 0;
        self.ui.search = None;
    }

    pub fn close_brief_panel(&mut self) {
        self.ui.selected_brief = None;
    }

    /// Promote a brief onto the main display area as its own pane.
    pub fn view_brief_on_main(&mut self, brief: &'static CaseBrief) {
        self.workspace.open_case_brief(brief);
        self.ui.search = None;
        self.ui.set_status(format!("Viewing {} on main.", brief.name));
    }

    // --- pickers ---

    pub fn open_provider_picker(&mut self) {
        let items = providers::all_providers()
            .iter()
            .map(|p| PickerItem {
                id: p.name.to_string(),
                label: format!("{} ({} models)", p.name, p.models.len()),
            })
            .collect();
        self.ui.picker = Some(PickerUi {
            kind: PickerKind::Provider,
            state: PickerState::new("Select Provider", items, 0),
        });
    }

    pub fn open_model_picker(&mut self, provider: &str) {
        let Some(provider) = providers::find_provider(provider) else {
            self.ui.set_status(format!("Unknown provider: {provider}"));
            return;
        };
        let items = provider
            .models
            .iter()
            .map(|m| PickerItem {
                id: m.to_string(),
                label: m.to_string(),
            })
            .collect();
        self.ui.picker = Some(PickerUi {
            kind: PickerKind::Model {
                provider: provider.name.to_string(),
            },
            state: PickerState::new(format!("Select Model ({})", provider.name), items, 0),
        });
    }

    pub fn open_theme_picker(&mut self) {
        let mut items: Vec<PickerItem> = crate::ui::builtin_themes::load_builtin_themes()
            .into_iter()
            .map(|spec| PickerItem {
                id: spec.id.clone(),
                label: spec.display_name,
            })
            .collect();
        for theme in &self.config.custom_themes {
            items.push(PickerItem {
                id: theme.id.clone(),
                label: format!("{} (custom)", theme.display_name),
            });
        }
        self.ui.picker = Some(PickerUi {
            kind: PickerKind::Theme,
            state: PickerState::new("Select Theme", items, 0),
        });
    }

    /// Apply the picker's current selection. Provider pickers chain into a
    /// model picker; model pickers open the pane; theme pickers persist.
    pub fn confirm_picker(&mut self) {
        let Some(picker) = self.ui.picker.take() else {
            return;
        };
        let Some(id) = picker.state.selected_id().map(String::from) else {
            return;
        };
        match picker.kind {
            PickerKind::Provider => self.open_model_picker(&id),
            PickerKind::Model { provider } => {
                self.add_pane(&provider, &id);
            }
            PickerKind::Theme => self.apply_theme(&id),
        }
    }

    pub fn cancel_picker(&mut self) {
        self.ui.picker = None;
    }

    /// Switch themes and remember the choice in the config file.
    pub fn apply_theme(&mut self, name: &str) {
        self.ui.theme = Theme::from_config_name(name, &self.config);
        self.config.theme = Some(name.to_string());
        match self.config.save() {
            Ok(()) => self.ui.set_status(format!("Theme set to {name}.")),
            Err(e) => self.ui.set_status(format!("Theme applied; save failed: {e}")),
        }
    }

    // --- playground ---

    pub fn open_playground(&mut self) -> bool {
        let Some(conv) = self.workspace.main_conversation() else {
            self.ui.set_status("No main conversation to transform.");
            return false;
        };
        let buffer = conv.joined_contents();
        self.ui.playground = Some(PlaygroundState {
            conversation_id: conv.id,
            cursor: buffer.chars().count(),
            buffer,
            language: 0,
            running: false,
        });
        true
    }

    pub fn run_playground(&mut self) {
        let Some(playground) = self.ui.playground.as_mut() else {
            return;
        };
        if playground.running {
            return;
        }
        playground.running = true;
        let conversation_id = playground.conversation_id;
        let request_id = self.session.next_request_id();
        self.session.current_run_id = request_id;
        self.responder.spawn_playground_run(conversation_id, request_id);
    }

    /// Re-seed the playground buffer from the conversation transcript.
    pub fn revert_playground(&mut self) {
        let Some(playground) = self.ui.playground.as_mut() else {
            return;
        };
        if let Some(conv) = self.workspace.get(playground.conversation_id) {
            playground.buffer = conv.joined_contents();
            playground.cursor = playground.buffer.chars().count();
        }
    }

    pub fn close_playground(&mut self) {
        self.ui.playground = None;
    }

    // --- profile ---

    /// Print the signed-in profile into the main conversation.
    pub fn show_profile(&mut self) {
        let Some(profile) = self.session.user.clone() else {
            self.ui.set_status("Still signing in…");
            return;
        };
        let text = format!(
            "Profile\nName: {} {}\nE-mail: {}",
            profile.first_name, profile.last_name, profile.email
        );
        match self.workspace.main_conversation_mut() {
            Some(conv) => conv.push(Message::system(text)),
            None => self.ui.set_status(format!(
                "Signed in as {} <{}>.",
                profile.name, profile.email
            )),
        }
    }
}
