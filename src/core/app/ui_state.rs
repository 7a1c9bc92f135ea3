use crate::core::library::CaseBrief;
use crate::ui::picker::PickerState;
use crate::ui::theme::Theme;

/// Languages the playground pretends to execute.
pub const PLAYGROUND_LANGUAGES: &[&str] = &["JavaScript", "Python", "Rust"];

/// Tabs of the right sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightTab {
    Prompts,
    Mutations,
}

impl RightTab {
    pub fn toggled(self) -> Self {
        match self {
            RightTab::Prompts => RightTab::Mutations,
            RightTab::Mutations => RightTab::Prompts,
        }
    }
}

/// Tabs of the welcome screen, cycled with Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeTab {
    QuickStart,
    Features,
    Models,
    Help,
}

impl WelcomeTab {
    pub const ALL: [WelcomeTab; 4] = [
        WelcomeTab::QuickStart,
        WelcomeTab::Features,
        WelcomeTab::Models,
        WelcomeTab::Help,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WelcomeTab::QuickStart => "Quick Start",
            WelcomeTab::Features => "Key Features",
            WelcomeTab::Models => "AI Models",
            WelcomeTab::Help => "Help & Resources",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// State of the case-brief search overlay.
#[derive(Debug, Default)]
pub struct BriefSearchState {
    pub term: String,
    pub items: Vec<&'static CaseBrief>,
    pub has_more: bool,
    pub is_loading: bool,
    pub selected: usize,
}

impl BriefSearchState {
    /// Reset for a fresh term; the caller requests page 0.
    pub fn reset(&mut self) {
        self.items.clear();
        self.has_more = false;
        self.is_loading = true;
        self.selected = 0;
    }

    pub fn selected_brief(&self) -> Option<&'static CaseBrief> {
        self.items.get(self.selected).copied()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn apply_page(&mut self, start: usize, items: Vec<&'static CaseBrief>, has_more: bool) {
        if start == 0 {
            self.items = items;
            self.selected = 0;
        } else {
            self.items.extend(items);
        }
        self.has_more = has_more;
        self.is_loading = false;
    }
}

/// Playground view over the main conversation.
#[derive(Debug)]
pub struct PlaygroundState {
    pub conversation_id: u64,
    pub buffer: String,
    /// Cursor position in characters within `buffer`.
    pub cursor: usize,
    pub language: usize,
    pub running: bool,
}

impl PlaygroundState {
    pub fn language_name(&self) -> &'static str {
        PLAYGROUND_LANGUAGES[self.language % PLAYGROUND_LANGUAGES.len()]
    }

    pub fn cycle_language(&mut self) {
        self.language = (self.language + 1) % PLAYGROUND_LANGUAGES.len();
    }
}

/// Which picker a modal picker overlay is driving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerKind {
    Provider,
    Model { provider: String },
    Theme,
}

#[derive(Debug)]
pub struct PickerUi {
    pub kind: PickerKind,
    pub state: PickerState,
}

/// Transient view state: everything the renderer needs that is not
/// conversation data.
pub struct UiState {
    pub input: String,
    /// Cursor position in characters within `input`.
    pub input_cursor: usize,
    pub sidebar_expanded: bool,
    pub show_right_sidebar: bool,
    pub right_tab: RightTab,
    pub right_selected: usize,
    pub composer_expanded: bool,
    pub welcome_tab: WelcomeTab,
    /// Active task-breakdown stage while a reply is pending.
    pub breakdown_stage: Option<usize>,
    pub is_awaiting_reply: bool,
    pub search: Option<BriefSearchState>,
    /// Brief shown in the side panel next to the pane grid.
    pub selected_brief: Option<&'static CaseBrief>,
    pub brief_panel_scroll: u16,
    pub playground: Option<PlaygroundState>,
    pub picker: Option<PickerUi>,
    pub status: Option<String>,
    pub theme: Theme,
}

impl UiState {
    pub fn new(theme: Theme, sidebar_expanded: bool) -> Self {
        Self {
            input: String::new(),
            input_cursor: 0,
            sidebar_expanded,
            show_right_sidebar: false,
            right_tab: RightTab::Prompts,
            right_selected: 0,
            composer_expanded: false,
            welcome_tab: WelcomeTab::QuickStart,
            breakdown_stage: None,
            is_awaiting_reply: false,
            search: None,
            selected_brief: None,
            brief_panel_scroll: 0,
            playground: None,
            picker: None,
            status: None,
            theme,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
    }

    /// Insert text at the cursor, e.g. a prompt-template name.
    pub fn insert_into_input(&mut self, text: &str) {
        let byte_index = char_to_byte_index(&self.input, self.input_cursor);
        self.input.insert_str(byte_index, text);
        self.input_cursor += text.chars().count();
    }
}

pub(crate) fn char_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_tabs_cycle() {
        let mut tab = WelcomeTab::QuickStart;
        for _ in 0..WelcomeTab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, WelcomeTab::QuickStart);
    }

    #[test]
    fn search_first_page_replaces_later_pages_append() {
        let mut search = BriefSearchState::default();
        search.reset();
        let all: Vec<_> = crate::core::library::briefs().iter().collect();

        search.apply_page(0, all[..3].to_vec(), true);
        assert_eq!(search.items.len(), 3);
        assert!(search.has_more);
        assert!(!search.is_loading);

        search.apply_page(3, all[3..].to_vec(), false);
        assert_eq!(search.items.len(), 5);
        assert!(!search.has_more);
    }

    #[test]
    fn search_selection_stays_in_bounds() {
        let mut search = BriefSearchState::default();
        search.move_down();
        assert_eq!(search.selected, 0);
        let all: Vec<_> = crate::core::library::briefs().iter().collect();
        search.apply_page(0, all, false);
        for _ in 0..10 {
            search.move_down();
        }
        assert_eq!(search.selected, 4);
        search.move_up();
        assert_eq!(search.selected, 3);
    }

    #[test]
    fn insert_into_input_respects_cursor() {
        let mut ui = UiState::new(Theme::dark_default(), true);
        ui.input = "ab".into();
        ui.input_cursor = 1;
        ui.insert_into_input("XY");
        assert_eq!(ui.input, "aXYb");
        assert_eq!(ui.input_cursor, 3);
    }
}
