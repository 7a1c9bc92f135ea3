use crate::core::config::CustomTheme;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeSpec {
    pub id: String,
    pub display_name: String,
    pub background: Option<String>,
    pub panel: Option<String>,
    pub accent: Option<String>,
    pub user_prefix: Option<String>,
    pub user_text: Option<String>,
    pub ai_text: Option<String>,
    pub system_text: Option<String>,
    pub dim_text: Option<String>,
    pub title: Option<String>,
    pub selection_highlight: Option<String>,
    pub input_border: Option<String>,
    pub input_title: Option<String>,
    pub input_text: Option<String>,
    pub input_cursor_modifiers: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuiltinThemesConfig {
    themes: Vec<ThemeSpec>,
}

pub fn load_builtin_themes() -> Vec<ThemeSpec> {
    const CONFIG_CONTENT: &str = include_str!("../builtin_themes.toml");
    let config: BuiltinThemesConfig =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin_themes.toml");
    config.themes
}

pub fn find_builtin_theme(id: &str) -> Option<ThemeSpec> {
    load_builtin_themes()
        .into_iter()
        .find(|t| t.id.eq_ignore_ascii_case(id))
}

/// Convert a `CustomTheme` from config into a `ThemeSpec` compatible with UI theming.
pub fn theme_spec_from_custom(ct: &CustomTheme) -> ThemeSpec {
    ThemeSpec {
        id: ct.id.clone(),
        display_name: ct.display_name.clone(),
        background: ct.background.clone(),
        panel: ct.panel.clone(),
        accent: ct.accent.clone(),
        user_prefix: ct.user_prefix.clone(),
        user_text: ct.user_text.clone(),
        ai_text: ct.ai_text.clone(),
        system_text: ct.system_text.clone(),
        dim_text: ct.dim_text.clone(),
        title: ct.title.clone(),
        selection_highlight: ct.selection_highlight.clone(),
        input_border: ct.input_border.clone(),
        input_title: ct.input_title.clone(),
        input_text: ct.input_text.clone(),
        input_cursor_modifiers: ct.input_cursor_modifiers.clone(),
    }
}
