use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// User-defined theme stored in the config file. Every field is optional;
/// unset styles fall back to terminal defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CustomTheme {
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

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    pub default_provider: Option<String>,
    #[serde(default)]
    pub default_models: HashMap<String, String>,
    /// UI theme name (e.g., "dark", "light", or a custom theme id)
    pub theme: Option<String>,
    #[serde(default)]
    pub custom_themes: Vec<CustomTheme>,
    /// Whether the left sidebar starts expanded
    pub sidebar_expanded: Option<bool>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn set_default_model(&mut self, provider: String, model: String) {
        self.default_models.insert(provider, model);
    }

    pub fn unset_default_model(&mut self, provider: &str) {
        self.default_models.remove(provider);
    }

    pub fn get_default_model(&self, provider: &str) -> Option<&str> {
        self.default_models.get(provider).map(|m| m.as_str())
    }

    pub fn get_custom_theme(&self, id: &str) -> Option<&CustomTheme> {
        self.custom_themes
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(id))
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.default_provider {
            Some(provider) => println!("  default-provider: {provider}"),
            None => println!("  default-provider: (not set)"),
        }
        if self.default_models.is_empty() {
            println!("  default-model: (not set)");
        } else {
            let mut entries: Vec<_> = self.default_models.iter().collect();
            entries.sort();
            for (provider, model) in entries {
                println!("  default-model [{provider}]: {model}");
            }
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (not set)"),
        }
        match self.sidebar_expanded {
            Some(expanded) => println!("  sidebar-expanded: {expanded}"),
            None => println!("  sidebar-expanded: (not set)"),
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn add_custom_theme(&mut self, theme: CustomTheme) {
        self.custom_themes.push(theme);
    }
}
