use crate::core::config::Config;
use crate::ui::builtin_themes::{self, ThemeSpec};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Card background for conversation panes and overlays
    pub panel_background: Color,
    // Accent for the main pane border, highlights, and action hints
    pub accent_style: Style,

    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub ai_text_style: Style,
    pub system_text_style: Style,

    // Chrome
    pub dim_style: Style,
    pub title_style: Style,
    pub selection_highlight_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        // Prefer built-in spec for consistent RGB colors
        if let Some(spec) = builtin_themes::find_builtin_theme("dark") {
            return Self::from_spec(&spec);
        }
        // Fallback palette-based theme
        Theme {
            background_color: Color::Black,
            panel_background: Color::Black,
            accent_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            ai_text_style: Style::default().fg(Color::White),
            system_text_style: Style::default().fg(Color::DarkGray),
            dim_style: Style::default().fg(Color::Gray),
            title_style: Style::default().fg(Color::Gray),
            selection_highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn light() -> Self {
        if let Some(spec) = builtin_themes::find_builtin_theme("light") {
            return Self::from_spec(&spec);
        }
        Theme {
            background_color: Color::White,
            panel_background: Color::White,
            accent_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            ai_text_style: Style::default().fg(Color::Black),
            system_text_style: Style::default().fg(Color::Gray),
            dim_style: Style::default().fg(Color::DarkGray),
            title_style: Style::default().fg(Color::DarkGray),
            selection_highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" | "default" | "default-dark" => Self::dark_default(),
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    /// Resolve a theme name against config custom themes, then built-ins.
    pub fn from_config_name(name: &str, config: &Config) -> Self {
        if let Some(custom) = config.get_custom_theme(name) {
            return Self::from_spec(&builtin_themes::theme_spec_from_custom(custom));
        }
        if let Some(spec) = builtin_themes::find_builtin_theme(name) {
            return Self::from_spec(&spec);
        }
        Self::from_name(name)
    }

    pub fn from_spec(spec: &ThemeSpec) -> Self {
        let background_color = spec
            .background
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::Black);
        let panel_background = spec
            .panel
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(background_color);

        Theme {
            background_color,
            panel_background,
            accent_style: parse_style(&spec.accent),
            user_prefix_style: parse_style(&spec.user_prefix),
            user_text_style: parse_style(&spec.user_text),
            ai_text_style: parse_style(&spec.ai_text),
            system_text_style: parse_style(&spec.system_text),
            dim_style: parse_style(&spec.dim_text),
            title_style: parse_style(&spec.title),
            selection_highlight_style: parse_style(&spec.selection_highlight),
            input_border_style: parse_style(&spec.input_border),
            input_title_style: parse_style(&spec.input_title),
            input_text_style: parse_style(&spec.input_text),
            input_cursor_style: {
                let mut s = Style::default();
                if let Some(ref mods) = spec.input_cursor_modifiers {
                    for tok in mods.split(',').map(|t| t.trim()) {
                        match tok.to_ascii_lowercase().as_str() {
                            "bold" => s = s.add_modifier(Modifier::BOLD),
                            "reversed" => s = s.add_modifier(Modifier::REVERSED),
                            "italic" => s = s.add_modifier(Modifier::ITALIC),
                            _ => {}
                        }
                    }
                }
                s
            },
        }
    }
}

fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    // Hex: #rgb or #rrggbb
    if let Some(c) = parse_hex_color(&lower) {
        return Some(c);
    }
    // rgb(r,g,b)
    if let Some(c) = parse_rgb_func(&lower) {
        return Some(c);
    }
    match lower.as_str() {
        "black" => Some(Color::Black),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark-grey" | "darkgray" => Some(Color::DarkGray),
        "red" => Some(Color::Red),
        "light_red" | "light-red" => Some(Color::LightRed),
        "green" => Some(Color::Green),
        "light_green" | "light-green" => Some(Color::LightGreen),
        "blue" => Some(Color::Blue),
        "light_blue" | "light-blue" => Some(Color::LightBlue),
        "cyan" => Some(Color::Cyan),
        "light_cyan" | "light-cyan" => Some(Color::LightCyan),
        "magenta" => Some(Color::Magenta),
        "light_magenta" | "light-magenta" => Some(Color::LightMagenta),
        "yellow" => Some(Color::Yellow),
        "light_yellow" | "light-yellow" => Some(Color::LightYellow),
        "reset" => Some(Color::Reset),
        _ => None,
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    if !s.starts_with('#') {
        return None;
    }
    let hex = &s[1..];
    if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

fn parse_rgb_func(s: &str) -> Option<Color> {
    // Format: rgb(r,g,b)
    if !s.starts_with("rgb(") || !s.ends_with(')') {
        return None;
    }
    let content = &s[4..s.len() - 1];
    let parts: Vec<_> = content
        .split([',', ' '])
        .filter(|t| !t.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u16>().ok()?;
    let g = parts[1].parse::<u16>().ok()?;
    let b = parts[2].parse::<u16>().ok()?;
    Some(Color::Rgb(
        r.min(255) as u8,
        g.min(255) as u8,
        b.min(255) as u8,
    ))
}

fn parse_style(s: &Option<String>) -> Style {
    let mut style = Style::default();
    if let Some(ref spec) = s {
        for tok in spec.split(',').map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if let Some(color) = parse_color(tok) {
                style = style.fg(color);
            } else {
                match tok {
                    "bold" => style = style.add_modifier(Modifier::BOLD),
                    "reversed" => style = style.add_modifier(Modifier::REVERSED),
                    "italic" => style = style.add_modifier(Modifier::ITALIC),
                    _ => {}
                }
            }
        }
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_in_both_lengths() {
        assert_eq!(parse_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_color("#111528"), Some(Color::Rgb(0x11, 0x15, 0x28)));
        assert_eq!(parse_color("#11152"), None);
    }

    #[test]
    fn rgb_function_clamps_components() {
        assert_eq!(parse_color("rgb(300, 0, 12)"), Some(Color::Rgb(255, 0, 12)));
        assert_eq!(parse_color("rgb(1,2)"), None);
    }

    #[test]
    fn named_colors_and_modifiers_combine() {
        let style = parse_style(&Some("cyan,bold".to_string()));
        assert_eq!(style.fg, Some(Color::Cyan));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn dark_theme_uses_the_product_palette() {
        let theme = Theme::dark_default();
        assert_eq!(theme.background_color, Color::Rgb(0x11, 0x15, 0x28));
        assert_eq!(theme.panel_background, Color::Rgb(0x1e, 0x22, 0x35));
    }

    #[test]
    fn custom_theme_wins_over_builtin() {
        let mut config = Config::default();
        config.add_custom_theme(crate::core::config::CustomTheme {
            id: "dark".into(),
            display_name: "Custom Dark".into(),
            background: Some("#000000".into()),
            ..Default::default()
        });
        let theme = Theme::from_config_name("dark", &config);
        assert_eq!(theme.background_color, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn unknown_names_fall_back_to_dark() {
        let theme = Theme::from_config_name("no-such-theme", &Config::default());
        assert_eq!(theme.background_color, Theme::dark_default().background_color);
    }
}
