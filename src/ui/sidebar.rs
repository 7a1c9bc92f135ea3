//! Left navigation sidebar and right prompt/mutation sidebar.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::app::{App, RightTab};
use crate::core::library;

pub fn draw_left(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.input_border_style)
        .style(Style::default().bg(theme.background_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.ui.sidebar_expanded {
        // Collapsed rail: logo mark and the expand hint.
        let lines = vec![
            Line::from(Span::styled("0", theme.accent_style)),
            Line::from(""),
            Line::from(Span::styled("»", theme.dim_style)),
        ];
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled("Osgood Zero", theme.accent_style)),
        Line::from(""),
        Line::from(Span::styled("Chat History", theme.ai_text_style)),
        Line::from(Span::styled("Projects", theme.ai_text_style)),
        Line::from(Span::styled("Our Mission", theme.ai_text_style)),
        Line::from(""),
        Line::from(Span::styled("Projects", theme.title_style)),
    ];
    for project in library::projects() {
        lines.push(Line::from(Span::styled(
            format!("  {}", project.name),
            theme.dim_style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Recent Chats", theme.title_style)));

    // The recent list gets whatever rows remain above the footer.
    let footer_rows = 2;
    let used = lines.len() as u16;
    let room = inner.height.saturating_sub(used + footer_rows) as usize;
    for chat in library::recent_chats().iter().take(room) {
        lines.push(Line::from(Span::styled(
            format!("  {}", chat.title),
            theme.dim_style,
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);

    // Footer: signed-in user (or the sign-in stub still resolving).
    let footer_text = match &app.session.user {
        Some(user) => user.email.clone(),
        None => "Signing in…".to_string(),
    };
    let footer = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: 1.min(inner.height),
        ..inner
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(footer_text, theme.dim_style))),
        footer,
    );
}

pub fn draw_right(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(theme.input_border_style)
        .style(Style::default().bg(theme.background_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (title, names): (&str, Vec<String>) = match app.ui.right_tab {
        RightTab::Prompts => (
            "Prompt Library",
            library::prompt_templates()
                .iter()
                .map(|t| t.name.clone())
                .collect(),
        ),
        RightTab::Mutations => (
            "Mutations",
            library::mutations().iter().map(|m| m.name.clone()).collect(),
        ),
    };

    let mut lines = vec![
        Line::from(Span::styled(title, theme.title_style)),
        Line::from(Span::styled("Tab switches · Enter inserts", theme.dim_style)),
        Line::from(""),
    ];
    for (index, name) in names.iter().enumerate() {
        let style = if index == app.ui.right_selected {
            theme.selection_highlight_style
        } else {
            theme.ai_text_style
        };
        lines.push(Line::from(Span::styled(format!(" {name} "), style)));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Items currently listed in the right sidebar, in display order.
pub fn right_sidebar_items(tab: RightTab) -> Vec<&'static str> {
    match tab {
        RightTab::Prompts => library::prompt_templates()
            .iter()
            .map(|t| t.name.as_str())
            .collect(),
        RightTab::Mutations => library::mutations().iter().map(|m| m.name.as_str()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_sidebar_lists_match_fixtures() {
        assert_eq!(
            right_sidebar_items(RightTab::Prompts),
            vec![
                "Legal Research Template",
                "Case Analysis Framework",
                "Document Drafting Guide"
            ]
        );
        assert_eq!(right_sidebar_items(RightTab::Mutations).len(), 3);
    }
}
