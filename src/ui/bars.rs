//! Chrome widgets: top bar with the case-brief search, the task-breakdown
//! strip, and the bottom composer.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::app::App;
use crate::core::responder::REPLY_STAGES;
use crate::ui::layout;
use crate::utils::input::cursor_line_col;

/// Workflow categories shown when the composer is expanded.
pub const COMPOSER_CATEGORIES: &[(&str, &str)] = &[
    ("Review", "Analyze and evaluate legal documents"),
    ("Draft", "Create and edit legal documents"),
    ("Summarize", "Condense complex legal information"),
    ("Research", "Explore legal precedents and statutes"),
];

pub fn draw_top_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let title = format!(
        " Osgood v{} · {} ({}) · Logging: {} ",
        env!("CARGO_PKG_VERSION"),
        app.session.provider,
        app.session.model,
        app.session.logging.get_status_string()
    );
    let searching = app.ui.search.is_some();
    let border_style = if searching {
        theme.accent_style
    } else {
        theme.input_border_style
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, theme.title_style));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let term = app.ui.search.as_ref().map(|s| s.term.as_str()).unwrap_or("");
    let line = if searching || !term.is_empty() {
        Line::from(vec![
            Span::styled("⌕ ", theme.accent_style),
            Span::styled(term.to_string(), theme.input_text_style),
        ])
    } else {
        Line::from(vec![
            Span::styled("⌕ ", theme.dim_style),
            Span::styled("Search Case Briefs… (Ctrl+F)", theme.dim_style),
        ])
    };
    f.render_widget(Paragraph::new(line), inner);

    if searching {
        let cursor_x = inner.x + 2 + term.chars().count() as u16;
        f.set_cursor_position((cursor_x.min(inner.x + inner.width.saturating_sub(1)), inner.y));
    }
}

/// Floating results list under the top bar while the search is focused.
pub fn draw_search_overlay(f: &mut Frame, app: &App, content: Rect) {
    let theme = &app.ui.theme;
    let Some(search) = app.ui.search.as_ref() else {
        return;
    };

    let width = content.width.saturating_sub(8).clamp(30, 70).min(content.width);
    let height = (content.height * 3 / 5).clamp(6, 20).min(content.height);
    let area = Rect {
        x: content.x + (content.width - width) / 2,
        y: content.y,
        width,
        height,
    };
    if area.width == 0 || area.height == 0 {
        return;
    }
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style)
        .title(Span::styled(" Case Briefs ", theme.title_style))
        .style(Style::default().bg(theme.panel_background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (index, brief) in search.items.iter().enumerate() {
        let selected = index == search.selected;
        let marker_style = if selected {
            theme.selection_highlight_style
        } else {
            theme.ai_text_style
        };
        lines.push(Line::from(Span::styled(
            format!(" {} — {} ", brief.name, brief.citation),
            marker_style,
        )));
        lines.push(Line::from(Span::styled(
            format!("   {}", brief.court),
            theme.dim_style,
        )));
    }
    if search.is_loading {
        lines.push(Line::from(Span::styled(" Loading…", theme.dim_style)));
    } else if search.items.is_empty() {
        lines.push(Line::from(Span::styled(" No matching briefs.", theme.dim_style)));
    } else if search.has_more {
        lines.push(Line::from(Span::styled(
            " PageDown loads more…",
            theme.dim_style,
        )));
    }
    lines.push(Line::from(Span::styled(
        " Enter: open panel · Ctrl+V: view on main · Esc: close",
        theme.dim_style,
    )));

    // Keep the selection in view.
    let selected_row = (search.selected * 2) as u16;
    let scroll = selected_row.saturating_sub(inner.height.saturating_sub(2));
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

/// Task-breakdown strip shown above the composer while a reply is pending.
pub fn draw_breakdown(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(" Task Breakdown ", theme.title_style))
        .style(Style::default().bg(theme.panel_background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let reached = app.ui.breakdown_stage.unwrap_or(0);
    let mut lines = Vec::with_capacity(REPLY_STAGES.len());
    for (index, (title, description)) in REPLY_STAGES.iter().enumerate() {
        let (bullet, style) = if index <= reached {
            ("●", theme.accent_style)
        } else {
            ("○", theme.dim_style)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {bullet} "), style),
            Span::styled(*title, if index <= reached {
                theme.ai_text_style
            } else {
                theme.dim_style
            }),
            Span::styled(format!(" — {description}"), theme.dim_style),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn selection_line(app: &App) -> Line<'_> {
    let theme = &app.ui.theme;
    let mut spans = vec![
        Span::styled(
            format!("{} · {}", app.session.provider, app.session.model),
            theme.accent_style,
        ),
    ];
    let mut tallies: Vec<(&String, &usize)> = app.workspace.selected_models().iter().collect();
    tallies.sort();
    if !tallies.is_empty() {
        let summary = tallies
            .iter()
            .map(|(model, count)| format!("{model} ×{count}"))
            .collect::<Vec<_>>()
            .join(", ");
        spans.push(Span::raw("  ·  "));
        spans.push(Span::styled(format!("Panes: {summary}"), theme.dim_style));
    }
    if let Some(status) = &app.ui.status {
        spans.push(Span::raw("  ·  "));
        spans.push(Span::styled(status.clone(), theme.system_text_style));
    }
    Line::from(spans)
}

pub fn draw_composer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    if area.height == 0 || area.width == 0 {
        return;
    }
    let mut y = area.y;

    if app.ui.composer_expanded {
        let categories = Rect {
            y,
            height: 4.min(area.height),
            ..area
        };
        y += 4;
        let column_width = categories.width / COMPOSER_CATEGORIES.len() as u16;
        for (index, (title, description)) in COMPOSER_CATEGORIES.iter().enumerate() {
            let cell = Rect {
                x: categories.x + column_width * index as u16,
                y: categories.y,
                width: column_width,
                height: categories.height,
            };
            let lines = vec![
                Line::from(Span::styled(*title, theme.accent_style)),
                Line::from(Span::styled(*description, theme.dim_style)),
            ];
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), cell);
        }
    }

    let input_height = area.height.saturating_sub((y - area.y) + 1);
    let input_area = Rect {
        y,
        height: input_height,
        ..area
    };

    let input_title = if app.ui.is_awaiting_reply {
        "Message Prompt Composer + (Esc to interrupt, /help for help, Ctrl+C to quit)"
    } else {
        "Message Prompt Composer + (Enter to send, Alt+Enter for new line, /help for help)"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(input_title, theme.input_title_style));
    let inner = block.inner(input_area);
    f.render_widget(block, input_area);

    let input = Paragraph::new(app.ui.input.as_str())
        .style(theme.input_text_style)
        .wrap(Wrap { trim: false });
    f.render_widget(input, inner);

    // Cursor, unless an overlay owns it.
    let overlay_focused =
        app.ui.search.is_some() || app.ui.picker.is_some() || app.ui.playground.is_some();
    if !overlay_focused && inner.width > 0 && inner.height > 0 {
        let (line, col) = cursor_line_col(&app.ui.input, app.ui.input_cursor);
        let cursor_y = inner.y + (line as u16).min(inner.height - 1);
        let cursor_x = inner.x + (col as u16).min(inner.width - 1);
        f.set_cursor_position((cursor_x, cursor_y));
    }

    let status_area = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    f.render_widget(Paragraph::new(selection_line(app)), status_area);
}

/// Composer block height for the current input.
pub fn composer_height(app: &App, width: u16) -> u16 {
    layout::composer_height(&app.ui.input, width, app.ui.composer_expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn categories_match_the_workflow_row() {
        let titles: Vec<&str> = COMPOSER_CATEGORIES.iter().map(|(t, _)| *t).collect();
        assert_eq!(titles, vec!["Review", "Draft", "Summarize", "Research"]);
    }

    #[test]
    fn selection_line_includes_tallies_and_status() {
        let mut app = create_test_app();
        app.workspace.add_conversation("OpenAI", "GPT-4o");
        app.workspace.add_conversation("OpenAI", "GPT-4o");
        app.ui.set_status("ready");
        let line = selection_line(&app);
        let text: String = line.spans.iter().map(|s| s.content.clone()).collect();
        assert!(text.contains("OpenAI · GPT-4o"));
        assert!(text.contains("GPT-4o ×2"));
        assert!(text.contains("ready"));
    }
}
