//! Content-area widgets: the conversation pane grid, the case-brief side
//! panel, the welcome screen, and the playground.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::app::{App, WelcomeTab};
use crate::core::conversation::Conversation;
use crate::core::library::{self, CaseBrief};
use crate::core::message::Role;
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::utils::input::cursor_line_col;
use crate::utils::scroll::ScrollCalculator;

/// One transcript entry rendered as label line, content lines, spacer.
fn pane_entry_lines(theme: &Theme, role: Role, content: &str) -> Vec<(String, Style)> {
    let (label, label_style, text_style) = match role {
        Role::User => ("You", theme.user_prefix_style, theme.user_text_style),
        Role::Ai => ("AI", theme.accent_style, theme.ai_text_style),
        Role::System => ("System", theme.system_text_style, theme.system_text_style),
    };
    let mut lines = vec![(label.to_string(), label_style)];
    for content_line in content.lines() {
        lines.push((content_line.to_string(), text_style));
    }
    lines.push((String::new(), text_style));
    lines
}

fn transcript_lines(conv: &Conversation, theme: &Theme) -> Vec<(String, Style)> {
    let mut lines = Vec::new();
    for msg in &conv.messages {
        lines.extend(pane_entry_lines(theme, msg.role, &msg.content));
    }
    lines
}

pub fn draw_conversation_pane(f: &mut Frame, app: &App, conv: &Conversation, area: Rect) {
    let theme = &app.ui.theme;
    let is_main = app.workspace.main_conversation_id() == Some(conv.id);

    let title = format!(
        " {} [{}] · t={:.1}{} ",
        conv.model,
        conv.id,
        conv.parameters.temperature,
        if is_main { " · main" } else { "" }
    );
    let border_style = if is_main {
        theme.accent_style
    } else {
        theme.input_border_style
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, theme.title_style))
        .style(Style::default().bg(theme.panel_background));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if conv.messages.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "No conversation started",
            theme.dim_style,
        )))
        .wrap(Wrap { trim: true });
        f.render_widget(placeholder, inner);
        return;
    }

    let entries = transcript_lines(conv, theme);
    let total: u16 = entries
        .iter()
        .map(|(text, _)| ScrollCalculator::wrapped_line_count(text, inner.width).max(1))
        .sum();
    let scroll = ScrollCalculator::bottom_offset(total, inner.height);

    let lines: Vec<Line> = entries
        .into_iter()
        .map(|(text, style)| Line::from(Span::styled(text, style)))
        .collect();
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(paragraph, inner);
}

pub fn draw_pane_grid(f: &mut Frame, app: &App, area: Rect) {
    let rects = layout::pane_grid(area, app.workspace.conversations().len());
    for (conv, rect) in app.workspace.conversations().iter().zip(rects) {
        draw_conversation_pane(f, app, conv, rect);
    }
}

pub fn draw_brief_panel(f: &mut Frame, app: &App, brief: &CaseBrief, area: Rect) {
    let theme = &app.ui.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(
            format!(" {} ", brief.name),
            theme.title_style,
        ))
        .style(Style::default().bg(theme.panel_background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(brief.citation.clone(), theme.ai_text_style)),
        Line::from(Span::styled(brief.court.clone(), theme.dim_style)),
        Line::from(""),
    ];
    for section in &brief.sections {
        lines.push(Line::from(Span::styled(
            section.heading.clone(),
            theme.accent_style,
        )));
        for body_line in section.body_text().lines() {
            lines.push(Line::from(Span::styled(
                body_line.to_string(),
                theme.ai_text_style,
            )));
        }
        lines.push(Line::from(""));
    }
    if brief.sections.is_empty() {
        lines.push(Line::from(Span::styled(
            "No brief sections on file.",
            theme.dim_style,
        )));
    }
    lines.push(Line::from(Span::styled(
        "PgUp/PgDn scroll · Esc close",
        theme.dim_style,
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((app.ui.brief_panel_scroll, 0));
    f.render_widget(paragraph, inner);
}

fn welcome_tab_lines(app: &App, tab: WelcomeTab) -> Vec<(String, bool)> {
    // (text, emphasized)
    match tab {
        WelcomeTab::QuickStart => vec![
            ("Begin Your Legal Journey".to_string(), true),
            ("Choose an option to get started".to_string(), false),
            (String::new(), false),
            ("Enter       Start New Conversation".to_string(), false),
            ("Ctrl+F      Browse Case Briefs".to_string(), false),
            ("Ctrl+P      Pick a Provider & Model".to_string(), false),
        ],
        WelcomeTab::Features => vec![
            ("Key Features".to_string(), true),
            (String::new(), false),
            ("Legal Research      Access comprehensive legal databases".to_string(), false),
            ("Case Analysis       Analyze case law and regulations".to_string(), false),
            ("Document Drafting   Generate and review legal documents".to_string(), false),
            ("Legal Consultation  Get AI-assisted legal answers".to_string(), false),
        ],
        WelcomeTab::Models => {
            let mut lines = vec![
                ("Choose from our specialized legal AI models".to_string(), true),
                (String::new(), false),
            ];
            for model in library::ai_models() {
                lines.push((format!("{:<16}{}", model.name, model.description), false));
            }
            lines
        }
        WelcomeTab::Help => {
            let mut lines = vec![
                ("Help & Resources".to_string(), true),
                (String::new(), false),
                ("User Guide".to_string(), false),
                ("Video Tutorials".to_string(), false),
                ("FAQ".to_string(), false),
                ("Contact Support".to_string(), false),
                (String::new(), false),
                ("Type /help in any conversation for commands".to_string(), false),
            ];
            if app.session.user.is_none() {
                lines.push(("Signing in…".to_string(), false));
            }
            lines
        }
    }
}

pub fn draw_welcome(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let box_area = layout::centered(area, 64.min(area.width), 16.min(area.height));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .style(Style::default().bg(theme.panel_background));
    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    let mut lines = vec![
        Line::from(Span::styled("Welcome to Osgood", theme.accent_style)),
        Line::from(Span::styled(
            "Your intelligent companion for legal research and analysis",
            theme.dim_style,
        )),
        Line::from(""),
    ];

    // Tab bar
    let mut tab_spans: Vec<Span> = Vec::new();
    for tab in WelcomeTab::ALL {
        let style = if tab == app.ui.welcome_tab {
            theme.selection_highlight_style
        } else {
            theme.dim_style
        };
        tab_spans.push(Span::styled(format!(" {} ", tab.title()), style));
        tab_spans.push(Span::raw(" "));
    }
    lines.push(Line::from(tab_spans));
    lines.push(Line::from(Span::styled(
        "Tab switches sections",
        theme.dim_style,
    )));
    lines.push(Line::from(""));

    for (text, emphasized) in welcome_tab_lines(app, app.ui.welcome_tab) {
        let style = if emphasized {
            theme.title_style
        } else {
            theme.ai_text_style
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(paragraph, inner);
}

pub fn draw_playground(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let Some(playground) = app.ui.playground.as_ref() else {
        return;
    };
    let model = app
        .workspace
        .get(playground.conversation_id)
        .map(|c| c.model.as_str())
        .unwrap_or("closed pane");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style)
        .title(Span::styled(
            format!(" Playground: {model} "),
            theme.title_style,
        ))
        .style(Style::default().bg(theme.panel_background));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let status = if playground.running {
        "Running…"
    } else {
        "Ctrl+R run"
    };
    let header = Line::from(vec![
        Span::styled(
            format!("Language: {} (F6)", playground.language_name()),
            theme.ai_text_style,
        ),
        Span::raw("  ·  "),
        Span::styled(status, theme.accent_style),
        Span::raw("  ·  "),
        Span::styled("Ctrl+U revert · Esc close", theme.dim_style),
    ]);
    f.render_widget(
        Paragraph::new(header),
        Rect {
            height: 1,
            ..inner
        },
    );

    let editor = Rect {
        y: inner.y + 2,
        height: inner.height.saturating_sub(2),
        ..inner
    };
    let lines: Vec<Line> = playground
        .buffer
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), theme.input_text_style)))
        .collect();
    // No soft wrap: cursor math stays exact, long lines clip.
    let (cursor_line, cursor_col) = cursor_line_col(&playground.buffer, playground.cursor);
    let scroll = (cursor_line as u16).saturating_sub(editor.height.saturating_sub(1));
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), editor);

    let cursor_y = editor.y + (cursor_line as u16).min(editor.height.saturating_sub(1));
    let cursor_x = editor.x + (cursor_col as u16).min(editor.width.saturating_sub(1));
    f.set_cursor_position((cursor_x, cursor_y));
}

/// Draw the content area: playground, welcome, or brief panel + pane grid.
pub fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    if app.ui.playground.is_some() {
        draw_playground(f, app, area);
        return;
    }
    if app.workspace.is_empty() && app.ui.selected_brief.is_none() {
        draw_welcome(f, app, area);
        return;
    }
    match app.ui.selected_brief {
        Some(brief) => {
            let (panel, grid) = layout::split_for_brief_panel(area);
            draw_brief_panel(f, app, brief, panel);
            draw_pane_grid(f, app, grid);
        }
        None => draw_pane_grid(f, app, area),
    }
}
