use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::app::App;
use crate::ui::{bars, layout, panes, sidebar};

pub fn ui(f: &mut Frame, app: &App) {
    let theme = &app.ui.theme;
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        f.area(),
    );

    let composer_height = bars::composer_height(app, f.area().width);
    let frame_layout = layout::compute(
        f.area(),
        app.ui.sidebar_expanded,
        app.ui.show_right_sidebar,
        composer_height,
        app.ui.is_awaiting_reply,
    );

    sidebar::draw_left(f, app, frame_layout.sidebar);
    bars::draw_top_bar(f, app, frame_layout.top_bar);
    panes::draw_content(f, app, frame_layout.content);
    if let Some(area) = frame_layout.breakdown {
        bars::draw_breakdown(f, app, area);
    }
    bars::draw_composer(f, app, frame_layout.composer);
    if let Some(area) = frame_layout.right_sidebar {
        sidebar::draw_right(f, app, area);
    }

    // Overlays above everything else.
    if app.ui.search.is_some() {
        bars::draw_search_overlay(f, app, frame_layout.content);
    }
    if let Some(picker) = app.ui.picker.as_ref() {
        let height = (picker.state.items.len() as u16 + 2).min(frame_layout.content.height);
        let area = layout::centered(frame_layout.content, 44, height);
        f.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.accent_style)
            .title(Span::styled(
                format!(" {} ", picker.state.title),
                theme.title_style,
            ))
            .style(Style::default().bg(theme.panel_background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines: Vec<Line> = picker
            .state
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let style = if index == picker.state.selected {
                    theme.selection_highlight_style
                } else {
                    theme.ai_text_style
                };
                Line::from(Span::styled(format!(" {} ", item.label), style))
            })
            .collect();
        let scroll = (picker.state.selected as u16).saturating_sub(inner.height.saturating_sub(1));
        f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
    }
}
