//! Frame geometry
//!
//! Pure layout math, kept separate from widget rendering so the region
//! arithmetic is testable without a terminal.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::utils::scroll::ScrollCalculator;

pub const SIDEBAR_EXPANDED_WIDTH: u16 = 24;
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 3;
pub const RIGHT_SIDEBAR_WIDTH: u16 = 24;
pub const TOP_BAR_HEIGHT: u16 = 3;
pub const BREAKDOWN_HEIGHT: u16 = 5;
pub const MAX_INPUT_LINES: u16 = 5;
/// Width at which the pane grid switches to two columns.
pub const TWO_COLUMN_MIN_WIDTH: u16 = 90;

pub struct AppLayout {
    pub sidebar: Rect,
    pub top_bar: Rect,
    pub content: Rect,
    pub breakdown: Option<Rect>,
    pub composer: Rect,
    pub right_sidebar: Option<Rect>,
}

/// Rows the composer block occupies: optional category row, bordered
/// input, selection/status line.
pub fn composer_height(input: &str, width: u16, expanded: bool) -> u16 {
    let inner_width = width.saturating_sub(2).max(1);
    let input_lines = ScrollCalculator::wrapped_line_count(input, inner_width)
        .clamp(1, MAX_INPUT_LINES);
    let categories = if expanded { 4 } else { 0 };
    categories + input_lines + 2 + 1
}

pub fn compute(
    area: Rect,
    sidebar_expanded: bool,
    show_right_sidebar: bool,
    composer_height: u16,
    show_breakdown: bool,
) -> AppLayout {
    let sidebar_width = if sidebar_expanded {
        SIDEBAR_EXPANDED_WIDTH
    } else {
        SIDEBAR_COLLAPSED_WIDTH
    };

    let mut horizontal = vec![Constraint::Length(sidebar_width), Constraint::Min(0)];
    if show_right_sidebar {
        horizontal.push(Constraint::Length(RIGHT_SIDEBAR_WIDTH));
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(horizontal)
        .split(area);

    let sidebar = columns[0];
    let main = columns[1];
    let right_sidebar = if show_right_sidebar {
        Some(columns[2])
    } else {
        None
    };

    let mut vertical = vec![
        Constraint::Length(TOP_BAR_HEIGHT),
        Constraint::Min(0),
    ];
    if show_breakdown {
        vertical.push(Constraint::Length(BREAKDOWN_HEIGHT));
    }
    vertical.push(Constraint::Length(composer_height));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vertical)
        .split(main);

    let (breakdown, composer) = if show_breakdown {
        (Some(rows[2]), rows[3])
    } else {
        (None, rows[2])
    };

    AppLayout {
        sidebar,
        top_bar: rows[0],
        content: rows[1],
        breakdown,
        composer,
        right_sidebar,
    }
}

/// Split the content area for the brief side panel: panel left, grid right.
pub fn split_for_brief_panel(area: Rect) -> (Rect, Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    (halves[0], halves[1])
}

/// Pane rectangles for the conversation grid, row-major. Two columns when
/// the area is wide enough and more than one pane is open.
pub fn pane_grid(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let columns = if area.width >= TWO_COLUMN_MIN_WIDTH && count > 1 {
        2
    } else {
        1
    };
    let rows = count.div_ceil(columns);

    let row_constraints: Vec<Constraint> =
        (0..rows).map(|_| Constraint::Ratio(1, rows as u32)).collect();
    let row_rects = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    let mut rects = Vec::with_capacity(count);
    for (row_index, row) in row_rects.iter().enumerate() {
        let remaining = count - row_index * columns;
        let in_row = remaining.min(columns);
        let col_constraints: Vec<Constraint> = (0..columns)
            .map(|_| Constraint::Ratio(1, columns as u32))
            .collect();
        let col_rects = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row);
        rects.extend(col_rects.iter().take(in_row).copied());
    }
    rects
}

/// Center a fixed-size box within an area, clamping to its bounds.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn sidebar_width_follows_expansion() {
        let layout = compute(frame(), true, false, 4, false);
        assert_eq!(layout.sidebar.width, SIDEBAR_EXPANDED_WIDTH);
        let layout = compute(frame(), false, false, 4, false);
        assert_eq!(layout.sidebar.width, SIDEBAR_COLLAPSED_WIDTH);
    }

    #[test]
    fn right_sidebar_is_optional() {
        assert!(compute(frame(), true, false, 4, false).right_sidebar.is_none());
        let layout = compute(frame(), true, true, 4, false);
        assert_eq!(layout.right_sidebar.unwrap().width, RIGHT_SIDEBAR_WIDTH);
    }

    #[test]
    fn breakdown_slot_appears_only_while_pending() {
        assert!(compute(frame(), true, false, 4, false).breakdown.is_none());
        let layout = compute(frame(), true, false, 4, true);
        assert_eq!(layout.breakdown.unwrap().height, BREAKDOWN_HEIGHT);
    }

    #[test]
    fn regions_tile_the_main_column() {
        let layout = compute(frame(), true, false, 5, true);
        let bottom = layout.composer.y + layout.composer.height;
        assert_eq!(bottom, 40);
        assert_eq!(layout.top_bar.height, TOP_BAR_HEIGHT);
        assert_eq!(
            layout.top_bar.height
                + layout.content.height
                + BREAKDOWN_HEIGHT
                + layout.composer.height,
            40
        );
    }

    #[test]
    fn composer_grows_with_input_lines_up_to_the_cap() {
        let one = composer_height("hi", 80, false);
        let two = composer_height("hi\nthere", 80, false);
        assert_eq!(two, one + 1);
        let many = composer_height(&"line\n".repeat(12), 80, false);
        assert_eq!(many, MAX_INPUT_LINES + 3);
    }

    #[test]
    fn expanded_composer_adds_the_category_row() {
        assert_eq!(
            composer_height("hi", 80, true),
            composer_height("hi", 80, false) + 4
        );
    }

    #[test]
    fn grid_uses_one_column_when_narrow() {
        let narrow = Rect::new(0, 0, 60, 30);
        let rects = pane_grid(narrow, 3);
        assert_eq!(rects.len(), 3);
        assert!(rects.iter().all(|r| r.width == 60));
    }

    #[test]
    fn grid_uses_two_columns_when_wide() {
        let rects = pane_grid(frame(), 3);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].y, rects[1].y);
        assert!(rects[2].y > rects[0].y);
    }

    #[test]
    fn single_pane_fills_the_width() {
        let rects = pane_grid(frame(), 1);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].width, 120);
    }

    #[test]
    fn centered_clamps_to_the_area() {
        let rect = centered(Rect::new(0, 0, 10, 10), 50, 50);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 10);
        let rect = centered(Rect::new(0, 0, 100, 50), 40, 10);
        assert_eq!(rect.x, 30);
        assert_eq!(rect.y, 20);
    }
}
