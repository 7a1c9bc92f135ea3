//! Scroll math for sticky-bottom transcripts
//!
//! Conversation panes always show the tail of their transcript. Ratatui's
//! `Paragraph` wrap is greedy word wrap with long-token breaking; the
//! counters here mirror that so scroll offsets match what gets drawn.

use unicode_width::UnicodeWidthStr;

pub struct ScrollCalculator;

impl ScrollCalculator {
    /// Display rows one hard line occupies at the given width.
    pub fn wrapped_rows(line: &str, width: u16) -> u16 {
        let width = width as usize;
        if width == 0 {
            return 1;
        }
        let mut rows: u16 = 1;
        let mut used = 0usize;
        for word in line.split_whitespace() {
            let mut w = word.width();
            if w > width {
                // Long token: fills the current row, then breaks across
                // full rows.
                loop {
                    let room = width - used;
                    if w <= room {
                        used += w;
                        break;
                    }
                    w -= room;
                    used = 0;
                    rows += 1;
                }
                continue;
            }
            let needed = if used == 0 { w } else { w + 1 };
            if used + needed > width {
                rows += 1;
                used = w;
            } else {
                used += needed;
            }
        }
        rows.max(1)
    }

    /// Total display rows for a block of text. Hard newlines are preserved,
    /// including a trailing one (the composer cursor can sit on it).
    pub fn wrapped_line_count(text: &str, width: u16) -> u16 {
        text.split('\n')
            .map(|line| {
                if line.trim().is_empty() {
                    1
                } else {
                    Self::wrapped_rows(line, width)
                }
            })
            .sum()
    }

    /// Offset that pins the bottom of `total` rows into a viewport.
    pub fn bottom_offset(total: u16, viewport: u16) -> u16 {
        total.saturating_sub(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_take_one_row() {
        assert_eq!(ScrollCalculator::wrapped_rows("hello", 20), 1);
        assert_eq!(ScrollCalculator::wrapped_rows("", 20), 1);
    }

    #[test]
    fn words_wrap_at_the_boundary() {
        // "aaaa bbbb cccc" at width 9: "aaaa bbbb" / "cccc"
        assert_eq!(ScrollCalculator::wrapped_rows("aaaa bbbb cccc", 9), 2);
        assert_eq!(ScrollCalculator::wrapped_rows("aaaa bbbb cccc", 4), 3);
    }

    #[test]
    fn long_tokens_break_across_rows() {
        assert_eq!(ScrollCalculator::wrapped_rows(&"x".repeat(25), 10), 3);
    }

    #[test]
    fn hard_newlines_are_preserved() {
        assert_eq!(ScrollCalculator::wrapped_line_count("a\n\nb", 10), 3);
        assert_eq!(ScrollCalculator::wrapped_line_count("", 10), 1);
        assert_eq!(ScrollCalculator::wrapped_line_count("a\n", 10), 2);
    }

    #[test]
    fn bottom_offset_saturates() {
        assert_eq!(ScrollCalculator::bottom_offset(10, 4), 6);
        assert_eq!(ScrollCalculator::bottom_offset(3, 4), 0);
    }
}
