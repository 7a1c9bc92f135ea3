//! Input editing helpers
//!
//! The composer and the playground buffer share a hand-rolled editing model:
//! a `String` plus a cursor measured in characters. These helpers keep the
//! cursor math in one place and testable.

/// Sanitize text input to prevent TUI corruption
///
/// This function:
/// - Converts tabs to 4 spaces
/// - Converts carriage returns to newlines
/// - Filters out control characters except newlines
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' => sanitized.push('\n'),
            '\n' => sanitized.push(c),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}

fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn insert_char(buffer: &mut String, cursor: &mut usize, c: char) {
    buffer.insert(byte_index(buffer, *cursor), c);
    *cursor += 1;
}

pub fn delete_before_cursor(buffer: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    *cursor -= 1;
    buffer.remove(byte_index(buffer, *cursor));
}

pub fn delete_at_cursor(buffer: &mut String, cursor: &mut usize) {
    if *cursor < buffer.chars().count() {
        buffer.remove(byte_index(buffer, *cursor));
    }
}

pub fn move_left(cursor: &mut usize) {
    *cursor = cursor.saturating_sub(1);
}

pub fn move_right(buffer: &str, cursor: &mut usize) {
    *cursor = (*cursor + 1).min(buffer.chars().count());
}

pub fn move_home(cursor: &mut usize) {
    *cursor = 0;
}

pub fn move_end(buffer: &str, cursor: &mut usize) {
    *cursor = buffer.chars().count();
}

/// Cursor position as (line, column) for rendering.
pub fn cursor_line_col(buffer: &str, cursor: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for c in buffer.chars().take(cursor) {
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_input_basic() {
        assert_eq!(sanitize_text_input("hello world"), "hello world");
    }

    #[test]
    fn test_sanitize_text_input_tabs_and_returns() {
        assert_eq!(sanitize_text_input("a\tb"), "a    b");
        assert_eq!(sanitize_text_input("a\r\nb"), "a\n\nb");
        assert_eq!(sanitize_text_input("a\u{7}b"), "ab");
    }

    #[test]
    fn insert_and_delete_respect_multibyte_chars() {
        let mut buffer = String::from("§1");
        let mut cursor = 1;
        insert_char(&mut buffer, &mut cursor, '¶');
        assert_eq!(buffer, "§¶1");
        assert_eq!(cursor, 2);

        delete_before_cursor(&mut buffer, &mut cursor);
        assert_eq!(buffer, "§1");
        assert_eq!(cursor, 1);

        delete_at_cursor(&mut buffer, &mut cursor);
        assert_eq!(buffer, "§");
    }

    #[test]
    fn movement_clamps_at_both_ends() {
        let buffer = String::from("ab");
        let mut cursor = 0;
        move_left(&mut cursor);
        assert_eq!(cursor, 0);
        move_right(&buffer, &mut cursor);
        move_right(&buffer, &mut cursor);
        move_right(&buffer, &mut cursor);
        assert_eq!(cursor, 2);
        move_home(&mut cursor);
        assert_eq!(cursor, 0);
        move_end(&buffer, &mut cursor);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn line_col_counts_newlines() {
        assert_eq!(cursor_line_col("ab\ncd", 0), (0, 0));
        assert_eq!(cursor_line_col("ab\ncd", 3), (1, 0));
        assert_eq!(cursor_line_col("ab\ncd", 5), (1, 2));
    }
}
