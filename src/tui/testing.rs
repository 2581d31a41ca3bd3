//! General test utilities for TUI tests.
//!
//! # Usage
//!
//! ```rust
//! #[cfg(test)]
//! mod tests {
//!     use crate::tui::testing::*;
//!
//!     #[test]
//!     fn test_example() {
//!         let doc = guide_document(&["Install"], 4);
//!         // Render or scroll through doc...
//!     }
//! }
//! ```

use ratatui::buffer::Buffer;

use crate::document::Document;

/// A level-1 "Guide" heading followed by one level-2 part per name,
/// each with `lines` body rows
///
/// Rows: "Guide" at 0, first part at 2, then every `lines + 2` rows.
pub fn guide_document(parts: &[&str], lines: usize) -> Document {
    let mut text = String::from("# Guide\n");
    for part in parts {
        text.push_str(&format!("## {}\n", part));
        for i in 0..lines {
            text.push_str(&format!("{} line {}\n", part, i));
        }
    }
    Document::parse(&text)
}

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Helper for buffer assertions
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);
    let buffer_width = buf.area().width as usize;

    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].chars().count(),
            buffer_width,
            "Line {} width mismatch: expected {}, got {}",
            i,
            buffer_width,
            actual[i].chars().count()
        );
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}
