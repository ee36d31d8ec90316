//! Block digit font for the glint countdown.

use glint_core::CountdownDisplay;

/// Rows per glyph.
pub const DIGIT_HEIGHT: usize = 5;

/// Columns per digit glyph.
pub const DIGIT_WIDTH: usize = 5;

/// Compact block digits (5 lines tall, 5 chars wide)
pub const DIGITS: [[&str; DIGIT_HEIGHT]; 10] = [
    // 0
    [" ███ ", "█   █", "█   █", "█   █", " ███ "],
    // 1
    ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
    // 2
    [" ███ ", "█   █", "  ██ ", " █   ", "█████"],
    // 3
    ["████ ", "    █", " ███ ", "    █", "████ "],
    // 4
    ["█   █", "█   █", "█████", "    █", "    █"],
    // 5
    ["█████", "█    ", "████ ", "    █", "████ "],
    // 6
    [" ███ ", "█    ", "████ ", "█   █", " ███ "],
    // 7
    ["█████", "    █", "   █ ", "  █  ", "  █  "],
    // 8
    [" ███ ", "█   █", " ███ ", "█   █", " ███ "],
    // 9
    [" ███ ", "█   █", " ████", "    █", " ███ "],
];

/// Colon separator (5 lines tall, 1 char wide)
pub const COLON: [&str; DIGIT_HEIGHT] = [" ", "█", " ", "█", " "];

/// Gap between two digits of the same field.
const DIGIT_GAP: &str = " ";

/// Separator between fields: gap, colon, gap.
const FIELD_GAP: usize = 3;

/// Captions shown under the four countdown fields.
pub const FIELD_CAPTIONS: [&str; 4] = ["DAYS", "HOURS", "MINUTES", "SECONDS"];

/// Rendered width of a field with `digits` digits.
fn field_width(digits: usize) -> usize {
    if digits == 0 {
        0
    } else {
        digits * DIGIT_WIDTH + (digits - 1) * DIGIT_GAP.len()
    }
}

/// Build the block art for a countdown display.
///
/// Fields are separated by colons. Non-digit characters are skipped, and a
/// field wider than two digits simply widens the art.
///
/// # Returns
/// A vector of [`DIGIT_HEIGHT`] strings, one per line.
pub fn build_countdown_art(display: &CountdownDisplay) -> Vec<String> {
    let fields: Vec<Vec<usize>> = display
        .fields()
        .iter()
        .map(|f| {
            f.chars()
                .filter_map(|c| c.to_digit(10))
                .map(|d| d as usize)
                .collect()
        })
        .collect();

    let mut lines = Vec::with_capacity(DIGIT_HEIGHT);

    for row in 0..DIGIT_HEIGHT {
        let mut line = String::new();
        for (i, digits) in fields.iter().enumerate() {
            if i > 0 {
                line.push(' ');
                line.push_str(COLON[row]);
                line.push(' ');
            }
            for (j, &d) in digits.iter().enumerate() {
                if j > 0 {
                    line.push_str(DIGIT_GAP);
                }
                line.push_str(DIGITS[d][row]);
            }
        }
        lines.push(line);
    }

    lines
}

/// Build the caption line, each caption centred under its field.
pub fn build_caption_line(display: &CountdownDisplay) -> String {
    let mut line = String::new();
    for (i, (field, caption)) in display.fields().iter().zip(FIELD_CAPTIONS).enumerate() {
        if i > 0 {
            line.push_str(&" ".repeat(FIELD_GAP));
        }
        let width = field_width(field.chars().count()).max(caption.len());
        line.push_str(&format!("{caption:^width$}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Remaining;

    fn display(ms: i64) -> CountdownDisplay {
        Remaining::from_millis(ms).into()
    }

    #[test]
    fn test_art_has_fixed_height_and_equal_widths() {
        let lines = build_countdown_art(&display(90_061_000));
        assert_eq!(lines.len(), DIGIT_HEIGHT);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        // 8 digits, 4 in-field gaps, 3 separators.
        assert_eq!(width, 8 * DIGIT_WIDTH + 4 + 3 * FIELD_GAP);
    }

    #[test]
    fn test_art_renders_digit_rows() {
        let lines = build_countdown_art(&CountdownDisplay::zeros());
        let zero_zero = format!("{} {}", DIGITS[0][0], DIGITS[0][0]);
        assert!(lines[0].starts_with(&zero_zero));
        assert!(lines[1].contains(" █ "));
    }

    #[test]
    fn test_three_digit_days_widen_art() {
        let two = build_countdown_art(&display(99 * 86_400_000));
        let three = build_countdown_art(&display(100 * 86_400_000));
        assert_eq!(
            three[0].chars().count(),
            two[0].chars().count() + DIGIT_WIDTH + 1
        );
    }

    #[test]
    fn test_caption_line_matches_art_width() {
        let d = display(90_061_000);
        let art = build_countdown_art(&d);
        let captions = build_caption_line(&d);
        assert_eq!(captions.chars().count(), art[0].chars().count());
        for caption in FIELD_CAPTIONS {
            assert!(captions.contains(caption));
        }
    }
}
