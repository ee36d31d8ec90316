//! Glyphs standing in for filled circles of increasing radius.

/// Dot glyphs, smallest first.
pub const DOT_CHARS: &[char] = &['·', '•', '●'];

/// Radius (in cells) at which the next larger dot glyph is used.
const DOT_STEPS: &[f32] = &[0.8, 1.6];

/// Pick the dot glyph whose apparent size best matches `radius`.
pub fn dot_for_radius(radius: f32) -> char {
    let idx = DOT_STEPS.iter().take_while(|&&step| radius >= step).count();
    DOT_CHARS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_sizes() {
        assert_eq!(dot_for_radius(0.4), '·');
        assert_eq!(dot_for_radius(1.0), '•');
        assert_eq!(dot_for_radius(2.4), '●');
    }
}
