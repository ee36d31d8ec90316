//! Color utility functions for the effects.

use ratatui::style::Color;

/// Composite an RGB colour at `alpha` over a black background.
///
/// Terminals have no per-cell transparency, so translucency is approximated
/// by darkening toward black. `alpha` is clamped to `[0, 1]`.
pub fn fade(rgb: (u8, u8, u8), alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    Color::Rgb(
        (rgb.0 as f32 * a).round() as u8,
        (rgb.1 as f32 * a).round() as u8,
        (rgb.2 as f32 * a).round() as u8,
    )
}
