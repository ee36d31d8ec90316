//! Rotating sphere of icon labels.
//!
//! Labels are spread over a sphere with the Fibonacci (golden-angle) spiral,
//! which spaces points almost uniformly without bunching at the poles. Every
//! frame the sphere is rotated about Y then X and orthographically projected,
//! with depth mapped to scale, opacity and stacking order.
//!
//! Terminal cells are roughly twice as tall as they are wide, so the sphere
//! is laid out in half-row units vertically and halved again when placed.

use std::f32::consts::PI;
use std::f64::consts::TAU;

use glint_core::ColorTheme;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use tracing::{debug, error};

use crate::color::fade;

/// Container's smaller dimension divided by this gives the sphere radius.
pub const RADIUS_DIVISOR: f32 = 2.2;

/// Rotation about the vertical axis per frame, in radians.
pub const YAW_RATE: f64 = 0.001;

/// Rotation about the horizontal axis per frame, in radians.
pub const PITCH_RATE: f64 = 0.0005;

/// Labels at or above this scale are drawn in full and bold.
pub const FULL_LABEL_SCALE: f32 = 0.66;

/// Length of the abbreviated label drawn for far-side icons.
const SHORT_LABEL_LEN: usize = 3;

/// Position used when only one point is placed: front centre.
const SINGLE_POINT: [f32; 3] = [0.0, 0.0, 1.0];

/// Angle between successive points of the spiral, `π(3 − √5)`.
pub fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

/// Spread `n` points over the unit sphere.
///
/// Point `0` sits at the top pole and point `n - 1` at the bottom pole.
pub fn fibonacci_sphere(n: usize) -> Vec<[f32; 3]> {
    match n {
        0 => Vec::new(),
        1 => vec![SINGLE_POINT],
        _ => {
            let golden = golden_angle();
            let last = (n - 1) as f32;
            (0..n)
                .map(|i| {
                    let theta = golden * i as f32;
                    let y = 1.0 - (i as f32 / last) * 2.0;
                    // Guard against tiny negative values from rounding at the poles.
                    let radius_at_y = (1.0 - y * y).max(0.0).sqrt();
                    [theta.cos() * radius_at_y, y, theta.sin() * radius_at_y]
                })
                .collect()
        }
    }
}

/// Sphere radius for a container measured in cells.
pub fn sphere_radius(width: u16, height: u16) -> f32 {
    (width as f32).min(height as f32 * 2.0) / RADIUS_DIVISOR
}

/// Placement of one point after rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Horizontal offset from the container centre.
    pub x: f32,
    /// Vertical offset from the container centre, in half-rows.
    pub y: f32,
    /// Depth after rotation; positive is toward the viewer.
    pub z: f32,
    /// Roughly `[1/3, 1]`, larger when nearer.
    pub scale: f32,
    /// `scale * 0.8 + 0.2`, clamped to `[0.2, 1]`.
    pub opacity: f32,
    /// Stacking priority; higher draws on top.
    pub z_index: i32,
}

/// Rotate `point` (sphere-local, already scaled by `radius`) about Y by
/// `angle_y`, then about X by `angle_x`, and project it.
pub fn project(point: [f32; 3], radius: f32, angle_x: f32, angle_y: f32) -> Projection {
    let [px, py, pz] = point;
    let (sin_x, cos_x) = angle_x.sin_cos();
    let (sin_y, cos_y) = angle_y.sin_cos();

    let x = px * cos_y - pz * sin_y;
    let z = px * sin_y + pz * cos_y;

    let y = py * cos_x - z * sin_x;
    let z = py * sin_x + z * cos_x;

    let scale = depth_scale(z, radius);
    Projection {
        x,
        y,
        z,
        scale,
        opacity: (scale * 0.8 + 0.2).clamp(0.2, 1.0),
        z_index: (scale * 100.0).floor() as i32,
    }
}

/// Map depth in `[-radius, radius]` onto a scale of roughly `[1/3, 1]`.
pub fn depth_scale(z: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 1.0;
    }
    (z + radius * 2.0) / (radius * 3.0)
}

/// Reduce an accumulated angle to `[0, 2π)` for single-precision trig.
fn turn(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}

/// A label with its current projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconView<'a> {
    pub label: &'a str,
    pub projection: Projection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CloudLayout {
    /// No container: never lays out or draws.
    Inert,
    /// Container exists but has not been measured yet.
    Pending,
    Ready { size: (u16, u16), radius: f32 },
}

/// A rotating sphere of labels.
#[derive(Debug)]
pub struct IconCloud {
    labels: Vec<String>,
    /// Unit-sphere positions, one per label.
    points: Vec<[f32; 3]>,
    /// Accumulated rotation. Kept in f64 so per-frame steps still register
    /// after days of uptime.
    angle_x: f64,
    angle_y: f64,
    layout: CloudLayout,
}

impl IconCloud {
    /// Create a cloud for `labels` inside `container`.
    ///
    /// `None` means the container does not exist: the error is logged and
    /// the cloud stays inert. An unmeasured (zero-sized) container defers
    /// layout until the first frame that supplies a real area.
    pub fn new<S: Into<String>>(
        labels: impl IntoIterator<Item = S>,
        container: Option<Rect>,
    ) -> Self {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let layout = match container {
            None => {
                error!("icon cloud container not found");
                CloudLayout::Inert
            }
            Some(_) => CloudLayout::Pending,
        };
        let mut cloud = Self {
            points: fibonacci_sphere(labels.len()),
            labels,
            angle_x: 0.0,
            angle_y: 0.0,
            layout,
        };
        if let Some(area) = container {
            cloud.layout(area);
        }
        cloud
    }

    pub fn is_inert(&self) -> bool {
        self.layout == CloudLayout::Inert
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.layout, CloudLayout::Ready { .. })
    }

    /// Current sphere radius, once laid out.
    pub fn radius(&self) -> Option<f32> {
        match self.layout {
            CloudLayout::Ready { radius, .. } => Some(radius),
            _ => None,
        }
    }

    /// Current `(angle_x, angle_y)` in radians.
    pub fn angles(&self) -> (f64, f64) {
        (self.angle_x, self.angle_y)
    }

    /// Measure `area` and size the sphere to it.
    ///
    /// Only the radius changes; the unit positions stay fixed.
    pub fn layout(&mut self, area: Rect) {
        if self.is_inert() || area.width == 0 || area.height == 0 {
            return;
        }
        let size = (area.width, area.height);
        if matches!(self.layout, CloudLayout::Ready { size: s, .. } if s == size) {
            return;
        }
        let radius = sphere_radius(area.width, area.height);
        debug!(width = size.0, height = size.1, radius, "icon cloud laid out");
        self.layout = CloudLayout::Ready { size, radius };
    }

    /// Advance the rotation by one frame.
    pub fn advance(&mut self) {
        if self.is_inert() {
            return;
        }
        self.angle_y += YAW_RATE;
        self.angle_x += PITCH_RATE;
    }

    /// Project every label, farthest first.
    pub fn views(&self) -> Vec<IconView<'_>> {
        let Some(radius) = self.radius() else {
            return Vec::new();
        };
        let angle_x = turn(self.angle_x);
        let angle_y = turn(self.angle_y);
        let mut views: Vec<IconView<'_>> = self
            .labels
            .iter()
            .zip(&self.points)
            .map(|(label, &unit)| IconView {
                label,
                projection: project(
                    unit.map(|c| c * radius),
                    radius,
                    angle_x,
                    angle_y,
                ),
            })
            .collect();
        views.sort_by_key(|v| v.projection.z_index);
        views
    }

    /// Run one frame into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: ColorTheme) {
        if self.is_inert() {
            return;
        }
        self.layout(area);
        self.advance();
        self.draw(frame.buffer_mut(), area, theme);
    }

    /// Draw the current views into `buf`, clipped to `area`.
    pub fn draw(&self, buf: &mut Buffer, area: Rect, theme: ColorTheme) {
        let cx = area.x as f32 + area.width as f32 / 2.0;
        let cy = area.y as f32 + area.height as f32 / 2.0;
        let rgb = theme.rgb();

        for view in self.views() {
            let p = view.projection;
            let row = (cy + p.y / 2.0).floor();
            if row < area.top() as f32 || row >= area.bottom() as f32 {
                continue;
            }

            let full = p.scale >= FULL_LABEL_SCALE;
            let text: Vec<char> = if full {
                view.label.chars().collect()
            } else {
                view.label.chars().take(SHORT_LABEL_LEN).collect()
            };
            let mut style = Style::new().fg(fade(rgb, p.opacity));
            if full {
                style = style.add_modifier(Modifier::BOLD);
            }

            let start = (cx + p.x - text.len() as f32 / 2.0).round() as i32;
            for (i, ch) in text.into_iter().enumerate() {
                let col = start + i as i32;
                if col < area.left() as i32 || col >= area.right() as i32 {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((col as u16, row as u16)) {
                    cell.set_char(ch).set_style(style);
                }
            }
        }
    }
}
