//! Animated effects for the glint splash screen.
//!
//! Each effect owns its own state and is advanced one frame per call to its
//! `render` method. The dot effects (particles, sparkles) draw onto a
//! [`Surface`]; the icon cloud places text labels straight into the frame
//! buffer. Every effect rebuilds itself when the area it is handed changes
//! size, so resizes need no separate handling.

mod chars;
mod color;
mod icon_cloud;
mod particles;
mod sparkles;
mod surface;

pub use color::fade;
pub use icon_cloud::{
    FULL_LABEL_SCALE, IconCloud, IconView, PITCH_RATE, Projection, RADIUS_DIVISOR, YAW_RATE,
    depth_scale, fibonacci_sphere, golden_angle, project, sphere_radius,
};
pub use particles::{MAX_DRIFT, MAX_RADIUS, MIN_RADIUS, Particle, ParticleSystem, draw_particles};
pub use sparkles::{
    DENSITY_AREA, MAX_FADE_SPEED, MIN_FADE_SPEED, Sparkle, SparkleSystem, draw_sparkles, population,
};
pub use surface::{CellSurface, Fill, Surface};
