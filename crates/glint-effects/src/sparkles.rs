//! Density-scaled twinkling sparkles (stateful).

use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{Frame, layout::Rect};
use tracing::debug;

use crate::particles::sample_below;
use crate::surface::{CellSurface, Fill, Surface};

/// Area unit that `density` is expressed against.
pub const DENSITY_AREA: f32 = 10_000.0;

/// Slowest fade step per frame.
pub const MIN_FADE_SPEED: f32 = 0.01;

/// Fastest fade step per frame (exclusive). Also bounds opacity overshoot.
pub const MAX_FADE_SPEED: f32 = 0.03;

/// Peak fill alpha relative to opacity.
const ALPHA_SCALE: f32 = 0.8;

/// State for a single sparkle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Nominally in `[0, 1]`; may overshoot by less than one fade step.
    pub opacity: f32,
    pub fade_speed: f32,
    /// `1.0` while brightening, `-1.0` while dimming.
    pub direction: f32,
}

/// Number of sparkles for a `width` x `height` surface.
pub fn population(width: f32, height: f32, density: f32) -> usize {
    let count = (width * height / DENSITY_AREA * density).ceil();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// A field of sparkles whose size follows the surface area.
#[derive(Debug)]
pub struct SparkleSystem {
    sparkles: Vec<Sparkle>,
    density: f32,
    surface: CellSurface,
    last_size: Option<(u16, u16)>,
    rng: StdRng,
}

impl SparkleSystem {
    /// Create a system with `density` sparkles per 10 000 cells.
    pub fn new(density: f32) -> Self {
        Self::with_rng(density, StdRng::from_entropy())
    }

    /// Create a system with a deterministic random source.
    pub fn with_seed(density: f32, seed: u64) -> Self {
        Self::with_rng(density, StdRng::seed_from_u64(seed))
    }

    fn with_rng(density: f32, rng: StdRng) -> Self {
        Self {
            sparkles: Vec::new(),
            density,
            surface: CellSurface::default(),
            last_size: None,
            rng,
        }
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn surface(&self) -> &CellSurface {
        &self.surface
    }

    /// Match the surface to a container and rebuild the population.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.surface.resize(width, height);
        self.last_size = Some((width, height));
        self.init();
        debug!(width, height, count = self.sparkles.len(), "sparkle field rebuilt");
    }

    fn init(&mut self) {
        let (w, h) = (self.surface.width(), self.surface.height());
        let count = population(w, h, self.density);
        let rng = &mut self.rng;
        self.sparkles = (0..count)
            .map(|_| Sparkle {
                x: sample_below(rng, w),
                y: sample_below(rng, h),
                radius: rng.gen_range(0.4..1.0),
                opacity: rng.gen_range(0.0..1.0),
                fade_speed: rng.gen_range(MIN_FADE_SPEED..MAX_FADE_SPEED),
                direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            })
            .collect();
    }

    /// Step every sparkle's opacity, bouncing at the ends of `[0, 1]`.
    pub fn step(&mut self) {
        for s in &mut self.sparkles {
            s.opacity += s.fade_speed * s.direction;
            // Only turn around when heading outward so a sparkle resting
            // exactly on a boundary cannot oscillate in place.
            if (s.opacity <= 0.0 && s.direction < 0.0) || (s.opacity >= 1.0 && s.direction > 0.0)
            {
                s.direction = -s.direction;
            }
        }
    }

    /// Clear the surface and draw every sparkle.
    pub fn draw(&mut self) {
        draw_sparkles(&self.sparkles, &mut self.surface);
    }

    /// Run one frame into `area`, rebuilding first if its size changed.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.last_size != Some((area.width, area.height)) {
            self.resize(area.width, area.height);
        }
        self.step();
        self.draw();
        self.surface.paint(frame.buffer_mut(), area);
    }
}

/// Clear `surface` and draw `sparkles` with alpha scaled from their opacity.
pub fn draw_sparkles<S: Surface>(sparkles: &[Sparkle], surface: &mut S) {
    surface.clear();
    for s in sparkles {
        surface.fill_circle(s.x, s.y, s.radius, Fill::white(s.opacity * ALPHA_SCALE));
    }
}
