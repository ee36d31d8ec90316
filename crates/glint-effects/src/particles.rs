//! Drifting particle field with toroidal wraparound (stateful).

use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{Frame, layout::Rect};
use tracing::debug;

use crate::surface::{CellSurface, Fill, Surface};

/// Largest per-axis velocity magnitude, in cells per frame.
pub const MAX_DRIFT: f32 = 0.05;

/// Smallest particle radius, in cells.
pub const MIN_RADIUS: f32 = 0.5;

/// Largest particle radius (exclusive), in cells.
pub const MAX_RADIUS: f32 = 2.5;

/// Fixed translucent white fill shared by every particle.
const PARTICLE_FILL: Fill = Fill::white(0.6);

/// State for a single particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

/// A fixed-size population of particles drifting across a surface.
#[derive(Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    count: usize,
    surface: CellSurface,
    /// Container size the population was built for.
    last_size: Option<(u16, u16)>,
    rng: StdRng,
}

impl ParticleSystem {
    /// Create a system that maintains `count` particles.
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, StdRng::from_entropy())
    }

    /// Create a system with a deterministic random source.
    pub fn with_seed(count: usize, seed: u64) -> Self {
        Self::with_rng(count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, rng: StdRng) -> Self {
        Self {
            particles: Vec::with_capacity(count),
            count,
            surface: CellSurface::default(),
            last_size: None,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> &CellSurface {
        &self.surface
    }

    /// Match the surface to a container and resample the whole population.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.surface.resize(width, height);
        self.last_size = Some((width, height));
        self.init();
        debug!(width, height, count = self.count, "particle field rebuilt");
    }

    fn init(&mut self) {
        let (w, h) = (self.surface.width(), self.surface.height());
        let rng = &mut self.rng;
        self.particles = (0..self.count)
            .map(|_| Particle {
                x: sample_below(rng, w),
                y: sample_below(rng, h),
                vx: rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
                vy: rng.gen_range(-MAX_DRIFT..MAX_DRIFT),
                radius: rng.gen_range(MIN_RADIUS..MAX_RADIUS),
            })
            .collect();
    }

    /// Advance every particle by its velocity, wrapping at the edges.
    pub fn step(&mut self) {
        let (w, h) = (self.surface.width(), self.surface.height());
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx, w);
            p.y = wrap(p.y + p.vy, h);
        }
    }

    /// Clear the surface and draw every particle.
    pub fn draw(&mut self) {
        draw_particles(&self.particles, &mut self.surface);
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

/// Clear `surface` and draw `particles` onto it.
pub fn draw_particles<S: Surface>(particles: &[Particle], surface: &mut S) {
    surface.clear();
    for p in particles {
        surface.fill_circle(p.x, p.y, p.radius, PARTICLE_FILL);
    }
}

/// Uniform sample in `[0, max)`, or `0` for an empty range.
pub(crate) fn sample_below(rng: &mut StdRng, max: f32) -> f32 {
    if max > 0.0 { rng.gen_range(0.0..max) } else { 0.0 }
}

/// Map `v` onto `[0, max)` toroidally.
fn wrap(v: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    let w = v.rem_euclid(max);
    // rem_euclid can round up to `max` for tiny negative inputs.
    if w >= max { 0.0 } else { w }
}
