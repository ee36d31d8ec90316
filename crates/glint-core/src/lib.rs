//! Core types shared by the glint crates.
//!
//! Holds the colour theme, the countdown state machine and the persistence
//! seam used to keep the countdown target stable across runs.

mod countdown;
mod target;
mod theme;

pub use countdown::{
    CountdownDisplay, CountdownState, CountdownTimer, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE,
    MS_PER_SECOND, Remaining, Tick,
};
pub use target::{
    MemoryStore, StoreError, TARGET_KEY, TARGET_OFFSET_MS, TargetStore, resolve_target,
};
pub use theme::ColorTheme;
