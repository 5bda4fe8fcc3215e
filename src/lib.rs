//! Fruit Tree - tap the tree, knock down the fruit
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (fruit physics, particles, layout, reset timer)
//! - `renderer`: Display list generation and the Canvas2D backend
//! - `audio`: Tone cues and Web Audio playback
//! - `settings` / `tuning`: Host preferences and data-driven physics constants

pub mod audio;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Physics values are in pixels per tick; one tick is one `SIM_DT` step.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one physics unit step per tick)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Fruit defaults
    pub const FRUIT_RADIUS: f32 = 40.0;
    /// Hit radius is enlarged so small fingers still land
    pub const HIT_RADIUS_SCALE: f32 = 1.3;
    pub const FRUIT_COUNT: usize = 8;
    /// Upper bound accepted from config
    pub const MAX_FRUIT_COUNT: usize = 64;

    /// Falling body physics
    pub const GRAVITY: f32 = 0.5;
    pub const BOUNCE: f32 = 0.6;
    pub const FRICTION: f32 = 0.8;
    /// Speeds below this are snapped to zero on ground contact
    pub const REST_THRESHOLD: f32 = 0.5;
    /// Impacts slower than this are silent
    pub const BOUNCE_SOUND_THRESHOLD: f32 = 2.0;
    /// Ground sits at this fraction of the viewport height
    pub const GROUND_RATIO: f32 = 0.8;

    /// Knock impulse (uniform in +/- range)
    pub const KNOCK_IMPULSE: f32 = 2.0;
    pub const KNOCK_SPIN: f32 = 0.1;

    /// Hanging sway
    pub const SWAY_AMPLITUDE: f32 = 0.1;
    pub const SWAY_SPEED: f32 = 2.0;

    /// Crown geometry (fractions of the viewport)
    pub const CROWN_CENTER_X: f32 = 0.5;
    pub const CROWN_CENTER_Y: f32 = 0.4;
    pub const CROWN_RADIUS_RATIO: f32 = 0.35;
    /// Keeps sampled centers roughly one fruit radius inside the crown edge
    pub const CROWN_MARGIN: f32 = 40.0;

    /// Layout packing
    pub const MIN_SEPARATION: f32 = 80.0;
    pub const MAX_LAYOUT_ATTEMPTS: u32 = 200;

    /// Leaf particles
    pub const PARTICLES_PER_TAP: usize = 5;
    pub const PARTICLE_SPAWN_LIFT: f32 = 10.0;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_SPIN: f32 = 0.1;
    pub const PARTICLE_SPEED_X: f32 = 2.0;
    pub const PARTICLE_DECAY_MIN: f32 = 0.01;
    pub const PARTICLE_DECAY_MAX: f32 = 0.03;
    pub const LEAF_COLOR: [f32; 4] = [0.30, 0.69, 0.31, 1.0];

    /// Seconds to wait after the last fruit falls before regrowing the tree
    pub const RESET_DELAY: f64 = 10.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
