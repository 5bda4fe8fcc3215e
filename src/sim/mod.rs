//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Unit physics step per tick
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod fruit;
pub mod input;
pub mod layout;
pub mod particle;
pub mod schedule;
pub mod state;
pub mod tick;

pub use fruit::{Fruit, FruitKind, FruitState, StepOutcome, sway_angle};
pub use input::pick_fruit;
pub use layout::{Crown, LayoutParams, Placement};
pub use particle::Particle;
pub use schedule::{DeferredTask, TaskId};
pub use state::{SceneEvent, SceneState, Viewport};
pub use tick::tick;
