//! Fruit bodies: hanging sway and falling physics

use glam::Vec2;
use rand::Rng;

use super::state::Viewport;
use crate::tuning::Tuning;

/// Which fruit the tree is growing this round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitKind {
    /// Round and red
    Apple,
    /// Slightly squashed, orange
    Orange,
    /// Yellow crescent
    Banana,
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::Apple, FruitKind::Orange, FruitKind::Banana];

    /// Pick a kind uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Orange => "orange",
            FruitKind::Banana => "banana",
        }
    }
}

/// Fruit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruitState {
    /// On the branch, swaying
    Hanging,
    /// Knocked loose; never goes back
    Falling,
}

/// Result of one falling-physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutcome {
    /// Vertical speed at impact when the ground bounce was loud enough to hear
    pub audible_bounce: Option<f32>,
}

/// A fruit entity
#[derive(Debug, Clone)]
pub struct Fruit {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hit_radius: f32,
    pub state: FruitState,
    /// Radians
    pub rotation: f32,
    pub angular_vel: f32,
    pub kind: FruitKind,
    /// Fixed at creation so neighbours don't sway in lockstep
    pub sway_phase: f32,
}

impl Fruit {
    pub fn new(pos: Vec2, kind: FruitKind, sway_phase: f32, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: tuning.fruit_radius,
            hit_radius: tuning.hit_radius(),
            state: FruitState::Hanging,
            rotation: 0.0,
            angular_vel: 0.0,
            kind,
            sway_phase,
        }
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.state == FruitState::Falling
    }

    /// True if `point` lands inside the (enlarged) hit circle
    #[inline]
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.hit_radius
    }

    /// Knock the fruit off the branch.
    ///
    /// Gives a small sideways shove and spin; gravity does the rest.
    /// Returns false if it was already falling.
    pub fn knock<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) -> bool {
        if self.is_falling() {
            return false;
        }
        self.state = FruitState::Falling;
        self.vel = Vec2::new(symmetric(rng, tuning.knock_impulse), 0.0);
        self.angular_vel = symmetric(rng, tuning.knock_spin);
        true
    }

    /// Advance one tick. `time` is elapsed wall-clock seconds.
    pub fn update(&mut self, time: f64, viewport: Viewport, tuning: &Tuning) -> StepOutcome {
        match self.state {
            FruitState::Hanging => {
                self.rotation = sway_angle(time, self.sway_phase, tuning);
                StepOutcome::default()
            }
            FruitState::Falling => self.step_falling(viewport, tuning),
        }
    }

    fn step_falling(&mut self, viewport: Viewport, tuning: &Tuning) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        self.vel.y += tuning.gravity;
        self.pos += self.vel;
        self.rotation += self.angular_vel;

        // Ground
        let ground = viewport.ground_level(tuning);
        if self.pos.y + self.radius > ground {
            let impact = self.vel.y.abs();
            self.pos.y = ground - self.radius;
            self.vel.y = -self.vel.y * tuning.bounce;
            self.vel.x *= tuning.friction;
            self.angular_vel *= tuning.friction;

            if self.vel.y.abs() < tuning.rest_threshold {
                self.vel.y = 0.0;
            }
            if self.vel.x.abs() < tuning.rest_threshold {
                self.vel.x = 0.0;
            }

            if impact > tuning.bounce_sound_threshold {
                outcome.audible_bounce = Some(impact);
            }
        }

        // Walls
        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x * tuning.bounce;
        } else if self.pos.x + self.radius > viewport.width {
            self.pos.x = viewport.width - self.radius;
            self.vel.x = -self.vel.x * tuning.bounce;
        }

        outcome
    }
}

/// Hanging rotation as a pure function of time
#[inline]
pub fn sway_angle(time: f64, sway_phase: f32, tuning: &Tuning) -> f32 {
    let t = (time * tuning.sway_speed as f64) as f32;
    (t + sway_phase).sin() * tuning.sway_amplitude
}

/// Uniform sample in [-range, range]
#[inline]
pub(crate) fn symmetric<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    if range <= 0.0 {
        return 0.0;
    }
    rng.random_range(-range..=range)
}
