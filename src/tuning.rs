//! Data-driven physics and layout constants
//!
//! Every hand-tuned number the simulation reads lives here so a page can
//! override it from JSON. Missing fields fall back to `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Fruit ===
    /// Visual radius of every fruit (pixels)
    pub fruit_radius: f32,
    /// Hit radius as a multiple of the visual radius
    pub hit_radius_scale: f32,

    // === Falling physics (per tick) ===
    pub gravity: f32,
    /// Restitution applied on ground and wall contact
    pub bounce: f32,
    /// Multiplier applied to horizontal and angular velocity on ground contact
    pub friction: f32,
    pub rest_threshold: f32,
    pub bounce_sound_threshold: f32,
    /// Ground level as a fraction of viewport height
    pub ground_ratio: f32,
    pub knock_impulse: f32,
    pub knock_spin: f32,

    // === Sway ===
    pub sway_amplitude: f32,
    pub sway_speed: f32,

    // === Crown / layout ===
    pub crown_center_x: f32,
    pub crown_center_y: f32,
    pub crown_radius_ratio: f32,
    pub crown_margin: f32,
    pub min_separation: f32,
    pub max_layout_attempts: u32,

    // === Particles ===
    pub particles_per_tap: usize,
    pub particle_spawn_lift: f32,
    pub particle_gravity: f32,
    pub particle_spin: f32,
    pub particle_speed_x: f32,
    pub particle_decay_min: f32,
    pub particle_decay_max: f32,
    pub leaf_color: [f32; 4],

    // === Reset ===
    /// Seconds between the last fruit falling and the tree regrowing
    pub reset_delay: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fruit_radius: FRUIT_RADIUS,
            hit_radius_scale: HIT_RADIUS_SCALE,

            gravity: GRAVITY,
            bounce: BOUNCE,
            friction: FRICTION,
            rest_threshold: REST_THRESHOLD,
            bounce_sound_threshold: BOUNCE_SOUND_THRESHOLD,
            ground_ratio: GROUND_RATIO,
            knock_impulse: KNOCK_IMPULSE,
            knock_spin: KNOCK_SPIN,

            sway_amplitude: SWAY_AMPLITUDE,
            sway_speed: SWAY_SPEED,

            crown_center_x: CROWN_CENTER_X,
            crown_center_y: CROWN_CENTER_Y,
            crown_radius_ratio: CROWN_RADIUS_RATIO,
            crown_margin: CROWN_MARGIN,
            min_separation: MIN_SEPARATION,
            max_layout_attempts: MAX_LAYOUT_ATTEMPTS,

            particles_per_tap: PARTICLES_PER_TAP,
            particle_spawn_lift: PARTICLE_SPAWN_LIFT,
            particle_gravity: PARTICLE_GRAVITY,
            particle_spin: PARTICLE_SPIN,
            particle_speed_x: PARTICLE_SPEED_X,
            particle_decay_min: PARTICLE_DECAY_MIN,
            particle_decay_max: PARTICLE_DECAY_MAX,
            leaf_color: LEAF_COLOR,

            reset_delay: RESET_DELAY,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value is in a range the simulation can live with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.fruit_radius) {
            return Err(ConfigError::invalid("fruit_radius", "must be positive"));
        }
        if self.hit_radius_scale < 1.0 {
            return Err(ConfigError::invalid(
                "hit_radius_scale",
                "must be at least 1.0",
            ));
        }
        if !positive(self.gravity) {
            return Err(ConfigError::invalid("gravity", "must be positive"));
        }
        // Sampled as symmetric or half-open ranges; a negative bound is an empty range
        if !non_negative(self.knock_impulse) {
            return Err(ConfigError::invalid("knock_impulse", "must not be negative"));
        }
        if !non_negative(self.knock_spin) {
            return Err(ConfigError::invalid("knock_spin", "must not be negative"));
        }
        if !non_negative(self.particle_speed_x) {
            return Err(ConfigError::invalid(
                "particle_speed_x",
                "must not be negative",
            ));
        }
        if !(0.0..1.0).contains(&self.bounce) {
            return Err(ConfigError::invalid("bounce", "must be in [0, 1)"));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(ConfigError::invalid("friction", "must be in [0, 1]"));
        }
        // A settled body gains gravity * bounce of upward speed per tick;
        // it must snap back to zero or the body jitters forever.
        if self.gravity * self.bounce >= self.rest_threshold {
            return Err(ConfigError::invalid(
                "rest_threshold",
                format!(
                    "must exceed gravity * bounce ({})",
                    self.gravity * self.bounce
                ),
            ));
        }
        if !positive(self.ground_ratio) || self.ground_ratio > 1.0 {
            return Err(ConfigError::invalid("ground_ratio", "must be in (0, 1]"));
        }
        if !positive(self.crown_radius_ratio) {
            return Err(ConfigError::invalid(
                "crown_radius_ratio",
                "must be positive",
            ));
        }
        if !non_negative(self.crown_margin) {
            return Err(ConfigError::invalid("crown_margin", "must not be negative"));
        }
        if !non_negative(self.min_separation) {
            return Err(ConfigError::invalid("min_separation", "must not be negative"));
        }
        if self.max_layout_attempts == 0 {
            return Err(ConfigError::invalid(
                "max_layout_attempts",
                "must be at least 1",
            ));
        }
        if !positive(self.particle_decay_min)
            || self.particle_decay_min >= self.particle_decay_max
        {
            return Err(ConfigError::invalid(
                "particle_decay_min",
                "decay range must be positive and non-empty",
            ));
        }
        if self.particle_gravity >= self.gravity {
            return Err(ConfigError::invalid(
                "particle_gravity",
                "leaves must fall slower than fruit",
            ));
        }
        if self.reset_delay < 0.0 {
            return Err(ConfigError::invalid("reset_delay", "must not be negative"));
        }
        Ok(())
    }

    /// Hit radius for a fruit of the configured size
    pub fn hit_radius(&self) -> f32 {
        self.fruit_radius * self.hit_radius_scale
    }
}

/// Strictly positive; NaN fails
#[inline]
fn positive(value: f32) -> bool {
    value > 0.0
}

/// Zero or more; NaN fails
#[inline]
fn non_negative(value: f32) -> bool {
    value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Tuning::default().validate().unwrap();
        assert!((Tuning::default().hit_radius() - 52.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.4, "reset_delay": 3.5 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.4);
        assert_eq!(tuning.reset_delay, 3.5);
        assert_eq!(tuning.fruit_radius, FRUIT_RADIUS);
        assert_eq!(tuning.max_layout_attempts, MAX_LAYOUT_ATTEMPTS);
    }

    #[test]
    fn test_rejects_jittering_rest() {
        let err = Tuning::from_json(r#"{ "gravity": 1.0, "bounce": 0.9, "rest_threshold": 0.5 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "rest_threshold",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ gravity: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let tuning = Tuning {
            max_layout_attempts: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_particle_speed() {
        let err = Tuning::from_json(r#"{ "particle_speed_x": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "particle_speed_x",
                ..
            }
        ));

        for json in [r#"{ "knock_impulse": -2.0 }"#, r#"{ "knock_spin": -0.1 }"#] {
            assert!(Tuning::from_json(json).is_err(), "{json}");
        }
        // Zero spread is fine: leaves just drop straight down
        assert!(Tuning::from_json(r#"{ "particle_speed_x": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_negative_margin_names_its_field() {
        let tuning = Tuning {
            crown_margin: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid {
                field: "crown_margin",
                ..
            })
        ));

        let tuning = Tuning {
            min_separation: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid {
                field: "min_separation",
                ..
            })
        ));
    }
}
