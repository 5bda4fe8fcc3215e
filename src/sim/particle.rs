//! Falling-leaf particles (decorative only)

use glam::Vec2;
use rand::Rng;

use super::fruit::symmetric;
use crate::tuning::Tuning;

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, removed once it reaches 0
    pub life: f32,
    /// Life lost per tick
    pub decay: f32,
    pub color: [f32; 4],
    pub rotation: f32,
}

impl Particle {
    /// Spawn one leaf with a randomized launch and decay
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        pos: Vec2,
        color: [f32; 4],
        tuning: &Tuning,
    ) -> Self {
        let speed = tuning.particle_speed_x;
        let lift = if speed > 0.0 {
            rng.random_range(0.0..=speed)
        } else {
            0.0
        };
        let (min, max) = (tuning.particle_decay_min, tuning.particle_decay_max);
        let decay = if max > min {
            rng.random_range(min..max)
        } else {
            min
        };

        Self {
            pos,
            vel: Vec2::new(symmetric(rng, speed), -lift),
            life: 1.0,
            decay,
            color,
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    /// Advance one tick. Returns false once the particle has expired.
    pub fn update(&mut self, tuning: &Tuning) -> bool {
        self.pos += self.vel;
        self.vel.y += tuning.particle_gravity;
        self.life -= self.decay;
        self.rotation += tuning.particle_spin;
        self.is_alive()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Spawn a burst of `count` leaves sharing one color
pub fn spawn_burst<R: Rng + ?Sized>(
    rng: &mut R,
    origin: Vec2,
    count: usize,
    color: [f32; 4],
    tuning: &Tuning,
) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle::spawn(rng, origin, color, tuning))
        .collect()
}

/// Update every particle and drop the expired ones in the same pass
pub fn update_all(particles: &mut Vec<Particle>, tuning: &Tuning) {
    particles.retain_mut(|p| p.update(tuning));
}
