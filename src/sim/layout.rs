//! Fruit placement on the tree crown
//!
//! Rejection sampling inside a disc: draw a uniform point, keep it if it is far
//! enough from everything already placed, give up after a fixed number of tries
//! and keep the last candidate anyway. Always returns the requested count.

use glam::Vec2;
use rand::Rng;

use super::state::Viewport;
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// The circular foliage region fruit is placed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crown {
    pub center: Vec2,
    pub radius: f32,
}

impl Crown {
    /// Crown geometry for a viewport
    pub fn for_viewport(viewport: Viewport, tuning: &Tuning) -> Self {
        Self {
            center: Vec2::new(
                viewport.width * tuning.crown_center_x,
                viewport.height * tuning.crown_center_y,
            ),
            radius: viewport.width.min(viewport.height) * tuning.crown_radius_ratio,
        }
    }

    /// Radius fruit centers are sampled within (never negative)
    pub fn sampling_radius(&self, margin: f32) -> f32 {
        (self.radius - margin).max(0.0)
    }
}

/// One placed fruit position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    /// Attempts used (1-based)
    pub attempts: u32,
    /// True if the attempt cap was hit and the point may overlap a neighbour
    pub capped: bool,
}

/// Layout request
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    pub center: Vec2,
    pub sampling_radius: f32,
    pub min_separation: f32,
    pub max_attempts: u32,
}

impl LayoutParams {
    pub fn new(crown: Crown, tuning: &Tuning) -> Self {
        Self {
            center: crown.center,
            sampling_radius: crown.sampling_radius(tuning.crown_margin),
            min_separation: tuning.min_separation,
            max_attempts: tuning.max_layout_attempts.max(1),
        }
    }
}

/// Uniform-by-area point in a disc
#[inline]
pub fn sample_disc<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    let r = radius * rng.random::<f32>().sqrt();
    let theta = rng.random_range(0.0..std::f32::consts::TAU);
    center + polar_to_cartesian(r, theta)
}

/// Place `count` points in the disc described by `params`
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    params: &LayoutParams,
    count: usize,
) -> Vec<Placement> {
    let mut placed: Vec<Placement> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut attempts = 0;
        let placement = loop {
            attempts += 1;
            let candidate = sample_disc(rng, params.center, params.sampling_radius);
            let clear = placed
                .iter()
                .all(|p| p.pos.distance(candidate) >= params.min_separation);

            if clear {
                break Placement {
                    pos: candidate,
                    attempts,
                    capped: false,
                };
            }
            if attempts >= params.max_attempts {
                // Crowded crown: accept the overlap rather than leave a gap
                break Placement {
                    pos: candidate,
                    attempts,
                    capped: true,
                };
            }
        };
        placed.push(placement);
    }

    let capped = placed.iter().filter(|p| p.capped).count();
    if capped > 0 {
        log::debug!(
            "Layout: {}/{} fruit placed after exhausting {} attempts",
            capped,
            count,
            params.max_attempts
        );
    }

    placed
}
