//! Fruit and leaf drawing

use glam::Vec2;

use super::display_list::{Draw, DisplayList, PathOp, Rgba, with_alpha};
use crate::sim::{Fruit, FruitKind, Particle};

/// Body outline family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// Circle
    Round,
    /// Ellipse, wider than tall
    Oblate,
    /// Two arcs forming a banana
    Crescent,
}

/// Per-kind drawing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FruitStyle {
    pub shape: BodyShape,
    pub body: Rgba,
    pub highlight: Rgba,
    pub stem: Rgba,
    /// Horizontal / vertical radius multipliers
    pub aspect: Vec2,
    /// Draw a leaf on the stem
    pub leaf: bool,
}

const STEM_BROWN: Rgba = [0.36, 0.25, 0.20, 1.0];
const STEM_LEAF: Rgba = [0.30, 0.69, 0.31, 1.0];

impl FruitStyle {
    pub fn for_kind(kind: FruitKind) -> Self {
        match kind {
            FruitKind::Apple => Self {
                shape: BodyShape::Round,
                body: [0.90, 0.22, 0.21, 1.0],
                highlight: [1.0, 1.0, 1.0, 0.3],
                stem: STEM_BROWN,
                aspect: Vec2::ONE,
                leaf: true,
            },
            FruitKind::Orange => Self {
                shape: BodyShape::Oblate,
                body: [1.0, 0.60, 0.0, 1.0],
                highlight: [1.0, 1.0, 0.85, 0.3],
                stem: [0.33, 0.55, 0.18, 1.0],
                aspect: Vec2::new(1.0, 0.9),
                leaf: true,
            },
            FruitKind::Banana => Self {
                shape: BodyShape::Crescent,
                body: [1.0, 0.88, 0.21, 1.0],
                highlight: [1.0, 1.0, 0.8, 0.35],
                stem: STEM_BROWN,
                aspect: Vec2::new(1.2, 0.6),
                leaf: false,
            },
        }
    }
}

/// Crescent outline: outer arc along the bottom, shallower inner arc back
fn crescent(radius: f32) -> Vec<PathOp> {
    use std::f32::consts::PI;
    vec![
        PathOp::Arc {
            center: Vec2::new(0.0, -radius * 0.4),
            radius,
            start: 0.15 * PI,
            end: 0.85 * PI,
            counter_clockwise: false,
        },
        PathOp::Arc {
            center: Vec2::new(0.0, -radius * 0.9),
            radius: radius * 1.1,
            start: 0.8 * PI,
            end: 0.2 * PI,
            counter_clockwise: true,
        },
        PathOp::Close,
    ]
}

impl Draw for Fruit {
    /// Drawn in the fruit's local frame: origin at its center, rotated
    fn draw(&self, list: &mut DisplayList) {
        let style = FruitStyle::for_kind(self.kind);
        let r = self.radius;

        list.with_transform(self.pos, self.rotation, |list| {
            match style.shape {
                BodyShape::Round => list.fill_circle(Vec2::ZERO, r, style.body),
                BodyShape::Oblate => {
                    list.fill_ellipse(Vec2::ZERO, style.aspect * r, 0.0, style.body)
                }
                BodyShape::Crescent => list.fill_path(crescent(r), style.body),
            }

            // Shine
            let shine = Vec2::new(-r * 0.35, -r * 0.35) * style.aspect;
            list.fill_circle(shine, r * 0.2, style.highlight);

            // Stem
            let stem_top = Vec2::new(r * 0.1, -r * 1.2);
            let stem_base = match style.shape {
                BodyShape::Crescent => Vec2::new(-r * 0.9, -r * 0.1),
                _ => Vec2::new(0.0, -r * style.aspect.y * 0.9),
            };
            list.stroke_path(
                vec![PathOp::MoveTo(stem_base), PathOp::LineTo(stem_top)],
                style.stem,
                (r * 0.1).max(1.5),
            );

            if style.leaf {
                list.fill_ellipse(
                    stem_top + Vec2::new(r * 0.25, r * 0.05),
                    Vec2::new(r * 0.3, r * 0.12),
                    -0.5,
                    STEM_LEAF,
                );
            }
        });
    }
}

impl Draw for Particle {
    fn draw(&self, list: &mut DisplayList) {
        list.with_transform(self.pos, self.rotation, |list| {
            list.fill_ellipse(
                Vec2::ZERO,
                Vec2::new(6.0, 3.0),
                0.0,
                with_alpha(self.color, self.life.clamp(0.0, 1.0)),
            );
        });
    }
}
