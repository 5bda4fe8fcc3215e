//! Backend-neutral drawing commands
//!
//! The scene renders into a `DisplayList`; a backend (Canvas2D in the
//! browser) replays it. Keeping the list as plain data makes frames testable
//! without a canvas.

use glam::Vec2;

/// Linear RGBA, components in 0-1
pub type Rgba = [f32; 4];

/// Format a color for CSS (`rgba(r, g, b, a)`)
pub fn css_color(color: Rgba) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {:.3})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Scale a color's alpha
#[inline]
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Path segment
#[derive(Debug, Clone, PartialEq)]
pub enum PathOp {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { control: Vec2, to: Vec2 },
    /// Circular arc around `center` from `start` to `end` (radians)
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        counter_clockwise: bool,
    },
    Close,
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Push the current transform
    Save,
    /// Pop back to the last `Save`
    Restore,
    Translate(Vec2),
    /// Radians, clockwise in screen space
    Rotate(f32),
    FillRect { min: Vec2, size: Vec2, color: Rgba },
    FillCircle { center: Vec2, radius: f32, color: Rgba },
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: Rgba,
    },
    FillPath { ops: Vec<PathOp>, color: Rgba },
    StrokePath {
        ops: Vec<PathOp>,
        color: Rgba,
        width: f32,
    },
}

/// Ordered list of drawing commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Run `f` with a translate + rotate applied, restoring afterwards
    pub fn with_transform(&mut self, translate: Vec2, rotate: f32, f: impl FnOnce(&mut Self)) {
        self.push(DrawCommand::Save);
        self.push(DrawCommand::Translate(translate));
        if rotate != 0.0 {
            self.push(DrawCommand::Rotate(rotate));
        }
        f(self);
        self.push(DrawCommand::Restore);
    }

    pub fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.push(DrawCommand::FillRect { min, size, color });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Rgba) {
        self.push(DrawCommand::FillEllipse {
            center,
            radii,
            rotation,
            color,
        });
    }

    pub fn fill_path(&mut self, ops: Vec<PathOp>, color: Rgba) {
        self.push(DrawCommand::FillPath { ops, color });
    }

    pub fn stroke_path(&mut self, ops: Vec<PathOp>, color: Rgba, width: f32) {
        self.push(DrawCommand::StrokePath { ops, color, width });
    }
}

/// Anything that can put itself on a display list
pub trait Draw {
    fn draw(&self, list: &mut DisplayList);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color([1.0, 0.0, 0.5, 1.0]), "rgba(255, 0, 128, 1.000)");
        assert_eq!(css_color([2.0, -1.0, 0.0, 0.25]), "rgba(255, 0, 0, 0.250)");
    }

    #[test]
    fn test_with_transform_balances() {
        let mut list = DisplayList::new();
        list.with_transform(Vec2::new(5.0, 6.0), 0.5, |l| {
            l.fill_circle(Vec2::ZERO, 3.0, [1.0; 4]);
        });
        assert_eq!(
            list.commands,
            vec![
                DrawCommand::Save,
                DrawCommand::Translate(Vec2::new(5.0, 6.0)),
                DrawCommand::Rotate(0.5),
                DrawCommand::FillCircle {
                    center: Vec2::ZERO,
                    radius: 3.0,
                    color: [1.0; 4]
                },
                DrawCommand::Restore,
            ]
        );
    }

    #[test]
    fn test_zero_rotation_is_skipped() {
        let mut list = DisplayList::new();
        list.with_transform(Vec2::ONE, 0.0, |_| {});
        assert_eq!(list.len(), 3);
    }
}
