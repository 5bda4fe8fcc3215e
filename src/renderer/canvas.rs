//! Canvas2D backend: replays a display list onto a `<canvas>`

use web_sys::CanvasRenderingContext2d;

use super::display_list::{DisplayList, DrawCommand, PathOp, css_color};

/// Canvas renderer state
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Device pixel ratio applied as a base scale
    pub scale: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, scale: f64) -> Self {
        Self { ctx, scale }
    }

    /// Draw a full frame
    pub fn render(&self, list: &DisplayList) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0);

        for command in &list.commands {
            match command {
                DrawCommand::Save => ctx.save(),
                DrawCommand::Restore => ctx.restore(),
                DrawCommand::Translate(offset) => {
                    let _ = ctx.translate(offset.x as f64, offset.y as f64);
                }
                DrawCommand::Rotate(angle) => {
                    let _ = ctx.rotate(*angle as f64);
                }
                DrawCommand::FillRect { min, size, color } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.fill();
                }
                DrawCommand::FillEllipse {
                    center,
                    radii,
                    rotation,
                    color,
                } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.begin_path();
                    let _ = ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        *rotation as f64,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.fill();
                }
                DrawCommand::FillPath { ops, color } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    self.trace_path(ops);
                    ctx.fill();
                }
                DrawCommand::StrokePath { ops, color, width } => {
                    ctx.set_stroke_style_str(&css_color(*color));
                    ctx.set_line_width(*width as f64);
                    ctx.set_line_cap("round");
                    self.trace_path(ops);
                    ctx.stroke();
                }
            }
        }

        ctx.restore();
    }

    fn trace_path(&self, ops: &[PathOp]) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for op in ops {
            match op {
                PathOp::MoveTo(p) => ctx.move_to(p.x as f64, p.y as f64),
                PathOp::LineTo(p) => ctx.line_to(p.x as f64, p.y as f64),
                PathOp::QuadTo { control, to } => ctx.quadratic_curve_to(
                    control.x as f64,
                    control.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                PathOp::Arc {
                    center,
                    radius,
                    start,
                    end,
                    counter_clockwise,
                } => {
                    let _ = ctx.arc_with_anticlockwise(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        *start as f64,
                        *end as f64,
                        *counter_clockwise,
                    );
                }
                PathOp::Close => ctx.close_path(),
            }
        }
    }
}
