//! Rendering module
//!
//! The scene is turned into a backend-neutral display list; in the browser the
//! Canvas2D backend replays it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod display_list;
pub mod frame;
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use display_list::{Draw, DisplayList, DrawCommand, PathOp, Rgba, css_color};
pub use frame::build_frame;
pub use sprites::{BodyShape, FruitStyle};
