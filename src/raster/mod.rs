//! Rasterization primitives
//!
//! Free functions that draw into a [`crate::canvas::Canvas`]. One module per
//! concern: straight and dashed lines, ellipses and arcs, scanline polygon
//! fill, parametric shapes, gradient fills, and the scale/flip/rotate
//! compositor used for images and transformed subtrees.

pub mod compose;
pub mod ellipse;
pub mod gradient;
pub mod line;
pub mod polygon;
pub mod shapes;

pub use compose::{composite_rotated, flip_canvas, render_rotated, rotated_bounds, scale_bilinear};
pub use ellipse::{draw_arc, draw_ellipse_aa, fill_ellipse_aa};
pub use gradient::{fill_linear_gradient, fill_radial_gradient};
pub use line::{
  draw_dashed_hline, draw_dashed_vline, draw_line, draw_line_aa, draw_line_thick, draw_rect_border,
  draw_rect_outline,
};
pub use polygon::{draw_polygon, fill_polygon};
