//! Linear and radial gradient fills.
//!
//! Gradient pixels are stored, not blended: the interpolated colour
//! (including its interpolated alpha) replaces the destination. Channels
//! mix independently with plain linear interpolation; no gamma correction
//! and no premultiplication inside the loops.

use crate::canvas::Canvas;
use crate::geometry::Rect;
use crate::model::color::Color;

/// Fills `rect` with a linear gradient from `start` to `end` at
/// `rotation_deg` degrees.
///
/// The gradient parameter `t` is the pixel's projection onto the gradient
/// axis, normalised by the rectangle's maximal centre projection and
/// clamped to `[0, 1]`.
pub fn fill_linear_gradient(
  canvas: &mut Canvas,
  rect: Rect,
  start: Color,
  end: Color,
  rotation_deg: f64,
) {
  let w = rect.width();
  let h = rect.height();
  if w <= 0 || h <= 0 {
    return;
  }
  let rad = rotation_deg.to_radians();
  let cos_a = rad.cos();
  let sin_a = rad.sin();
  let cx = w as f64 / 2.0;
  let cy = h as f64 / 2.0;
  let max_proj = ((cx * cos_a).abs() + (cy * sin_a).abs()).max(1.0);
  let inv_span = 1.0 / (2.0 * max_proj);

  let clipped = rect.intersect(&canvas.bounds());
  for py in clipped.min_y..clipped.max_y {
    let dy = (py - rect.min_y) as f64 - cy;
    let row_base = dy * sin_a + max_proj;
    for px in clipped.min_x..clipped.max_x {
      let dx = (px - rect.min_x) as f64 - cx;
      let t = ((dx * cos_a + row_base) * inv_span).clamp(0.0, 1.0);
      canvas.store_pixel(px, py, start.lerp(end, t));
    }
  }
}

/// Fills `rect` with a radial gradient from its centre (`start`) to its
/// corners (`end`).
pub fn fill_radial_gradient(canvas: &mut Canvas, rect: Rect, start: Color, end: Color) {
  let w = rect.width();
  let h = rect.height();
  if w <= 0 || h <= 0 {
    return;
  }
  let cx = w as f64 / 2.0;
  let cy = h as f64 / 2.0;
  let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);
  let inv_max = 1.0 / max_dist;

  let clipped = rect.intersect(&canvas.bounds());
  for py in clipped.min_y..clipped.max_y {
    let dy = (py - rect.min_y) as f64 - cy;
    let dy2 = dy * dy;
    for px in clipped.min_x..clipped.max_x {
      let dx = (px - rect.min_x) as f64 - cx;
      let t = ((dx * dx + dy2).sqrt() * inv_max).min(1.0);
      canvas.store_pixel(px, py, start.lerp(end, t));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn horizontal_gradient_endpoints_and_midpoint() {
    let mut c = Canvas::new(100, 10).unwrap();
    fill_linear_gradient(&mut c, Rect::from_xywh(0, 0, 100, 10), Color::RED, Color::BLUE, 0.0);
    let left = c.pixel(0, 5).unwrap();
    let right = c.pixel(99, 5).unwrap();
    let mid = c.pixel(50, 5).unwrap();
    assert!(left.r >= 250 && left.b <= 5);
    assert!(right.b >= 250 && right.r <= 5);
    assert!((mid.r as i32 - 127).abs() <= 1);
    assert!((mid.b as i32 - 128).abs() <= 1);
    assert_eq!(mid.a, 255);
  }

  #[test]
  fn vertical_gradient_runs_top_to_bottom() {
    let mut c = Canvas::new(10, 100).unwrap();
    fill_linear_gradient(&mut c, Rect::from_xywh(0, 0, 10, 100), Color::WHITE, Color::BLACK, 90.0);
    assert!(c.pixel(5, 0).unwrap().r >= 250);
    assert!(c.pixel(5, 99).unwrap().r <= 5);
  }

  #[test]
  fn radial_gradient_center_is_start() {
    let mut c = Canvas::new(50, 50).unwrap();
    fill_radial_gradient(&mut c, Rect::from_xywh(0, 0, 50, 50), Color::RED, Color::BLUE);
    let center = c.pixel(25, 25).unwrap();
    assert!(center.r >= 240, "center {center:?}");
    let corner = c.pixel(0, 0).unwrap();
    assert!(corner.b >= 240, "corner {corner:?}");
  }

  #[test]
  fn gradient_interpolates_alpha() {
    let mut c = Canvas::new(100, 1).unwrap();
    fill_linear_gradient(
      &mut c,
      Rect::from_xywh(0, 0, 100, 1),
      Color::rgba(0, 0, 0, 0),
      Color::rgba(0, 0, 0, 255),
      0.0,
    );
    let mid = c.pixel(50, 0).unwrap();
    assert!((mid.a as i32 - 127).abs() <= 2);
  }

  #[test]
  fn degenerate_rect_is_a_no_op() {
    let mut c = Canvas::new(10, 10).unwrap();
    let before = c.data().to_vec();
    fill_linear_gradient(&mut c, Rect::from_xywh(3, 3, 0, 5), Color::RED, Color::BLUE, 45.0);
    fill_radial_gradient(&mut c, Rect::from_xywh(3, 3, 5, 0), Color::RED, Color::BLUE);
    assert_eq!(c.data(), before.as_slice());
  }
}
