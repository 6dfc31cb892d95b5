//! Scanline polygon fill and stroked polygon outlines.

use crate::canvas::Canvas;
use crate::geometry::{PointF, Rect};
use crate::model::color::Color;

use super::line::draw_line_aa;

/// Fills a polygon by scanline.
///
/// For each pixel row the sample line sits at `y + 0.5`; an edge contributes
/// an intersection iff `min(y_i, y_j) <= fy < max(y_i, y_j)` (half-open, so
/// shared vertices count once). Sorted intersections are paired and each
/// span `[ceil(x_a), floor(x_b)]` is filled inclusively, taking the opaque
/// row path for opaque colours.
pub fn fill_polygon(canvas: &mut Canvas, pts: &[PointF], c: Color) {
  if pts.len() < 3 {
    return;
  }
  let mut min_y = pts[0].y;
  let mut max_y = pts[0].y;
  for p in &pts[1..] {
    min_y = min_y.min(p.y);
    max_y = max_y.max(p.y);
  }

  let n = pts.len();
  let mut intersections: Vec<f64> = Vec::with_capacity(n);

  for y in (min_y as i32)..=(max_y as i32) {
    let fy = y as f64 + 0.5;
    intersections.clear();
    for i in 0..n {
      let j = (i + 1) % n;
      let (y1, y2) = (pts[i].y.min(pts[j].y), pts[i].y.max(pts[j].y));
      if fy < y1 || fy >= y2 {
        continue;
      }
      let dy = pts[j].y - pts[i].y;
      if dy == 0.0 {
        continue;
      }
      let t = (fy - pts[i].y) / dy;
      intersections.push(pts[i].x + t * (pts[j].x - pts[i].x));
    }
    intersections.sort_by(f64::total_cmp);
    for pair in intersections.chunks_exact(2) {
      let x1 = pair[0].ceil() as i32;
      let x2 = pair[1].floor() as i32;
      if x1 <= x2 {
        canvas.fill_rect(Rect::new(x1, y, x2 + 1, y + 1), c);
      }
    }
  }
}

/// Strokes a closed polygon with anti-aliased edges.
pub fn draw_polygon(canvas: &mut Canvas, pts: &[PointF], c: Color, width: i32) {
  let n = pts.len();
  for i in 0..n {
    let j = (i + 1) % n;
    draw_line_aa(
      canvas,
      pts[i].x as i32,
      pts[i].y as i32,
      pts[j].x as i32,
      pts[j].y as i32,
      c,
      width,
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn opaque_count(c: &Canvas) -> usize {
    c.data().chunks_exact(4).filter(|p| p[3] == 255).count()
  }

  #[test]
  fn right_triangle_covers_half_the_square() {
    // Axis-aligned right triangle with legs n fills n*(n+1)/2 pixels,
    // within one row of slack from the half-open scanline rule.
    let n = 20.0;
    let mut c = Canvas::new(32, 32).unwrap();
    fill_polygon(
      &mut c,
      &[
        PointF::new(0.0, 0.0),
        PointF::new(0.0, n),
        PointF::new(n, n),
      ],
      Color::BLACK,
    );
    let expected = (n as usize * (n as usize + 1)) / 2;
    let got = opaque_count(&c);
    assert!(
      got.abs_diff(expected) <= n as usize,
      "got {got}, expected about {expected}"
    );
  }

  #[test]
  fn rectangle_polygon_fills_exactly() {
    let mut c = Canvas::new(16, 16).unwrap();
    fill_polygon(
      &mut c,
      &[
        PointF::new(2.0, 2.0),
        PointF::new(10.0, 2.0),
        PointF::new(10.0, 10.0),
        PointF::new(2.0, 10.0),
      ],
      Color::RED,
    );
    assert_eq!(c.pixel(5, 5), Some(Color::RED));
    assert_eq!(c.pixel(1, 5).unwrap().a, 0);
    assert_eq!(c.pixel(11, 5).unwrap().a, 0);
  }

  #[test]
  fn degenerate_polygons_draw_nothing() {
    let mut c = Canvas::new(8, 8).unwrap();
    let before = c.data().to_vec();
    fill_polygon(&mut c, &[PointF::new(1.0, 1.0), PointF::new(5.0, 5.0)], Color::RED);
    // Zero-height polygon: all edges horizontal, no intersections.
    fill_polygon(
      &mut c,
      &[
        PointF::new(1.0, 3.0),
        PointF::new(5.0, 3.0),
        PointF::new(3.0, 3.0),
      ],
      Color::RED,
    );
    assert_eq!(c.data(), before.as_slice());
  }

  #[test]
  fn translucent_fill_blends_instead_of_overwriting() {
    let mut c = Canvas::new(8, 8).unwrap();
    c.fill_rect(Rect::from_xywh(0, 0, 8, 8), Color::WHITE);
    fill_polygon(
      &mut c,
      &[
        PointF::new(0.0, 0.0),
        PointF::new(8.0, 0.0),
        PointF::new(8.0, 8.0),
        PointF::new(0.0, 8.0),
      ],
      Color::rgba(0, 0, 0, 128),
    );
    let p = c.pixel(4, 4).unwrap();
    assert_eq!(p.r, 127);
  }
}
