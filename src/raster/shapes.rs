//! Parametric shapes: rounded rectangles, regular polygons, stars, arrows,
//! the heart curve, and the plus sign.
//!
//! Every shape is expressed over its bounding box `(x, y, w, h)` so the
//! dispatcher can place it straight from the shape envelope.

use std::f64::consts::PI;

use crate::canvas::Canvas;
use crate::geometry::{PointF, Rect};
use crate::model::color::Color;

use super::ellipse::draw_arc;
use super::line::draw_line_thick;
use super::polygon::{draw_polygon, fill_polygon};

/// Fills a rounded rectangle: a centre slab, two side strips, and four
/// quarter-circle corners tested per pixel.
pub fn fill_rounded_rect(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, radius: i32, c: Color) {
  if radius <= 0 {
    canvas.fill_rect_blend(Rect::from_xywh(x, y, w, h), c);
    return;
  }
  let radius = radius.min(w / 2).min(h / 2);
  let r2 = (radius * radius) as f64;

  canvas.fill_rect_blend(Rect::new(x + radius, y, x + w - radius, y + h), c);
  canvas.fill_rect_blend(Rect::new(x, y + radius, x + radius, y + h - radius), c);
  canvas.fill_rect_blend(Rect::new(x + w - radius, y + radius, x + w, y + h - radius), c);

  let corners = [
    (x + radius, y + radius, Rect::new(x, y, x + radius, y + radius)),
    (
      x + w - radius,
      y + radius,
      Rect::new(x + w - radius, y, x + w, y + radius),
    ),
    (
      x + radius,
      y + h - radius,
      Rect::new(x, y + h - radius, x + radius, y + h),
    ),
    (
      x + w - radius,
      y + h - radius,
      Rect::new(x + w - radius, y + h - radius, x + w, y + h),
    ),
  ];
  for (ccx, ccy, corner) in corners {
    for py in corner.min_y..corner.max_y {
      let dy = (py - ccy) as f64;
      for px in corner.min_x..corner.max_x {
        let dx = (px - ccx) as f64;
        if dx * dx + dy * dy <= r2 {
          canvas.blend_pixel(px, py, c);
        }
      }
    }
  }
}

/// Strokes a rounded rectangle: four straight edges plus four corner arcs.
pub fn draw_rounded_rect(
  canvas: &mut Canvas,
  x: i32,
  y: i32,
  w: i32,
  h: i32,
  radius: i32,
  c: Color,
  line_width: i32,
) {
  draw_line_thick(canvas, x + radius, y, x + w - radius, y, c, line_width);
  draw_line_thick(canvas, x + radius, y + h - 1, x + w - radius, y + h - 1, c, line_width);
  draw_line_thick(canvas, x, y + radius, x, y + h - radius, c, line_width);
  draw_line_thick(canvas, x + w - 1, y + radius, x + w - 1, y + h - radius, c, line_width);
  let d = radius * 2;
  draw_arc(canvas, x, y, d, d, c, PI, 1.5 * PI, line_width);
  draw_arc(canvas, x + w - d, y, d, d, c, 1.5 * PI, 2.0 * PI, line_width);
  draw_arc(canvas, x, y + h - d, d, d, c, 0.5 * PI, PI, line_width);
  draw_arc(canvas, x + w - d, y + h - d, d, d, c, 0.0, 0.5 * PI, line_width);
}

fn triangle_points(x: i32, y: i32, w: i32, h: i32) -> [PointF; 3] {
  [
    PointF::new(x as f64 + w as f64 / 2.0, y as f64),
    PointF::new((x + w) as f64, (y + h) as f64),
    PointF::new(x as f64, (y + h) as f64),
  ]
}

pub fn fill_triangle(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  fill_polygon(canvas, &triangle_points(x, y, w, h), c);
}

pub fn draw_triangle(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color, width: i32) {
  draw_polygon(canvas, &triangle_points(x, y, w, h), c, width);
}

fn diamond_points(x: i32, y: i32, w: i32, h: i32) -> [PointF; 4] {
  let cx = x as f64 + w as f64 / 2.0;
  let cy = y as f64 + h as f64 / 2.0;
  [
    PointF::new(cx, y as f64),
    PointF::new((x + w) as f64, cy),
    PointF::new(cx, (y + h) as f64),
    PointF::new(x as f64, cy),
  ]
}

pub fn fill_diamond(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  fill_polygon(canvas, &diamond_points(x, y, w, h), c);
}

pub fn draw_diamond(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color, width: i32) {
  draw_polygon(canvas, &diamond_points(x, y, w, h), c, width);
}

/// Regular n-gon inscribed in the box, first vertex at `start_angle`.
pub fn fill_regular_polygon(
  canvas: &mut Canvas,
  x: i32,
  y: i32,
  w: i32,
  h: i32,
  sides: usize,
  start_angle: f64,
  c: Color,
) {
  let cx = x as f64 + w as f64 / 2.0;
  let cy = y as f64 + h as f64 / 2.0;
  let rx = w as f64 / 2.0;
  let ry = h as f64 / 2.0;
  let pts: Vec<PointF> = (0..sides)
    .map(|i| {
      let angle = start_angle + i as f64 * 2.0 * PI / sides as f64;
      PointF::new(cx + rx * angle.cos(), cy + ry * angle.sin())
    })
    .collect();
  fill_polygon(canvas, &pts, c);
}

pub fn fill_pentagon(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  fill_regular_polygon(canvas, x, y, w, h, 5, -PI / 2.0, c);
}

pub fn fill_hexagon(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  fill_regular_polygon(canvas, x, y, w, h, 6, 0.0, c);
}

/// Star with `points` tips, alternating the outer radius with an inner
/// radius at 0.4 of it, first tip straight up.
pub fn fill_star(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, points: usize, c: Color) {
  let cx = x as f64 + w as f64 / 2.0;
  let cy = y as f64 + h as f64 / 2.0;
  let (outer_rx, outer_ry) = (w as f64 / 2.0, h as f64 / 2.0);
  let (inner_rx, inner_ry) = (outer_rx * 0.4, outer_ry * 0.4);
  let n = points * 2;
  let pts: Vec<PointF> = (0..n)
    .map(|i| {
      let angle = -PI / 2.0 + i as f64 * 2.0 * PI / n as f64;
      let (rx, ry) = if i % 2 == 1 {
        (inner_rx, inner_ry)
      } else {
        (outer_rx, outer_ry)
      };
      PointF::new(cx + rx * angle.cos(), cy + ry * angle.sin())
    })
    .collect();
  fill_polygon(canvas, &pts, c);
}

// Arrows: the shaft spans 40% of the cross axis, the head 35% of the main
// axis.

pub fn fill_arrow_right(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  let (xf, yf, wf, hf) = (x as f64, y as f64, w as f64, h as f64);
  let shaft_h = hf * 0.4;
  let head_w = wf * 0.35;
  let shaft_w = wf - head_w;
  let top = yf + (hf - shaft_h) / 2.0;
  let bot = top + shaft_h;
  fill_polygon(
    canvas,
    &[
      PointF::new(xf, top),
      PointF::new(xf + shaft_w, top),
      PointF::new(xf + shaft_w, yf),
      PointF::new(xf + wf, yf + hf / 2.0),
      PointF::new(xf + shaft_w, yf + hf),
      PointF::new(xf + shaft_w, bot),
      PointF::new(xf, bot),
    ],
    c,
  );
}

pub fn fill_arrow_left(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  let (xf, yf, wf, hf) = (x as f64, y as f64, w as f64, h as f64);
  let shaft_h = hf * 0.4;
  let head_w = wf * 0.35;
  let top = yf + (hf - shaft_h) / 2.0;
  let bot = top + shaft_h;
  fill_polygon(
    canvas,
    &[
      PointF::new(xf + wf, top),
      PointF::new(xf + head_w, top),
      PointF::new(xf + head_w, yf),
      PointF::new(xf, yf + hf / 2.0),
      PointF::new(xf + head_w, yf + hf),
      PointF::new(xf + head_w, bot),
      PointF::new(xf + wf, bot),
    ],
    c,
  );
}

pub fn fill_arrow_up(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  let (xf, yf, wf, hf) = (x as f64, y as f64, w as f64, h as f64);
  let shaft_w = wf * 0.4;
  let head_h = hf * 0.35;
  let left = xf + (wf - shaft_w) / 2.0;
  let right = left + shaft_w;
  fill_polygon(
    canvas,
    &[
      PointF::new(xf + wf / 2.0, yf),
      PointF::new(xf + wf, yf + head_h),
      PointF::new(right, yf + head_h),
      PointF::new(right, yf + hf),
      PointF::new(left, yf + hf),
      PointF::new(left, yf + head_h),
      PointF::new(xf, yf + head_h),
    ],
    c,
  );
}

pub fn fill_arrow_down(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  let (xf, yf, wf, hf) = (x as f64, y as f64, w as f64, h as f64);
  let shaft_w = wf * 0.4;
  let head_h = hf * 0.35;
  let shaft_bottom = hf - head_h;
  let left = xf + (wf - shaft_w) / 2.0;
  let right = left + shaft_w;
  fill_polygon(
    canvas,
    &[
      PointF::new(left, yf),
      PointF::new(right, yf),
      PointF::new(right, yf + shaft_bottom),
      PointF::new(xf + wf, yf + shaft_bottom),
      PointF::new(xf + wf / 2.0, yf + hf),
      PointF::new(xf, yf + shaft_bottom),
      PointF::new(left, yf + shaft_bottom),
    ],
    c,
  );
}

/// Fills a heart via the implicit cubic `(nx^2 + ny^2 - 1)^3 - nx^2 ny^3 <= 0`
/// in normalised coordinates, flipped so the cusp points down. The 0.3 top
/// offset and 0.7 vertical scale position the lobes inside the box.
pub fn fill_heart(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  let cx = x as f64 + w as f64 / 2.0;
  let top_y = y as f64 + h as f64 * 0.3;
  let half_w = w as f64 / 2.0;
  let v_scale = h as f64 * 0.7;

  for py in y..y + h {
    let ny = 1.0 - (py as f64 - top_y) / v_scale;
    let ny2 = ny * ny;
    let ny3 = ny2 * ny;
    for px in x..x + w {
      let nx = (px as f64 - cx) / half_w;
      let nx2 = nx * nx;
      let base = nx2 + ny2 - 1.0;
      if base * base * base - nx2 * ny3 <= 0.0 {
        canvas.blend_pixel(px, py, c);
      }
    }
  }
}

/// Plus sign: two orthogonal rectangles, each a third of the box thick.
pub fn fill_plus(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  let arm_w = w / 3;
  let arm_h = h / 3;
  canvas.fill_rect_blend(Rect::new(x, y + arm_h, x + w, y + h - arm_h), c);
  canvas.fill_rect_blend(Rect::new(x + arm_w, y, x + w - arm_w, y + h), c);
}
