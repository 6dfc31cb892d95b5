//! Anti-aliased ellipses and parametric arcs.

use crate::canvas::Canvas;
use crate::model::color::Color;

use super::line::draw_line_thick;

/// Coverage ramp width at the ellipse edge, in implicit-distance units.
const AA_THRESHOLD: f64 = 0.05;

/// Fills the ellipse inscribed in the box `(x, y, w, h)`.
///
/// Rows outside the vertical extent are rejected with one comparison; inside
/// a row, the horizontal extent is `rx * sqrt(1 - dy_norm^2)` and the edge
/// band (implicit value within [`AA_THRESHOLD`] of 1) is blended with
/// proportional coverage.
pub fn fill_ellipse_aa(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color) {
  if w <= 0 || h <= 0 {
    return;
  }
  let rx = w as f64 / 2.0;
  let ry = h as f64 / 2.0;
  let center_x = x as f64 + rx;
  let center_y = y as f64 + ry;
  let inv_rx2 = 1.0 / (rx * rx);
  let inv_ry2 = 1.0 / (ry * ry);

  for py in y..y + h {
    let dy = py as f64 + 0.5 - center_y;
    let dy2 = dy * dy * inv_ry2;
    if dy2 > 1.0 {
      continue;
    }
    let extent = rx * (1.0 - dy2).sqrt();
    let min_px = ((center_x - extent) as i32).max(x);
    let max_px = ((center_x + extent + 1.0) as i32).min(x + w);
    for px in min_px..max_px {
      let dx = px as f64 + 0.5 - center_x;
      let d = dx * dx * inv_rx2 + dy2;
      if d <= 1.0 {
        let edge = 1.0 - d;
        if edge < AA_THRESHOLD {
          canvas.blend_pixel_coverage(px, py, c, edge / AA_THRESHOLD);
        } else {
          canvas.blend_pixel(px, py, c);
        }
      }
    }
  }
}

/// Strokes the ellipse outline at the given line width.
///
/// Rasterizes the implicit distance `|d - 1| * min(rx, ry)` against the
/// stroke half-width, with a one-pixel linear falloff outside it.
pub fn draw_ellipse_aa(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, c: Color, line_width: i32) {
  if w <= 0 || h <= 0 {
    return;
  }
  let rx = w as f64 / 2.0;
  let ry = h as f64 / 2.0;
  let center_x = x as f64 + rx;
  let center_y = y as f64 + ry;
  let min_r = rx.min(ry).max(1.0);
  let half_lw = line_width as f64 / 2.0;
  let threshold = half_lw + 1.0;

  for py in (y - line_width - 1)..(y + h + line_width + 1) {
    let dy_norm = (py as f64 + 0.5 - center_y) / ry;
    let dy2 = dy_norm * dy_norm;
    // quick reject for rows far outside
    if dy2 > 1.5 {
      continue;
    }
    for px in (x - line_width - 1)..(x + w + line_width + 1) {
      let dx_norm = (px as f64 + 0.5 - center_x) / rx;
      let d = (dx_norm * dx_norm + dy2).sqrt();
      let dist_px = (d - 1.0).abs() * min_r;
      if dist_px < threshold {
        let coverage = if dist_px > half_lw {
          1.0 - (dist_px - half_lw)
        } else {
          1.0
        };
        if coverage > 0.0 {
          canvas.blend_pixel_coverage(px, py, c, coverage);
        }
      }
    }
  }
}

/// Draws an elliptical arc from `start_angle` to `end_angle` (radians,
/// y-down) by sampling the parametric form and joining consecutive samples
/// with thick lines. Step count scales with the arc length so large arcs
/// stay smooth.
pub fn draw_arc(
  canvas: &mut Canvas,
  x: i32,
  y: i32,
  w: i32,
  h: i32,
  c: Color,
  start_angle: f64,
  end_angle: f64,
  line_width: i32,
) {
  let rx = w as f64 / 2.0;
  let ry = h as f64 / 2.0;
  let center_x = x as f64 + rx;
  let center_y = y as f64 + ry;
  let circumference = std::f64::consts::PI * (rx + ry) * (end_angle - start_angle)
    / (2.0 * std::f64::consts::PI);
  let steps = ((circumference * 2.0) as i32).max(30);
  let angle_step = (end_angle - start_angle) / steps as f64;

  let mut prev: Option<(i32, i32)> = None;
  for i in 0..=steps {
    let angle = start_angle + angle_step * i as f64;
    let px = (center_x + rx * angle.cos()) as i32;
    let py = (center_y + ry * angle.sin()) as i32;
    if let Some((ppx, ppy)) = prev {
      if (px, py) != (ppx, ppy) {
        draw_line_thick(canvas, ppx, ppy, px, py, c, line_width);
      }
    }
    prev = Some((px, py));
  }
}
