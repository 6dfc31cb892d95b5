//! Image scaling and offscreen compositing (flips and rotation).
//!
//! Transformed subtrees render into a transparent offscreen the size of the
//! unrotated shape; the affine transform is applied only when compositing
//! the offscreen back onto the destination. Rotation samples
//! nearest-neighbour through the inverse transform, matching the renderer's
//! deliberately simple resampling model.

use image::RgbaImage;

use crate::canvas::Canvas;
use crate::geometry::Rect;
use crate::model::color::Color;

/// Scales a decoded RGBA image to `(w, h)` with bilinear interpolation.
///
/// Neighbour indices clamp at the source edges, so identity-size scaling
/// degenerates to a pass-through copy.
pub fn scale_bilinear(src: &RgbaImage, w: u32, h: u32) -> Option<Canvas> {
  let mut dst = Canvas::new(w.max(1), h.max(1)).ok()?;
  let src_w = src.width() as usize;
  let src_h = src.height() as usize;
  if src_w == 0 || src_h == 0 {
    return Some(dst);
  }
  let sp = src.as_raw();
  let src_stride = src_w * 4;
  let x_ratio = src_w as f64 / w.max(1) as f64;
  let y_ratio = src_h as f64 / h.max(1) as f64;

  for dy in 0..h as i32 {
    let sy = dy as f64 * y_ratio;
    let sy0 = sy as usize;
    let sy1 = (sy0 + 1).min(src_h - 1);
    let fy = sy - sy0 as f64;
    let ify = 1.0 - fy;
    let row0 = sy0 * src_stride;
    let row1 = sy1 * src_stride;

    for dx in 0..w as i32 {
      let sx = dx as f64 * x_ratio;
      let sx0 = sx as usize;
      let sx1 = (sx0 + 1).min(src_w - 1);
      let fx = sx - sx0 as f64;
      let ifx = 1.0 - fx;

      let o00 = row0 + sx0 * 4;
      let o10 = row0 + sx1 * 4;
      let o01 = row1 + sx0 * 4;
      let o11 = row1 + sx1 * 4;

      let mut out = [0u8; 4];
      for ch in 0..4 {
        let top = sp[o00 + ch] as f64 * ifx + sp[o10 + ch] as f64 * fx;
        let bot = sp[o01 + ch] as f64 * ifx + sp[o11 + ch] as f64 * fx;
        out[ch] = (top * ify + bot * fy) as u8;
      }
      dst.store_pixel(dx, dy, Color::rgba(out[0], out[1], out[2], out[3]));
    }
  }
  Some(dst)
}

/// Produces a flipped copy via row/column-reversed 4-byte pixel copies.
pub fn flip_canvas(src: &Canvas, flip_h: bool, flip_v: bool) -> Canvas {
  let w = src.width() as i32;
  let h = src.height() as i32;
  let mut dst = src.clone();
  if !flip_h && !flip_v {
    return dst;
  }
  for py in 0..h {
    let sy = if flip_v { h - 1 - py } else { py };
    for px in 0..w {
      let sx = if flip_h { w - 1 - px } else { px };
      if let Some(c) = src.pixel(sx, sy) {
        dst.store_pixel(px, py, c);
      }
    }
  }
  dst
}

/// Axis-aligned bounding box of a `w x h` rectangle rotated by
/// `angle_deg` about `(cx, cy)`.
pub fn rotated_bounds(cx: f64, cy: f64, w: i32, h: i32, angle_deg: i32) -> Rect {
  let rad = (angle_deg as f64).to_radians();
  let cos = rad.cos().abs();
  let sin = rad.sin().abs();
  let new_w = w as f64 * cos + h as f64 * sin;
  let new_h = w as f64 * sin + h as f64 * cos;
  Rect::new(
    (cx - new_w / 2.0) as i32,
    (cy - new_h / 2.0) as i32,
    (cx + new_w / 2.0) as i32 + 1,
    (cy + new_h / 2.0) as i32 + 1,
  )
}

/// Composites `src` onto `dst` with its centre rotated onto the centre of
/// the `w x h` box at `(x, y)`.
///
/// Walks every destination pixel of the rotated bounding box, applies the
/// inverse rotation to find the source coordinate, and blends when the
/// truncated source pixel is inside the offscreen and non-transparent.
pub fn composite_rotated(dst: &mut Canvas, src: &Canvas, x: i32, y: i32, rotation_deg: i32) {
  let w = src.width() as i32;
  let h = src.height() as i32;
  let rad = (rotation_deg as f64).to_radians();
  let cos_a = rad.cos();
  let sin_a = rad.sin();
  let cx = w as f64 / 2.0;
  let cy = h as f64 / 2.0;
  let dest_cx = x as f64 + cx;
  let dest_cy = y as f64 + cy;

  let bounds = rotated_bounds(dest_cx, dest_cy, w, h, rotation_deg).intersect(&dst.bounds());
  for dy in bounds.min_y..bounds.max_y {
    let ry = dy as f64 - dest_cy;
    for dx in bounds.min_x..bounds.max_x {
      let rx = dx as f64 - dest_cx;
      let sx = rx * cos_a + ry * sin_a + cx;
      let sy = -rx * sin_a + ry * cos_a + cy;
      // Truncation toward zero: a source coordinate in (-1, 0) samples
      // column/row 0 instead of being rejected.
      let (ix, iy) = (sx as i32, sy as i32);
      if ix >= 0 && ix < w && iy >= 0 && iy < h {
        if let Some(c) = src.pixel(ix, iy) {
          if c.a > 0 {
            dst.blend_pixel(dx, dy, c);
          }
        }
      }
    }
  }
}

/// Renders a transformed subtree: the callback draws into a fresh
/// transparent `w x h` offscreen with its origin rebased to (0, 0); flips
/// and rotation are applied while compositing back at `(x, y)`.
pub fn render_rotated(
  dst: &mut Canvas,
  x: i32,
  y: i32,
  w: i32,
  h: i32,
  rotation_deg: i32,
  flip_h: bool,
  flip_v: bool,
  draw: impl FnOnce(&mut Canvas),
) {
  if w <= 0 || h <= 0 {
    return;
  }
  let Ok(mut offscreen) = Canvas::new(w as u32, h as u32) else {
    return;
  };
  draw(&mut offscreen);

  let offscreen = if flip_h || flip_v {
    flip_canvas(&offscreen, flip_h, flip_v)
  } else {
    offscreen
  };

  if rotation_deg == 0 {
    dst.blend_canvas_at(x, y, &offscreen);
  } else {
    composite_rotated(dst, &offscreen, x, y, rotation_deg);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
      if (x + y) % 2 == 0 {
        image::Rgba([255, 0, 0, 255])
      } else {
        image::Rgba([0, 0, 255, 255])
      }
    })
  }

  #[test]
  fn identity_scale_is_a_pass_through() {
    let src = checker(9, 7);
    let dst = scale_bilinear(&src, 9, 7).unwrap();
    for y in 0..7 {
      for x in 0..9 {
        let s = src.get_pixel(x, y).0;
        let d = dst.pixel(x as i32, y as i32).unwrap();
        assert_eq!((d.r, d.g, d.b, d.a), (s[0], s[1], s[2], s[3]), "at {x},{y}");
      }
    }
  }

  #[test]
  fn downscale_produces_requested_size() {
    let src = checker(64, 64);
    let dst = scale_bilinear(&src, 16, 8).unwrap();
    assert_eq!((dst.width(), dst.height()), (16, 8));
  }

  #[test]
  fn flip_h_mirrors_columns() {
    let mut c = Canvas::new(4, 1).unwrap();
    c.store_pixel(0, 0, Color::RED);
    c.store_pixel(3, 0, Color::BLUE);
    let f = flip_canvas(&c, true, false);
    assert_eq!(f.pixel(3, 0), Some(Color::RED));
    assert_eq!(f.pixel(0, 0), Some(Color::BLUE));
  }

  #[test]
  fn flip_v_mirrors_rows() {
    let mut c = Canvas::new(1, 4).unwrap();
    c.store_pixel(0, 0, Color::RED);
    let f = flip_canvas(&c, false, true);
    assert_eq!(f.pixel(0, 3), Some(Color::RED));
    assert_eq!(f.pixel(0, 0).unwrap().a, 0);
  }

  #[test]
  fn rotation_zero_matches_direct_draw() {
    let mut direct = Canvas::new(20, 20).unwrap();
    direct.fill_rect(Rect::from_xywh(4, 6, 8, 5), Color::RED);

    let mut via_offscreen = Canvas::new(20, 20).unwrap();
    render_rotated(&mut via_offscreen, 4, 6, 8, 5, 0, false, false, |off| {
      off.fill_rect(Rect::from_xywh(0, 0, 8, 5), Color::RED);
    });
    assert_eq!(direct.data(), via_offscreen.data());
  }

  #[test]
  fn quarter_turn_transposes_extents() {
    // A wide bar rotated 90 degrees becomes a tall bar about the same centre.
    let mut c = Canvas::new(40, 40).unwrap();
    render_rotated(&mut c, 10, 18, 20, 4, 90, false, false, |off| {
      off.fill_rect(Rect::from_xywh(0, 0, 20, 4), Color::RED);
    });
    // Centre of the shape stays covered.
    assert_eq!(c.pixel(20, 20), Some(Color::RED));
    // The bar now extends vertically.
    assert_eq!(c.pixel(20, 12), Some(Color::RED));
    assert_eq!(c.pixel(20, 28), Some(Color::RED));
    // And no longer extends horizontally.
    assert_eq!(c.pixel(12, 20).unwrap().a, 0);
    assert_eq!(c.pixel(28, 20).unwrap().a, 0);
  }

  #[test]
  fn rotated_bounds_cover_the_diagonal() {
    let b = rotated_bounds(50.0, 50.0, 20, 10, 45);
    assert!(b.width() >= 21 && b.height() >= 21);
    assert!(b.contains(50, 50));
  }
}
