//! Font face abstraction.
//!
//! The rasterizer only needs three capabilities from a face: measure a
//! string, report vertical metrics, and draw a string at a baseline. They
//! are modelled as a small trait so the engine stays independent of the
//! font backend. Two implementations exist: a `fontdue`-backed face for
//! real TrueType/OpenType fonts, and an 8x8 bitmap face that can never fail
//! and closes the fallback chain.

use std::sync::Arc;

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::canvas::Canvas;
use crate::model::color::Color;

/// Vertical metrics of a sized face, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceMetrics {
  pub ascent: i32,
  pub descent: i32,
  pub line_height: i32,
}

/// The capability set the rasterizer requires of a font face.
pub trait FontFace: Send + Sync {
  /// Advance width of `text` in pixels, rounded up.
  fn measure(&self, text: &str) -> i32;

  fn metrics(&self) -> FaceMetrics;

  /// Draws `text` with its baseline at `(x, baseline_y)`.
  fn draw(&self, canvas: &mut Canvas, x: i32, baseline_y: i32, text: &str, color: Color);
}

pub type FaceHandle = Arc<dyn FontFace>;

/// A parsed TrueType/OpenType face at a fixed pixel size.
pub struct FontdueFace {
  font: Arc<fontdue::Font>,
  size_px: f32,
}

impl FontdueFace {
  pub fn new(font: Arc<fontdue::Font>, size_px: f32) -> Self {
    Self {
      font,
      size_px: size_px.max(1.0),
    }
  }
}

impl FontFace for FontdueFace {
  fn measure(&self, text: &str) -> i32 {
    let mut width = 0.0f32;
    let mut prev: Option<char> = None;
    for ch in text.chars() {
      if let Some(p) = prev {
        width += self.font.horizontal_kern(p, ch, self.size_px).unwrap_or(0.0);
      }
      width += self.font.metrics(ch, self.size_px).advance_width;
      prev = Some(ch);
    }
    width.ceil() as i32
  }

  fn metrics(&self) -> FaceMetrics {
    match self.font.horizontal_line_metrics(self.size_px) {
      Some(m) => {
        let ascent = m.ascent.ceil() as i32;
        // fontdue reports descent as a negative offset below the baseline.
        let descent = (-m.descent).ceil().max(0.0) as i32;
        FaceMetrics {
          ascent,
          descent,
          line_height: ascent + descent,
        }
      }
      None => FaceMetrics {
        ascent: self.size_px.ceil() as i32,
        descent: (self.size_px * 0.25).ceil() as i32,
        line_height: (self.size_px * 1.25).ceil() as i32,
      },
    }
  }

  fn draw(&self, canvas: &mut Canvas, x: i32, baseline_y: i32, text: &str, color: Color) {
    let mut pen_x = x as f32;
    let mut prev: Option<char> = None;
    for ch in text.chars() {
      if let Some(p) = prev {
        pen_x += self.font.horizontal_kern(p, ch, self.size_px).unwrap_or(0.0);
      }
      let (metrics, coverage) = self.font.rasterize(ch, self.size_px);
      let glyph_x = pen_x as i32 + metrics.xmin;
      let glyph_top = baseline_y - (metrics.ymin + metrics.height as i32);
      for row in 0..metrics.height {
        for col in 0..metrics.width {
          let cov = coverage[row * metrics.width + col];
          if cov > 0 {
            canvas.blend_pixel_coverage(
              glyph_x + col as i32,
              glyph_top + row as i32,
              color,
              cov as f64 / 255.0,
            );
          }
        }
      }
      pen_x += metrics.advance_width;
      prev = Some(ch);
    }
  }
}

/// Fixed-cell 8x8 bitmap face. Glyph coverage comes from the `font8x8`
/// tables; characters outside the table advance blank.
pub struct BitmapFace;

impl BitmapFace {
  const ADVANCE: i32 = 8;
  const ASCENT: i32 = 11;
  const DESCENT: i32 = 2;
}

impl FontFace for BitmapFace {
  fn measure(&self, text: &str) -> i32 {
    text.chars().count() as i32 * Self::ADVANCE
  }

  fn metrics(&self) -> FaceMetrics {
    FaceMetrics {
      ascent: Self::ASCENT,
      descent: Self::DESCENT,
      line_height: Self::ASCENT + Self::DESCENT,
    }
  }

  fn draw(&self, canvas: &mut Canvas, x: i32, baseline_y: i32, text: &str, color: Color) {
    let mut pen_x = x;
    for ch in text.chars() {
      if let Some(glyph) = BASIC_FONTS.get(ch) {
        let top = baseline_y - Self::ADVANCE;
        for (row, bits) in glyph.iter().enumerate() {
          for col in 0..8 {
            if bits & (1 << col) != 0 {
              canvas.blend_pixel(pen_x + col, top + row as i32, color);
            }
          }
        }
      }
      pen_x += Self::ADVANCE;
    }
  }
}
