//! Paragraph layout and glyph emission.
//!
//! Paragraphs are wrapped independently into lines, the lines are stacked
//! with per-paragraph spacing, the block is anchored vertically inside the
//! content box, and each line is aligned horizontally before its runs are
//! drawn. Lines are never clipped at layout time; overflow is a rendering
//! concern.

use crate::canvas::Canvas;
use crate::geometry::Rect;
use crate::model::bullet::{Bullet, NumberFormat};
use crate::model::color::Color;
use crate::model::paragraph::{Paragraph, ParagraphElement};
use crate::model::style::{Font, HorizontalAlign, Underline, VerticalAlign};
use crate::raster::line::{draw_dashed_hline, draw_line};

use super::cache::FontCache;
use super::face::FaceHandle;

/// Height assigned to lines that carry no face metrics (empty paragraphs).
const DEFAULT_LINE_HEIGHT: i32 = 14;

/// A measured run ready for drawing.
#[derive(Clone)]
pub struct LayoutRun {
  pub text: String,
  pub font: Font,
  pub face: FaceHandle,
  pub width: i32,
}

/// Wrapper input: measured runs interleaved with hard breaks.
pub enum LayoutItem {
  Run(LayoutRun),
  Break,
}

/// One horizontal row of runs after wrapping.
#[derive(Clone, Default)]
pub struct TextLine {
  pub runs: Vec<LayoutRun>,
  pub width: i32,
  pub ascent: i32,
  pub descent: i32,
  pub line_height: i32,
}

/// Builds a line from its runs, taking the max ascent/descent across faces.
pub fn build_line(runs: Vec<LayoutRun>) -> TextLine {
  let mut line = TextLine {
    runs,
    ..TextLine::default()
  };
  for run in &line.runs {
    line.width += run.width;
    let m = run.face.metrics();
    line.ascent = line.ascent.max(m.ascent);
    line.descent = line.descent.max(m.descent);
  }
  line.line_height = line.ascent + line.descent;
  if line.line_height < 1 {
    line.line_height = DEFAULT_LINE_HEIGHT;
  }
  line
}

/// Wraps runs into lines no wider than `max_width` where possible.
///
/// Hard breaks flush unconditionally. A run that fits the remaining width
/// is appended whole; one that does not is split at whitespace, re-measuring
/// each accumulated prefix. A single word wider than the line is emitted as
/// its own overflowing line; no hyphenation.
pub fn wrap_runs(items: Vec<LayoutItem>, max_width: i32) -> Vec<TextLine> {
  if items.is_empty() {
    return Vec::new();
  }
  let max_width = max_width.max(1);

  let mut lines = Vec::new();
  let mut current: Vec<LayoutRun> = Vec::new();
  let mut current_width = 0;

  for item in items {
    let run = match item {
      LayoutItem::Break => {
        lines.push(build_line(std::mem::take(&mut current)));
        current_width = 0;
        continue;
      }
      LayoutItem::Run(run) => run,
    };

    if current_width + run.width <= max_width {
      current_width += run.width;
      current.push(run);
      continue;
    }

    let words: Vec<&str> = run.text.split_whitespace().collect();
    if words.len() <= 1 {
      // An indivisible run: give it a line of its own and let it overflow.
      if !current.is_empty() {
        lines.push(build_line(std::mem::take(&mut current)));
      }
      current_width = run.width;
      current.push(run);
      continue;
    }

    let mut partial = String::new();
    for word in words {
      let test = if partial.is_empty() {
        word.to_string()
      } else {
        format!("{partial} {word}")
      };
      let test_width = run.face.measure(&test);
      if current_width + test_width > max_width && (!current.is_empty() || !partial.is_empty()) {
        if !partial.is_empty() {
          let width = run.face.measure(&partial);
          current.push(LayoutRun {
            text: std::mem::take(&mut partial),
            font: run.font.clone(),
            face: run.face.clone(),
            width,
          });
        }
        lines.push(build_line(std::mem::take(&mut current)));
        current_width = 0;
        partial = word.to_string();
      } else {
        partial = test;
      }
    }
    if !partial.is_empty() {
      let width = run.face.measure(&partial);
      current_width += width;
      current.push(LayoutRun {
        text: partial,
        font: run.font.clone(),
        face: run.face.clone(),
        width,
      });
    }
  }

  if !current.is_empty() {
    lines.push(build_line(current));
  }
  lines
}

/// Formats a bullet number in the given scheme. Roman numerals cover
/// 1..=3999; alphabetic covers 1..=26; out-of-range values degrade to
/// decimal with the scheme's suffix.
pub fn format_bullet_number(num: u32, format: NumberFormat) -> String {
  let alpha = |upper: bool| -> Option<char> {
    (1..=26).contains(&num).then(|| {
      let base = if upper { b'A' } else { b'a' };
      (base + (num as u8 - 1)) as char
    })
  };
  match format {
    NumberFormat::ArabicPeriod => format!("{num}."),
    NumberFormat::ArabicParen => format!("{num})"),
    NumberFormat::RomanUpperPeriod => format!("{}.", to_roman(num)),
    NumberFormat::RomanLowerPeriod => format!("{}.", to_roman(num).to_lowercase()),
    NumberFormat::AlphaUpperPeriod => match alpha(true) {
      Some(c) => format!("{c}."),
      None => format!("{num}."),
    },
    NumberFormat::AlphaLowerPeriod => match alpha(false) {
      Some(c) => format!("{c}."),
      None => format!("{num}."),
    },
    NumberFormat::AlphaLowerParen => match alpha(false) {
      Some(c) => format!("{c})"),
      None => format!("{num})"),
    },
  }
}

/// Converts to a Roman numeral with the standard greedy table; values
/// outside 1..=3999 fall back to decimal digits.
pub fn to_roman(num: u32) -> String {
  if num == 0 || num > 3999 {
    return num.to_string();
  }
  const TABLE: &[(u32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
  ];
  let mut n = num;
  let mut out = String::new();
  for &(value, symbol) in TABLE {
    while n >= value {
      out.push_str(symbol);
      n -= value;
    }
  }
  out
}

/// One positioned line with the paragraph attributes needed to place it.
struct LineBox {
  line: TextLine,
  space_before: i32,
  space_after: i32,
  line_spacing: u32,
  align: HorizontalAlign,
  margin_left: i32,
  margin_right: i32,
  indent: i32,
  is_first: bool,
}

impl LineBox {
  fn effective_height(&self) -> i32 {
    if self.line_spacing > 0 {
      (self.line.line_height as f64 * self.line_spacing as f64 / 10000.0) as i32
    } else {
      self.line.line_height
    }
  }
}

/// Draws rich text into canvas rectangles. Borrowed per shape by the
/// dispatcher; holds the EMU-to-pixel scale and the DPI used for face
/// sizing.
pub struct TextPainter<'a> {
  pub canvas: &'a mut Canvas,
  pub cache: &'a FontCache,
  pub scale_x: f64,
  pub scale_y: f64,
  pub dpi: f64,
}

impl TextPainter<'_> {
  fn px_x(&self, emu: i64) -> i32 {
    (emu as f64 * self.scale_x) as i32
  }

  fn px_y(&self, emu: i64) -> i32 {
    (emu as f64 * self.scale_y) as i32
  }

  /// Builds the bullet run preceding a paragraph's first line.
  ///
  /// The bullet inherits the first run's size (default 10 pt) and may
  /// override colour and family.
  fn build_bullet_run(&self, paragraph: &Paragraph) -> Option<LayoutRun> {
    let mut font = Font::default();
    for elem in &paragraph.elements {
      if let ParagraphElement::Run(run) = elem {
        if let Some(f) = &run.font {
          font.size_pt = f.size_pt;
        }
        break;
      }
    }

    let text = match &paragraph.bullet {
      Bullet::None => return None,
      Bullet::Char {
        text,
        font: family,
        color,
        ..
      } => {
        if !family.is_empty() {
          font.name = family.clone();
        }
        if let Some(c) = color {
          font.color = *c;
        }
        format!("{text} ")
      }
      Bullet::Numeric { format, start_at } => {
        let num = (*start_at).max(1);
        format!("{} ", format_bullet_number(num, *format))
      }
    };

    let face = self.cache.face_for(&font, self.dpi);
    let width = face.measure(&text);
    Some(LayoutRun {
      text,
      font,
      face,
      width,
    })
  }

  /// Lays out and draws paragraphs inside `(x, y, w, h)` with the given
  /// vertical anchor.
  pub fn draw_paragraphs(
    &mut self,
    paragraphs: &[Paragraph],
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    anchor: VerticalAlign,
  ) {
    if paragraphs.is_empty() {
      return;
    }

    let mut boxes: Vec<LineBox> = Vec::new();
    for paragraph in paragraphs {
      let (align, margin_left, margin_right, indent) = match &paragraph.alignment {
        Some(a) => (
          a.horizontal,
          self.px_x(a.margin_left_emu),
          self.px_x(a.margin_right_emu),
          self.px_x(a.indent_emu),
        ),
        None => (HorizontalAlign::Left, 0, 0, 0),
      };

      let mut items: Vec<LayoutItem> = Vec::new();
      if let Some(bullet) = self.build_bullet_run(paragraph) {
        items.push(LayoutItem::Run(bullet));
      }
      for elem in &paragraph.elements {
        match elem {
          ParagraphElement::Run(run) => {
            if run.text.is_empty() {
              continue;
            }
            let font = run.font.clone().unwrap_or_default();
            let face = self.cache.face_for(&font, self.dpi);
            let width = face.measure(&run.text);
            items.push(LayoutItem::Run(LayoutRun {
              text: run.text.clone(),
              font,
              face,
              width,
            }));
          }
          ParagraphElement::Break => items.push(LayoutItem::Break),
        }
      }

      let mut avail = w - margin_left - margin_right - indent;
      if avail < 10 {
        avail = w;
      }
      let mut lines = wrap_runs(items, avail);
      if lines.is_empty() {
        lines.push(TextLine {
          line_height: DEFAULT_LINE_HEIGHT,
          ..TextLine::default()
        });
      }

      let count = lines.len();
      for (i, line) in lines.into_iter().enumerate() {
        boxes.push(LineBox {
          line,
          space_before: if i == 0 {
            self.px_y(paragraph.space_before_emu)
          } else {
            0
          },
          space_after: if i == count - 1 {
            self.px_y(paragraph.space_after_emu)
          } else {
            0
          },
          line_spacing: paragraph.line_spacing,
          align,
          margin_left,
          margin_right,
          indent,
          is_first: i == 0,
        });
      }
    }

    let mut total_height = 0;
    for (i, lb) in boxes.iter().enumerate() {
      if i > 0 {
        total_height += lb.space_before;
      }
      total_height += lb.effective_height() + lb.space_after;
    }

    let start_y = match anchor {
      VerticalAlign::Top => y,
      VerticalAlign::Middle => y + (h - total_height) / 2,
      VerticalAlign::Bottom => y + h - total_height,
    };

    let mut cur_y = start_y;
    for (i, lb) in boxes.iter().enumerate() {
      if i > 0 {
        cur_y += lb.space_before;
      }

      let mut line_x = x + lb.margin_left;
      if lb.is_first {
        line_x += lb.indent;
      }
      match lb.align {
        HorizontalAlign::Center => line_x = x + (w - lb.line.width) / 2,
        HorizontalAlign::Right => line_x = x + w - lb.line.width - lb.margin_right,
        // Justify and distribute render as left in this version.
        HorizontalAlign::Left | HorizontalAlign::Justify | HorizontalAlign::Distribute => {}
      }

      let baseline = cur_y + lb.line.ascent;
      let mut draw_x = line_x;
      for run in &lb.line.runs {
        if run.text.is_empty() {
          continue;
        }
        let mut run_baseline = baseline;
        if run.font.superscript {
          run_baseline -= lb.line.ascent / 3;
        } else if run.font.subscript {
          run_baseline += lb.line.descent / 2;
        }

        run.face.draw(self.canvas, draw_x, run_baseline, &run.text, run.font.color);

        if run.font.underline != Underline::None {
          self.draw_underline(
            draw_x,
            draw_x + run.width,
            run_baseline + 2,
            run.font.color,
            run.font.underline,
          );
        }
        if run.font.strikethrough {
          let sy = run_baseline - lb.line.ascent / 3;
          draw_line(self.canvas, draw_x, sy, draw_x + run.width, sy, run.font.color);
        }

        draw_x += run.width;
      }

      cur_y += lb.effective_height() + lb.space_after;
    }
  }

  fn draw_underline(&mut self, x1: i32, x2: i32, y: i32, c: Color, style: Underline) {
    match style {
      Underline::None | Underline::Single => draw_line(self.canvas, x1, y, x2, y, c),
      Underline::Double => {
        draw_line(self.canvas, x1, y - 1, x2, y - 1, c);
        draw_line(self.canvas, x1, y + 1, x2, y + 1, c);
      }
      Underline::Heavy => {
        draw_line(self.canvas, x1, y - 1, x2, y - 1, c);
        draw_line(self.canvas, x1, y, x2, y, c);
        draw_line(self.canvas, x1, y + 1, x2, y + 1, c);
      }
      Underline::Dash => draw_dashed_hline(self.canvas, x1, x2, y, c, 6, 3),
      Underline::Wavy => {
        for px in x1..x2 {
          let wy = y + (((px - x1) as f64 * 0.5).sin() * 2.0) as i32;
          self.canvas.blend_pixel(px, wy, c);
        }
      }
    }
  }

  /// Draws a single string centred in `rect` with the given face.
  pub fn draw_string_centered(&mut self, text: &str, face: &FaceHandle, color: Color, rect: Rect) {
    if text.is_empty() {
      return;
    }
    let width = face.measure(text);
    let m = face.metrics();
    let cx = rect.min_x + (rect.width() - width) / 2;
    let baseline = rect.min_y + (rect.height() - m.line_height) / 2 + m.ascent;
    face.draw(self.canvas, cx, baseline, text, color);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use crate::text::face::BitmapFace;

  fn run(text: &str) -> LayoutRun {
    let face: FaceHandle = Arc::new(BitmapFace);
    let width = face.measure(text);
    LayoutRun {
      text: text.to_string(),
      font: Font::default(),
      face,
      width,
    }
  }

  fn line_texts(lines: &[TextLine]) -> Vec<String> {
    lines
      .iter()
      .map(|l| {
        l.runs
          .iter()
          .map(|r| r.text.as_str())
          .collect::<Vec<_>>()
          .join("|")
      })
      .collect()
  }

  #[test]
  fn fitting_run_stays_on_one_line() {
    let lines = wrap_runs(vec![LayoutItem::Run(run("Hello"))], 100);
    assert_eq!(line_texts(&lines), vec!["Hello"]);
    assert_eq!(lines[0].width, 40);
  }

  #[test]
  fn hard_break_flushes_even_when_empty() {
    let lines = wrap_runs(vec![LayoutItem::Break, LayoutItem::Run(run("x"))], 100);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].runs.is_empty());
    assert_eq!(lines[0].line_height, DEFAULT_LINE_HEIGHT);
  }

  #[test]
  fn long_run_splits_at_word_boundaries() {
    // 8 px per char: "aaa bbb ccc" needs 88 px; at 40 px per line each
    // word lands on its own line.
    let lines = wrap_runs(vec![LayoutItem::Run(run("aaa bbb ccc"))], 40);
    assert_eq!(line_texts(&lines), vec!["aaa", "bbb", "ccc"]);
  }

  #[test]
  fn two_words_per_line_when_they_fit() {
    let lines = wrap_runs(vec![LayoutItem::Run(run("aa bb cc dd"))], 44);
    assert_eq!(line_texts(&lines), vec!["aa bb", "cc dd"]);
  }

  #[test]
  fn oversized_single_word_overflows_alone() {
    let lines = wrap_runs(
      vec![LayoutItem::Run(run("tiny")), LayoutItem::Run(run("enormousword"))],
      40,
    );
    assert_eq!(line_texts(&lines), vec!["tiny", "enormousword"]);
    assert!(lines[1].width > 40);
  }

  #[test]
  fn wrapping_is_idempotent() {
    let items = || {
      vec![
        LayoutItem::Run(run("some words to wrap around")),
        LayoutItem::Break,
        LayoutItem::Run(run("tail")),
      ]
    };
    let a = line_texts(&wrap_runs(items(), 64));
    let b = line_texts(&wrap_runs(items(), 64));
    assert_eq!(a, b);
  }

  #[test]
  fn line_metrics_take_the_max_across_runs() {
    let line = build_line(vec![run("a"), run("b")]);
    assert_eq!(line.ascent, 11);
    assert_eq!(line.descent, 2);
    assert_eq!(line.line_height, 13);
  }

  /// Greedy-table decoder used to verify the encoder below.
  fn parse_roman(s: &str) -> u32 {
    let value = |c: char| match c {
      'I' => 1,
      'V' => 5,
      'X' => 10,
      'L' => 50,
      'C' => 100,
      'D' => 500,
      'M' => 1000,
      _ => 0,
    };
    let chars: Vec<u32> = s.chars().map(value).collect();
    let mut total = 0i64;
    for (i, &v) in chars.iter().enumerate() {
      if chars.get(i + 1).is_some_and(|&next| next > v) {
        total -= v as i64;
      } else {
        total += v as i64;
      }
    }
    total.max(0) as u32
  }

  #[test]
  fn roman_numerals_round_trip() {
    for n in 1..=3999 {
      assert_eq!(parse_roman(&to_roman(n)), n, "n={n}");
    }
  }

  #[test]
  fn roman_out_of_range_degrades_to_decimal() {
    assert_eq!(to_roman(0), "0");
    assert_eq!(to_roman(4000), "4000");
  }

  #[test]
  fn bullet_formats() {
    assert_eq!(format_bullet_number(3, NumberFormat::ArabicPeriod), "3.");
    assert_eq!(format_bullet_number(3, NumberFormat::ArabicParen), "3)");
    assert_eq!(format_bullet_number(4, NumberFormat::RomanUpperPeriod), "IV.");
    assert_eq!(format_bullet_number(4, NumberFormat::RomanLowerPeriod), "iv.");
    assert_eq!(format_bullet_number(2, NumberFormat::AlphaUpperPeriod), "B.");
    assert_eq!(format_bullet_number(2, NumberFormat::AlphaLowerParen), "b)");
    assert_eq!(format_bullet_number(27, NumberFormat::AlphaLowerPeriod), "27.");
  }
}
