//! Slide-to-image renderer
//!
//! The main entry points for rasterizing slides.
//!
//! # Pipeline
//!
//! 1. **Scale**: slide EMU box -> pixel canvas (`scale = width_px / cx_emu`)
//! 2. **Background**: option override, slide fill, or white
//! 3. **Shapes**: walked in slide order; per shape the order is fixed:
//!    shadow, fill, border, content
//! 4. **Transforms**: rotated or flipped shapes render into an offscreen and
//!    composite back as a unit
//!
//! Rendering is synchronous and single-threaded: a render is a pure
//! function of `(presentation, options, font cache)` to an RGBA canvas.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::chart::render_chart;
use crate::error::{Error, RenderError, Result};
use crate::geometry::Rect;
use crate::image_output::{self, ImageFormat};
use crate::model::color::Color;
use crate::model::shape::{
  AutoShape, AutoShapeKind, DrawingShape, GroupShape, LineShape, Shape, TableShape, TextBoxShape,
  Transform2D,
};
use crate::model::slide::Presentation;
use crate::model::style::{Border, BorderStyle, Fill, Font, Shadow, VerticalAlign};
use crate::raster::compose::{composite_rotated, flip_canvas, scale_bilinear};
use crate::raster::ellipse::{draw_ellipse_aa, fill_ellipse_aa};
use crate::raster::line::{draw_line_aa, draw_line_thick, draw_rect_border, draw_rect_outline};
use crate::raster::shapes::{
  draw_diamond, draw_rounded_rect, draw_triangle, fill_arrow_down, fill_arrow_left,
  fill_arrow_right, fill_arrow_up, fill_diamond, fill_heart, fill_hexagon, fill_pentagon,
  fill_plus, fill_rounded_rect, fill_star, fill_triangle,
};
use crate::raster::{fill_linear_gradient, fill_radial_gradient};
use crate::text::cache::FontCache;
use crate::text::layout::TextPainter;

const DEFAULT_WIDTH: u32 = 960;
const DEFAULT_DPI: f64 = 96.0;
const TABLE_CELL_PADDING: i32 = 3;
const PLACEHOLDER_COLOR: Color = Color::rgb(200, 200, 200);

/// Configures slide-to-image rendering.
#[derive(Clone)]
pub struct RenderOptions {
  /// Output image width in pixels; height follows the slide aspect ratio.
  /// Zero is coerced to 960.
  pub width: u32,
  /// Encoder format for the save-to-path conveniences.
  pub format: ImageFormat,
  /// JPEG quality (1-100); out-of-range values are coerced to 90.
  pub jpeg_quality: u8,
  /// Overrides the slide background when set.
  pub background_color: Option<Color>,
  /// Font sizes are multiplied by `dpi / 72` before face lookup.
  pub dpi: f64,
  /// Extra directories searched for fonts, on top of the system ones.
  pub font_dirs: Vec<PathBuf>,
  /// Pre-built cache to share across renders; a fresh one is created from
  /// `font_dirs` when absent.
  pub font_cache: Option<Arc<FontCache>>,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      width: DEFAULT_WIDTH,
      format: ImageFormat::Png,
      jpeg_quality: 90,
      background_color: None,
      dpi: DEFAULT_DPI,
      font_dirs: Vec::new(),
      font_cache: None,
    }
  }
}

impl std::fmt::Debug for RenderOptions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RenderOptions")
      .field("width", &self.width)
      .field("format", &self.format)
      .field("dpi", &self.dpi)
      .finish()
  }
}

/// Renders one slide to an RGBA canvas.
///
/// The image is `width x round(width * cy / cx)` pixels. Fails only when
/// `slide_index` is out of range.
pub fn render_slide(
  presentation: &Presentation,
  slide_index: usize,
  options: &RenderOptions,
) -> Result<Canvas> {
  if slide_index >= presentation.slides.len() {
    return Err(Error::Render(RenderError::SlideIndexOutOfRange {
      index: slide_index,
      count: presentation.slides.len(),
    }));
  }
  let width = if options.width == 0 {
    DEFAULT_WIDTH
  } else {
    options.width
  };
  let dpi = if options.dpi > 0.0 {
    options.dpi
  } else {
    DEFAULT_DPI
  };

  let slide = &presentation.slides[slide_index];
  let slide_w = presentation.slide_size.cx_emu as f64;
  let slide_h = presentation.slide_size.cy_emu as f64;
  let img_w = width;
  let img_h = ((img_w as f64 * slide_h / slide_w).round() as u32).max(1);
  log::debug!("rendering slide {slide_index} at {img_w}x{img_h}");

  let font_cache = options
    .font_cache
    .clone()
    .unwrap_or_else(|| Arc::new(FontCache::new(&options.font_dirs)));

  let mut painter = SlidePainter {
    canvas: Canvas::new(img_w, img_h)?,
    scale_x: img_w as f64 / slide_w,
    scale_y: img_h as f64 / slide_h,
    font_cache,
    dpi,
    origin_x: 0,
    origin_y: 0,
  };

  let bounds = painter.canvas.bounds();
  let mut background_drawn = false;
  if let Some(bg) = options.background_color {
    painter.canvas.fill_rect(bounds, bg);
    background_drawn = true;
  } else if let Some(fill) = &slide.background {
    if !matches!(fill, Fill::None) {
      painter.render_fill(fill, bounds);
      background_drawn = true;
    }
  }
  if !background_drawn {
    painter.canvas.fill_rect(bounds, Color::WHITE);
  }

  for shape in &slide.shapes {
    painter.render_shape(shape);
  }

  Ok(painter.canvas)
}

/// Renders every slide, sharing one font cache across the set.
pub fn render_all(presentation: &Presentation, options: &RenderOptions) -> Result<Vec<Canvas>> {
  let mut shared = options.clone();
  if shared.font_cache.is_none() {
    shared.font_cache = Some(Arc::new(FontCache::new(&shared.font_dirs)));
  }
  (0..presentation.slides.len())
    .map(|i| render_slide(presentation, i, &shared))
    .collect()
}

/// Renders a slide and writes it to `path`, creating parent directories on
/// demand. Format and JPEG quality come from the options.
pub fn save_slide_image(
  presentation: &Presentation,
  slide_index: usize,
  path: impl AsRef<Path>,
  options: &RenderOptions,
) -> Result<()> {
  let canvas = render_slide(presentation, slide_index, options)?;
  image_output::save_image(&canvas, path, options.format, options.jpeg_quality)
}

/// Renders every slide to files. `pattern` must contain `{}`, replaced by
/// the 1-based slide number, e.g. `"out/slide_{}.png"`.
pub fn save_all_slides(
  presentation: &Presentation,
  pattern: &str,
  options: &RenderOptions,
) -> Result<()> {
  let mut shared = options.clone();
  if shared.font_cache.is_none() {
    shared.font_cache = Some(Arc::new(FontCache::new(&shared.font_dirs)));
  }
  for i in 0..presentation.slides.len() {
    let path = pattern.replacen("{}", &(i + 1).to_string(), 1);
    save_slide_image(presentation, i, path, &shared)?;
  }
  Ok(())
}

/// Per-render state: the target canvas, the EMU-to-pixel scale, and the
/// shared font cache. `origin_*` rebases slide-absolute shape offsets when
/// drawing into a transformed group's offscreen.
struct SlidePainter {
  canvas: Canvas,
  scale_x: f64,
  scale_y: f64,
  font_cache: Arc<FontCache>,
  dpi: f64,
  origin_x: i32,
  origin_y: i32,
}

impl SlidePainter {
  fn px_x(&self, emu: i64) -> i32 {
    (emu as f64 * self.scale_x) as i32
  }

  fn px_y(&self, emu: i64) -> i32 {
    (emu as f64 * self.scale_y) as i32
  }

  fn shape_box(&self, t: &Transform2D) -> (i32, i32, i32, i32) {
    (
      self.px_x(t.offset_x_emu) + self.origin_x,
      self.px_y(t.offset_y_emu) + self.origin_y,
      self.px_x(t.width_emu),
      self.px_y(t.height_emu),
    )
  }

  fn border_width_px(&self, border: &Border) -> i32 {
    ((border.width_emu.max(1) as f64 * self.scale_x) as i32).max(1)
  }

  fn render_shape(&mut self, shape: &Shape) {
    match shape {
      Shape::RichText(s) => self.render_text_box(s),
      Shape::Placeholder(s) => self.render_text_box(&s.text_box),
      Shape::Drawing(s) => self.render_drawing(s),
      Shape::AutoShape(s) => self.render_auto_shape(s),
      Shape::Line(s) => self.render_line_shape(s),
      Shape::Table(s) => self.render_table(s),
      Shape::Chart(s) => self.render_chart_shape(s),
      Shape::Group(s) => self.render_group(s),
    }
  }

  /// Runs `draw` against a fresh offscreen the size of the shape, then
  /// composites it back through the shape's flips and rotation.
  fn render_transformed(
    &mut self,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    t: &Transform2D,
    draw: impl FnOnce(&mut SlidePainter),
  ) {
    if w <= 0 || h <= 0 {
      return;
    }
    let Ok(offscreen) = Canvas::new(w as u32, h as u32) else {
      return;
    };
    let mut tmp = SlidePainter {
      canvas: offscreen,
      scale_x: self.scale_x,
      scale_y: self.scale_y,
      font_cache: Arc::clone(&self.font_cache),
      dpi: self.dpi,
      origin_x: 0,
      origin_y: 0,
    };
    draw(&mut tmp);

    let offscreen = if t.flip_h || t.flip_v {
      flip_canvas(&tmp.canvas, t.flip_h, t.flip_v)
    } else {
      tmp.canvas
    };
    if t.rotation_deg == 0 {
      self.canvas.blend_canvas_at(x, y, &offscreen);
    } else {
      composite_rotated(&mut self.canvas, &offscreen, x, y, t.rotation_deg);
    }
  }

  fn render_fill(&mut self, fill: &Fill, rect: Rect) {
    match fill {
      Fill::None => {}
      Fill::Solid(c) => self.canvas.fill_rect_blend(rect, *c),
      Fill::LinearGradient {
        start,
        end,
        rotation_deg,
      } => fill_linear_gradient(&mut self.canvas, rect, *start, *end, *rotation_deg),
      Fill::RadialGradient { start, end } => {
        fill_radial_gradient(&mut self.canvas, rect, *start, *end)
      }
    }
  }

  /// Shadow: the shape rect offset along the shadow direction, with blur
  /// approximated by nested rectangle rings whose alpha falls off
  /// quadratically from the inside out.
  fn render_shadow(&mut self, shadow: &Shadow, rect: Rect) {
    if !shadow.visible {
      return;
    }
    let rad = shadow.direction_deg.to_radians();
    let dist = shadow.distance_emu as f64 * self.scale_x;
    let dx = (dist * rad.cos()) as i32;
    let dy = (dist * rad.sin()) as i32;
    let alpha = (shadow.alpha_pct.min(100) as u32 * 255 / 100) as u8;
    let color = shadow.color.with_alpha(alpha);
    let shadow_rect = rect.translate(dx, dy);

    if shadow.blur_radius <= 0 {
      self.canvas.fill_rect_blend(shadow_rect, color);
      return;
    }

    // Outermost ring first so inner pixels collect the strongest alpha.
    let steps = shadow.blur_radius.min(10);
    for i in (0..=steps).rev() {
      let t = i as f64 / steps as f64;
      let ring = color.with_alpha((alpha as f64 * (1.0 - t * t)) as u8);
      let expanded = shadow_rect.inset(-i);
      if i > 0 {
        let inner = shadow_rect.inset(-(i - 1));
        self.canvas.fill_rect_blend(
          Rect::new(expanded.min_x, expanded.min_y, expanded.max_x, inner.min_y),
          ring,
        );
        self.canvas.fill_rect_blend(
          Rect::new(expanded.min_x, inner.max_y, expanded.max_x, expanded.max_y),
          ring,
        );
        self.canvas.fill_rect_blend(
          Rect::new(expanded.min_x, inner.min_y, inner.min_x, inner.max_y),
          ring,
        );
        self.canvas.fill_rect_blend(
          Rect::new(inner.max_x, inner.min_y, expanded.max_x, inner.max_y),
          ring,
        );
      } else {
        self.canvas.fill_rect_blend(expanded, ring);
      }
    }
  }

  fn render_text_box(&mut self, shape: &TextBoxShape) {
    let (x, y, w, h) = self.shape_box(&shape.transform);
    if shape.transform.is_transformed() {
      self.render_transformed(x, y, w, h, &shape.transform, |p| {
        p.draw_text_box(shape, 0, 0, w, h);
      });
    } else {
      self.draw_text_box(shape, x, y, w, h);
    }
  }

  fn draw_text_box(&mut self, shape: &TextBoxShape, x: i32, y: i32, w: i32, h: i32) {
    let rect = Rect::from_xywh(x, y, w, h);
    if let Some(shadow) = &shape.transform.shadow {
      self.render_shadow(shadow, rect);
    }
    self.render_fill(&shape.transform.fill, rect);
    if let Some(border) = &shape.transform.border {
      if border.style != BorderStyle::None {
        let bw = self.border_width_px(border);
        draw_rect_border(&mut self.canvas, rect, border.color, bw, border.style);
      }
    }
    self.draw_paragraphs(&shape.paragraphs, x, y, w, h, shape.anchor);
  }

  fn draw_paragraphs(
    &mut self,
    paragraphs: &[crate::model::paragraph::Paragraph],
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    anchor: VerticalAlign,
  ) {
    let mut painter = TextPainter {
      canvas: &mut self.canvas,
      cache: self.font_cache.as_ref(),
      scale_x: self.scale_x,
      scale_y: self.scale_y,
      dpi: self.dpi,
    };
    painter.draw_paragraphs(paragraphs, x, y, w, h, anchor);
  }

  fn render_drawing(&mut self, shape: &DrawingShape) {
    let (x, y, w, h) = self.shape_box(&shape.transform);
    if w <= 0 || h <= 0 {
      return;
    }

    let mut data = shape.data.clone();
    if data.is_empty() && !shape.path.is_empty() {
      data = std::fs::read(&shape.path).unwrap_or_default();
    }
    if data.is_empty() {
      return;
    }

    let decoded = match image::load_from_memory(&data) {
      Ok(img) => img.to_rgba8(),
      Err(err) => {
        log::warn!("image decode failed for drawing '{}': {err}", shape.transform.name);
        draw_rect_outline(&mut self.canvas, Rect::from_xywh(x, y, w, h), PLACEHOLDER_COLOR, 1);
        return;
      }
    };

    let Some(scaled) = scale_bilinear(&decoded, w as u32, h as u32) else {
      return;
    };
    if shape.transform.is_transformed() {
      self.render_transformed(x, y, w, h, &shape.transform, |p| {
        p.canvas.blend_canvas_at(0, 0, &scaled);
      });
    } else {
      self.canvas.blend_canvas_at(x, y, &scaled);
    }
  }

  fn render_auto_shape(&mut self, shape: &AutoShape) {
    let (x, y, w, h) = self.shape_box(&shape.transform);
    if shape.transform.is_transformed() {
      self.render_transformed(x, y, w, h, &shape.transform, |p| {
        p.draw_auto_shape(shape, 0, 0, w, h);
      });
    } else {
      self.draw_auto_shape(shape, x, y, w, h);
    }
  }

  fn draw_auto_shape(&mut self, shape: &AutoShape, x: i32, y: i32, w: i32, h: i32) {
    let rect = Rect::from_xywh(x, y, w, h);
    if let Some(shadow) = &shape.transform.shadow {
      self.render_shadow(shadow, rect);
    }
    self.draw_auto_shape_fill(shape, x, y, w, h);
    self.draw_auto_shape_border(shape, x, y, w, h);
    if !shape.text.is_empty() {
      let face = self.font_cache.face_for(&Font::default(), self.dpi);
      let cache = Arc::clone(&self.font_cache);
      let mut painter = TextPainter {
        canvas: &mut self.canvas,
        cache: cache.as_ref(),
        scale_x: self.scale_x,
        scale_y: self.scale_y,
        dpi: self.dpi,
      };
      painter.draw_string_centered(&shape.text, &face, Color::BLACK, rect);
    }
  }

  fn draw_auto_shape_fill(&mut self, shape: &AutoShape, x: i32, y: i32, w: i32, h: i32) {
    let fill = &shape.transform.fill;
    let color = match fill {
      Fill::None => return,
      Fill::Solid(c) => *c,
      Fill::LinearGradient { start, .. } | Fill::RadialGradient { start, .. } => *start,
    };
    let solid = matches!(fill, Fill::Solid(_));
    let rect = Rect::from_xywh(x, y, w, h);

    match shape.kind {
      AutoShapeKind::Ellipse => {
        if solid {
          fill_ellipse_aa(&mut self.canvas, x, y, w, h, color);
        } else {
          self.render_fill(fill, rect);
        }
      }
      AutoShapeKind::RoundedRectangle => {
        if solid {
          fill_rounded_rect(&mut self.canvas, x, y, w, h, w.min(h) / 5, color);
        } else {
          self.render_fill(fill, rect);
        }
      }
      AutoShapeKind::Triangle => fill_triangle(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::Diamond => fill_diamond(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::Pentagon => fill_pentagon(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::Hexagon => fill_hexagon(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::Star4 => fill_star(&mut self.canvas, x, y, w, h, 4, color),
      AutoShapeKind::Star5 => fill_star(&mut self.canvas, x, y, w, h, 5, color),
      AutoShapeKind::ArrowRight => fill_arrow_right(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::ArrowLeft => fill_arrow_left(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::ArrowUp => fill_arrow_up(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::ArrowDown => fill_arrow_down(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::Heart => fill_heart(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::Plus => fill_plus(&mut self.canvas, x, y, w, h, color),
      AutoShapeKind::Rectangle => self.render_fill(fill, rect),
    }
  }

  fn draw_auto_shape_border(&mut self, shape: &AutoShape, x: i32, y: i32, w: i32, h: i32) {
    let Some(border) = &shape.transform.border else {
      return;
    };
    if border.style == BorderStyle::None {
      return;
    }
    let bw = self.border_width_px(border);
    match shape.kind {
      AutoShapeKind::Ellipse => draw_ellipse_aa(&mut self.canvas, x, y, w, h, border.color, bw),
      AutoShapeKind::RoundedRectangle => {
        draw_rounded_rect(&mut self.canvas, x, y, w, h, w.min(h) / 5, border.color, bw)
      }
      AutoShapeKind::Triangle => draw_triangle(&mut self.canvas, x, y, w, h, border.color, bw),
      AutoShapeKind::Diamond => draw_diamond(&mut self.canvas, x, y, w, h, border.color, bw),
      _ => draw_rect_border(
        &mut self.canvas,
        Rect::from_xywh(x, y, w, h),
        border.color,
        bw,
        border.style,
      ),
    }
  }

  fn render_line_shape(&mut self, shape: &LineShape) {
    let t = &shape.transform;
    let x1 = self.px_x(t.offset_x_emu) + self.origin_x;
    let y1 = self.px_y(t.offset_y_emu) + self.origin_y;
    let x2 = self.px_x(t.offset_x_emu + t.width_emu) + self.origin_x;
    let y2 = self.px_y(t.offset_y_emu + t.height_emu) + self.origin_y;
    let width = ((shape.line_width_emu.max(1) as f64 * self.scale_x) as i32).max(1);
    draw_line_aa(&mut self.canvas, x1, y1, x2, y2, shape.color, width);
  }

  fn render_table(&mut self, shape: &TableShape) {
    let (x, y, w, h) = self.shape_box(&shape.transform);
    let rows = shape.row_count() as i32;
    let cols = shape.col_count() as i32;
    if rows == 0 || cols == 0 {
      return;
    }
    let cell_w = w / cols;
    let cell_h = h / rows;

    for (row_idx, row) in shape.rows.iter().enumerate() {
      for (col_idx, cell) in row.iter().enumerate() {
        let cx = x + col_idx as i32 * cell_w;
        let cy = y + row_idx as i32 * cell_h;
        let rect = Rect::from_xywh(cx, cy, cell_w, cell_h);
        self.render_fill(&cell.fill, rect);
        match &cell.borders {
          Some(borders) => self.render_cell_borders(borders, rect),
          None => draw_rect_outline(&mut self.canvas, rect, Color::BLACK, 1),
        }
        let pad = TABLE_CELL_PADDING;
        self.draw_paragraphs(
          &cell.paragraphs,
          cx + pad,
          cy + pad,
          cell_w - 2 * pad,
          cell_h - 2 * pad,
          VerticalAlign::Top,
        );
      }
    }
  }

  fn render_cell_borders(&mut self, borders: &crate::model::shape::CellBorders, rect: Rect) {
    let mut draw_side = |b: &Option<Border>, x1: i32, y1: i32, x2: i32, y2: i32| {
      let Some(b) = b else { return };
      if b.style == BorderStyle::None {
        return;
      }
      let bw = ((b.width_emu as f64 * self.scale_x) as i32).max(1);
      draw_line_thick(&mut self.canvas, x1, y1, x2, y2, b.color, bw);
    };
    draw_side(&borders.top, rect.min_x, rect.min_y, rect.max_x, rect.min_y);
    draw_side(
      &borders.bottom,
      rect.min_x,
      rect.max_y - 1,
      rect.max_x,
      rect.max_y - 1,
    );
    draw_side(&borders.left, rect.min_x, rect.min_y, rect.min_x, rect.max_y);
    draw_side(
      &borders.right,
      rect.max_x - 1,
      rect.min_y,
      rect.max_x - 1,
      rect.max_y,
    );
  }

  fn render_chart_shape(&mut self, shape: &crate::model::chart::ChartShape) {
    let (x, y, w, h) = self.shape_box(&shape.transform);
    if shape.transform.is_transformed() {
      let dpi = self.dpi;
      self.render_transformed(x, y, w, h, &shape.transform, |p| {
        let cache = Arc::clone(&p.font_cache);
        render_chart(&mut p.canvas, &cache, dpi, shape, 0, 0, w, h);
      });
    } else {
      let cache = Arc::clone(&self.font_cache);
      render_chart(&mut self.canvas, &cache, self.dpi, shape, x, y, w, h);
    }
  }

  fn render_group(&mut self, group: &GroupShape) {
    if !group.transform.is_transformed() {
      for child in &group.children {
        self.render_shape(child);
      }
      return;
    }
    let (x, y, w, h) = self.shape_box(&group.transform);
    self.render_transformed(x, y, w, h, &group.transform, |p| {
      p.origin_x = -x;
      p.origin_y = -y;
      for child in &group.children {
        p.render_shape(child);
      }
    });
  }
}
