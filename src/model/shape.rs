//! The shape tree: a tagged sum over the drawable variants.
//!
//! Every variant carries the same envelope ([`Transform2D`]): offset and
//! size in EMU, rotation, flips, and the shared fill/border/shadow
//! decoration. Offsets are slide-absolute, including for shapes inside a
//! group; a transformed group rebases its children when it renders them
//! into an offscreen.

use super::chart::ChartShape;
use super::paragraph::Paragraph;
use super::style::{Border, Fill, Shadow, VerticalAlign};
use crate::model::color::Color;

/// Common transform and decoration fields shared by all shape variants.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transform2D {
  pub offset_x_emu: i64,
  pub offset_y_emu: i64,
  pub width_emu: i64,
  pub height_emu: i64,
  /// Clockwise rotation in degrees.
  pub rotation_deg: i32,
  pub flip_h: bool,
  pub flip_v: bool,
  pub fill: Fill,
  pub border: Option<Border>,
  pub shadow: Option<Shadow>,
  pub name: String,
}

impl Transform2D {
  pub fn at(offset_x_emu: i64, offset_y_emu: i64, width_emu: i64, height_emu: i64) -> Self {
    Self {
      offset_x_emu,
      offset_y_emu,
      width_emu,
      height_emu,
      ..Self::default()
    }
  }

  /// True when rendering must go through the offscreen transform path.
  pub fn is_transformed(&self) -> bool {
    self.rotation_deg != 0 || self.flip_h || self.flip_v
  }
}

/// A free-form text box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBoxShape {
  pub transform: Transform2D,
  pub paragraphs: Vec<Paragraph>,
  pub anchor: VerticalAlign,
}

/// Layout-provided placeholder kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
  Title,
  Body,
  CenteredTitle,
  Subtitle,
  Other,
}

/// A placeholder renders exactly like a text box; the kind and index only
/// matter to layout tooling outside the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderShape {
  pub text_box: TextBoxShape,
  pub kind: PlaceholderKind,
  pub index: u32,
}

/// A raster image placed on the slide.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawingShape {
  pub transform: Transform2D,
  /// Encoded image bytes (PNG/JPEG/GIF/BMP...). Preferred over `path`.
  pub data: Vec<u8>,
  /// File path to read when `data` is empty.
  pub path: String,
}

/// Geometric kinds an [`AutoShape`] can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoShapeKind {
  #[default]
  Rectangle,
  RoundedRectangle,
  Ellipse,
  Triangle,
  Diamond,
  Pentagon,
  Hexagon,
  Star4,
  Star5,
  ArrowRight,
  ArrowLeft,
  ArrowUp,
  ArrowDown,
  Heart,
  Plus,
}

/// A parametric geometric shape with optional centred label text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoShape {
  pub transform: Transform2D,
  pub kind: AutoShapeKind,
  pub text: String,
}

/// A straight line from the envelope's origin to origin + size.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
  pub transform: Transform2D,
  /// Stroke width in EMU.
  pub line_width_emu: i64,
  pub color: Color,
}

impl Default for LineShape {
  fn default() -> Self {
    Self {
      transform: Transform2D::default(),
      line_width_emu: 12_700,
      color: Color::BLACK,
    }
  }
}

/// Per-side cell borders; `None` sides are not drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellBorders {
  pub top: Option<Border>,
  pub bottom: Option<Border>,
  pub left: Option<Border>,
  pub right: Option<Border>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
  pub fill: Fill,
  /// `None` draws a default 1-pixel black frame.
  pub borders: Option<CellBorders>,
  pub paragraphs: Vec<Paragraph>,
}

/// A grid of equally sized cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableShape {
  pub transform: Transform2D,
  pub rows: Vec<Vec<TableCell>>,
}

impl TableShape {
  pub fn new(rows: usize, cols: usize) -> Self {
    Self {
      transform: Transform2D::default(),
      rows: vec![vec![TableCell::default(); cols]; rows],
    }
  }

  pub fn row_count(&self) -> usize {
    self.rows.len()
  }

  pub fn col_count(&self) -> usize {
    self.rows.first().map_or(0, Vec::len)
  }
}

/// A group of shapes composited as one unit when transformed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupShape {
  pub transform: Transform2D,
  pub children: Vec<Shape>,
}

/// A drawable element of a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
  RichText(TextBoxShape),
  Placeholder(PlaceholderShape),
  Drawing(DrawingShape),
  AutoShape(AutoShape),
  Line(LineShape),
  Table(TableShape),
  Chart(ChartShape),
  Group(GroupShape),
}

impl Shape {
  /// The shared envelope of any variant.
  pub fn envelope(&self) -> &Transform2D {
    match self {
      Shape::RichText(s) => &s.transform,
      Shape::Placeholder(s) => &s.text_box.transform,
      Shape::Drawing(s) => &s.transform,
      Shape::AutoShape(s) => &s.transform,
      Shape::Line(s) => &s.transform,
      Shape::Table(s) => &s.transform,
      Shape::Chart(s) => &s.transform,
      Shape::Group(s) => &s.transform,
    }
  }

  pub fn envelope_mut(&mut self) -> &mut Transform2D {
    match self {
      Shape::RichText(s) => &mut s.transform,
      Shape::Placeholder(s) => &mut s.text_box.transform,
      Shape::Drawing(s) => &mut s.transform,
      Shape::AutoShape(s) => &mut s.transform,
      Shape::Line(s) => &mut s.transform,
      Shape::Table(s) => &mut s.transform,
      Shape::Chart(s) => &mut s.transform,
      Shape::Group(s) => &mut s.transform,
    }
  }
}
