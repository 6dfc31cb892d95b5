//! Slide data model consumed by the rasterizer
//!
//! The model is deliberately small: typed shapes with absolute EMU
//! coordinates, style values, paragraphs, and chart data. Reading or writing
//! any container format, validation, and document properties live outside
//! this crate; the rasterizer takes an already-built [`slide::Presentation`].

pub mod bullet;
pub mod chart;
pub mod color;
pub mod measurement;
pub mod paragraph;
pub mod shape;
pub mod slide;
pub mod style;

pub use bullet::{Bullet, NumberFormat};
pub use chart::{ChartKind, ChartLegend, ChartSeries, ChartShape, ChartTitle};
pub use color::Color;
pub use paragraph::{Paragraph, ParagraphElement, TextRun};
pub use shape::{
  AutoShape, AutoShapeKind, CellBorders, DrawingShape, GroupShape, LineShape, PlaceholderKind,
  PlaceholderShape, Shape, TableCell, TableShape, TextBoxShape, Transform2D,
};
pub use slide::{Presentation, Slide, SlideSize};
pub use style::{
  Alignment, Border, BorderStyle, Fill, Font, HorizontalAlign, Shadow, Underline, VerticalAlign,
};
