//! Chart data attached to a chart shape.

use super::color::Color;
use super::shape::Transform2D;
use super::style::Font;

/// The nine chart kinds. 3D variants degrade to their 2D equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
  Bar,
  Bar3D,
  Line,
  Area,
  Pie,
  Pie3D,
  Doughnut,
  Scatter,
  Radar,
}

/// One data series: parallel category/value vectors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
  pub name: String,
  pub categories: Vec<String>,
  pub values: Vec<f64>,
  /// Overrides the palette colour for this series when set.
  pub fill: Option<Color>,
}

impl ChartSeries {
  pub fn new(name: &str, categories: &[&str], values: &[f64]) -> Self {
    Self {
      name: name.to_string(),
      categories: categories.iter().map(|c| c.to_string()).collect(),
      values: values.to_vec(),
      fill: None,
    }
  }

  /// Value for category index `i`, 0.0 when the series is ragged.
  pub fn value(&self, i: usize) -> f64 {
    self.values.get(i).copied().unwrap_or(0.0)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartTitle {
  pub text: String,
  pub font: Font,
  pub visible: bool,
}

impl ChartTitle {
  pub fn new(text: &str) -> Self {
    Self {
      text: text.to_string(),
      font: Font::named("Calibri", 12.0),
      visible: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLegend {
  pub visible: bool,
  pub font: Font,
}

impl Default for ChartLegend {
  fn default() -> Self {
    Self {
      visible: true,
      font: Font::named("Calibri", 9.0),
    }
  }
}

/// A chart shape: kind, series data, and optional title/legend bands.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartShape {
  pub transform: Transform2D,
  pub kind: ChartKind,
  pub series: Vec<ChartSeries>,
  pub title: Option<ChartTitle>,
  pub legend: Option<ChartLegend>,
  /// Doughnut hole diameter as a percentage of the outer diameter.
  pub hole_size_pct: u32,
}

impl ChartShape {
  pub fn new(kind: ChartKind) -> Self {
    Self {
      transform: Transform2D::default(),
      kind,
      series: Vec::new(),
      title: None,
      legend: None,
      hole_size_pct: 50,
    }
  }

  pub fn add_series(&mut self, series: ChartSeries) -> &mut Self {
    self.series.push(series);
    self
  }
}
