//! Fill, border, shadow, font, and alignment style values.

use super::color::Color;

/// How a shape (or the slide background) is painted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fill {
  #[default]
  None,
  Solid(Color),
  /// Linear gradient at an arbitrary angle in degrees.
  LinearGradient {
    start: Color,
    end: Color,
    rotation_deg: f64,
  },
  /// Radial gradient from the centre of the target rectangle.
  RadialGradient { start: Color, end: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
  #[default]
  None,
  Solid,
  Dash,
  Dot,
}

/// Shape outline. Width is in EMU and converted once per render.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
  pub style: BorderStyle,
  pub width_emu: i64,
  pub color: Color,
}

impl Border {
  pub fn solid(color: Color, width_emu: i64) -> Self {
    Self {
      style: BorderStyle::Solid,
      width_emu,
      color,
    }
  }
}

impl Default for Border {
  fn default() -> Self {
    Self {
      style: BorderStyle::None,
      width_emu: 0,
      color: Color::BLACK,
    }
  }
}

/// Drop shadow. Drawn before the shape's own fill so it sits behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
  pub visible: bool,
  pub direction_deg: f64,
  pub distance_emu: i64,
  /// Blur radius in pixels; 0 gives a hard-edged shadow.
  pub blur_radius: i32,
  pub color: Color,
  /// Opacity in percent (0-100), applied over `color`.
  pub alpha_pct: u8,
}

impl Default for Shadow {
  fn default() -> Self {
    Self {
      visible: false,
      direction_deg: 0.0,
      distance_emu: 0,
      blur_radius: 0,
      color: Color::rgba(0, 0, 0, 0x80),
      alpha_pct: 50,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underline {
  #[default]
  None,
  Single,
  Double,
  Heavy,
  Dash,
  Wavy,
}

/// Text run styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
  pub name: String,
  pub size_pt: f64,
  pub bold: bool,
  pub italic: bool,
  pub underline: Underline,
  pub strikethrough: bool,
  pub color: Color,
  pub superscript: bool,
  pub subscript: bool,
}

impl Default for Font {
  fn default() -> Self {
    Self {
      name: "Calibri".to_string(),
      size_pt: 10.0,
      bold: false,
      italic: false,
      underline: Underline::None,
      strikethrough: false,
      color: Color::BLACK,
      superscript: false,
      subscript: false,
    }
  }
}

impl Font {
  pub fn named(name: &str, size_pt: f64) -> Self {
    Self {
      name: name.to_string(),
      size_pt,
      ..Self::default()
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
  #[default]
  Left,
  Center,
  Right,
  /// Rendered as left-aligned in this version.
  Justify,
  /// Rendered as left-aligned in this version.
  Distribute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
  #[default]
  Top,
  Middle,
  Bottom,
}

/// Per-paragraph alignment, margins, and first-line indent (EMU).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Alignment {
  pub horizontal: HorizontalAlign,
  pub vertical: VerticalAlign,
  pub margin_left_emu: i64,
  pub margin_right_emu: i64,
  pub margin_top_emu: i64,
  pub margin_bottom_emu: i64,
  pub indent_emu: i64,
}

impl Alignment {
  pub fn horizontal(h: HorizontalAlign) -> Self {
    Self {
      horizontal: h,
      ..Self::default()
    }
  }
}
