//! Paragraph bullet styles.

use super::color::Color;

/// Numbering scheme for numeric bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
  /// `1.`
  ArabicPeriod,
  /// `1)`
  ArabicParen,
  /// `I.`
  RomanUpperPeriod,
  /// `i.`
  RomanLowerPeriod,
  /// `A.`
  AlphaUpperPeriod,
  /// `a.`
  AlphaLowerPeriod,
  /// `a)`
  AlphaLowerParen,
}

/// Bullet preceding a paragraph's first line.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Bullet {
  #[default]
  None,
  Char {
    /// The bullet glyph, e.g. `•` or `–`.
    text: String,
    /// Font family override; empty inherits the paragraph font.
    font: String,
    color: Option<Color>,
    /// Percentage of the text size (25-400).
    size_pct: u16,
  },
  Numeric {
    format: NumberFormat,
    start_at: u32,
  },
}

impl Bullet {
  pub fn char(text: &str) -> Self {
    Bullet::Char {
      text: text.to_string(),
      font: String::new(),
      color: None,
      size_pct: 100,
    }
  }

  pub fn numeric(format: NumberFormat, start_at: u32) -> Self {
    Bullet::Numeric { format, start_at }
  }
}
