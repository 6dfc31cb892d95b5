//! Paragraphs: ordered runs and hard breaks with shared block attributes.

use super::bullet::Bullet;
use super::style::{Alignment, Font};

/// A contiguous piece of text sharing one font style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
  pub text: String,
  /// `None` renders with the default font.
  pub font: Option<Font>,
}

impl TextRun {
  pub fn plain(text: &str) -> Self {
    Self {
      text: text.to_string(),
      font: None,
    }
  }

  pub fn styled(text: &str, font: Font) -> Self {
    Self {
      text: text.to_string(),
      font: Some(font),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphElement {
  Run(TextRun),
  /// A hard line break; the wrapper flushes the current line unconditionally.
  Break,
}

/// One paragraph of rich text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
  pub elements: Vec<ParagraphElement>,
  pub bullet: Bullet,
  pub alignment: Option<Alignment>,
  /// Line height multiplier in 1/10000 units; 0 means single spacing.
  pub line_spacing: u32,
  pub space_before_emu: i64,
  pub space_after_emu: i64,
}

impl Paragraph {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_text(text: &str) -> Self {
    Self {
      elements: vec![ParagraphElement::Run(TextRun::plain(text))],
      ..Self::default()
    }
  }

  pub fn with_styled_text(text: &str, font: Font) -> Self {
    Self {
      elements: vec![ParagraphElement::Run(TextRun::styled(text, font))],
      ..Self::default()
    }
  }

  pub fn add_run(&mut self, run: TextRun) -> &mut Self {
    self.elements.push(ParagraphElement::Run(run));
    self
  }

  pub fn add_break(&mut self) -> &mut Self {
    self.elements.push(ParagraphElement::Break);
    self
  }

  /// Concatenated text of all runs, breaks as `\n`.
  pub fn plain_text(&self) -> String {
    let mut out = String::new();
    for elem in &self.elements {
      match elem {
        ParagraphElement::Run(r) => out.push_str(&r.text),
        ParagraphElement::Break => out.push('\n'),
      }
    }
    out
  }
}
