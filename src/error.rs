//! Error types for deckraster
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations. The renderer has a small failure surface:
//! an out-of-range slide index, canvas allocation guards, encoding, and the
//! I/O done by the save-to-path conveniences. Image decode failures inside a
//! slide are recovered locally (a placeholder is drawn) and never propagate.

use thiserror::Error;

/// Result type alias for deckraster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for deckraster.
///
/// Each variant wraps a more specific error type for that subsystem.
#[derive(Error, Debug)]
pub enum Error {
  /// Rendering or rasterization error
  #[error("Render error: {0}")]
  Render(#[from] RenderError),

  /// Font loading error
  #[error("Font error: {0}")]
  Font(#[from] FontError),

  /// Image decoding or encoding error
  #[error("Image error: {0}")]
  Image(#[from] ImageError),

  /// I/O error (writing rendered images to disk)
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

/// Errors that occur while rendering a slide.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
  /// The requested slide does not exist.
  #[error("slide index {index} out of range (0-{})", .count.saturating_sub(1))]
  SlideIndexOutOfRange { index: usize, count: usize },

  /// A canvas allocation was rejected before it could abort the process.
  #[error("{context}: invalid canvas dimensions {width}x{height}")]
  InvalidDimensions {
    context: &'static str,
    width: u32,
    height: u32,
  },
}

/// Errors that occur while loading or parsing fonts.
///
/// The rasterizer itself never surfaces these: a face that cannot be loaded
/// falls through the fallback chain and ends at the built-in bitmap face.
#[derive(Error, Debug, Clone)]
pub enum FontError {
  #[error("failed to parse font for family '{family}': {reason}")]
  ParseFailed { family: String, reason: String },
}

/// Errors that occur while encoding the rendered canvas.
#[derive(Error, Debug, Clone)]
pub enum ImageError {
  #[error("{format} encoding failed: {reason}")]
  EncodeFailed { format: &'static str, reason: String },

  #[error("pixel buffer does not match {width}x{height}")]
  BufferMismatch { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slide_index_message_cites_valid_range() {
    let err = RenderError::SlideIndexOutOfRange { index: 7, count: 3 };
    assert_eq!(err.to_string(), "slide index 7 out of range (0-2)");
  }

  #[test]
  fn slide_index_message_handles_empty_presentation() {
    let err = RenderError::SlideIndexOutOfRange { index: 0, count: 0 };
    assert_eq!(err.to_string(), "slide index 0 out of range (0-0)");
  }

  #[test]
  fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Error = io.into();
    assert!(matches!(err, Error::Io(_)));
  }
}
