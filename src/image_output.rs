//! Encoding the rendered canvas to PNG or JPEG bytes and files.
//!
//! The canvas already holds straight RGBA, so PNG encoding is a direct
//! buffer handoff. JPEG has no alpha channel; the alpha plane is dropped.

use std::io::Cursor;
use std::path::Path;

use image::{RgbaImage, ImageFormat as EncoderFormat};

use crate::canvas::Canvas;
use crate::error::{Error, ImageError, Result};

/// Output encoding for saved slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
  #[default]
  Png,
  Jpeg,
}

/// Encodes the canvas to an in-memory image file.
///
/// `jpeg_quality` is only consulted for [`ImageFormat::Jpeg`]; out-of-range
/// values (0 or > 100) are coerced to 90.
pub fn encode_image(canvas: &Canvas, format: ImageFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
  let width = canvas.width();
  let height = canvas.height();
  let mut buffer = Vec::new();

  match format {
    ImageFormat::Png => {
      let img = RgbaImage::from_raw(width, height, canvas.data().to_vec()).ok_or(Error::Image(
        ImageError::BufferMismatch { width, height },
      ))?;
      img
        .write_to(&mut Cursor::new(&mut buffer), EncoderFormat::Png)
        .map_err(|e| {
          Error::Image(ImageError::EncodeFailed {
            format: "PNG",
            reason: e.to_string(),
          })
        })?;
    }
    ImageFormat::Jpeg => {
      let quality = if jpeg_quality == 0 || jpeg_quality > 100 {
        90
      } else {
        jpeg_quality
      };
      let rgb: Vec<u8> = canvas
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
      let img = image::RgbImage::from_raw(width, height, rgb).ok_or(Error::Image(
        ImageError::BufferMismatch { width, height },
      ))?;
      let mut cursor = Cursor::new(&mut buffer);
      let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
      img.write_with_encoder(encoder).map_err(|e| {
        Error::Image(ImageError::EncodeFailed {
          format: "JPEG",
          reason: e.to_string(),
        })
      })?;
    }
  }

  Ok(buffer)
}

/// Encodes the canvas and writes it to `path`, creating parent directories
/// on demand. I/O errors propagate to the caller.
pub fn save_image(
  canvas: &Canvas,
  path: impl AsRef<Path>,
  format: ImageFormat,
  jpeg_quality: u8,
) -> Result<()> {
  let path = path.as_ref();
  let bytes = encode_image(canvas, format, jpeg_quality)?;
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent)?;
    }
  }
  std::fs::write(path, bytes)?;
  Ok(())
}
