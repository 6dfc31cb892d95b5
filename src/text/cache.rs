//! Font cache: family lookup, parsed-font reuse, and the fallback chain.
//!
//! `fontdb` answers "which file provides family X at weight/style Y";
//! parsed `fontdue::Font`s are expensive, so they are kept in an LRU keyed
//! by `(family, bold, italic)` behind a `parking_lot` mutex. Misses are
//! cached too: a slide full of runs naming an absent family would otherwise
//! walk the whole database once per run. The cache may be shared by many
//! renderers; parsing happens outside the lock and a double-check on
//! reinsert keeps racers consistent.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use rustc_hash::FxHasher;

use crate::model::style::Font;

use super::face::{BitmapFace, FaceHandle, FontdueFace};

const FONT_CACHE_SIZE: usize = 64;
type FontCacheHasher = std::hash::BuildHasherDefault<FxHasher>;

/// Families tried, in order, when the requested one has no match. CJK
/// coverage first, then common Latin staples.
const FALLBACK_FAMILIES: &[&str] = &[
  "Microsoft YaHei",
  "SimSun",
  "SimHei",
  "NSimSun",
  "Yu Gothic",
  "Meiryo",
  "MS Gothic",
  "Malgun Gothic",
  "Gulim",
  "Noto Sans CJK SC",
  "Noto Sans SC",
  "WenQuanYi Micro Hei",
  "Arial",
  "Helvetica",
  "DejaVu Sans",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
  family: String,
  bold: bool,
  italic: bool,
}

/// Shared font lookup for renders.
pub struct FontCache {
  db: fontdb::Database,
  fonts: Mutex<LruCache<FontKey, Option<Arc<fontdue::Font>>, FontCacheHasher>>,
  fallback: FaceHandle,
}

impl FontCache {
  /// Loads system fonts plus any extra directories.
  pub fn new(font_dirs: &[PathBuf]) -> Self {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    for dir in font_dirs {
      db.load_fonts_dir(dir);
    }
    log::debug!("font cache initialised with {} faces", db.len());
    Self::with_database(db)
  }

  /// A cache with no fonts at all; every lookup falls through to the
  /// built-in bitmap face. Used for deterministic rendering in tests.
  pub fn empty() -> Self {
    Self::with_database(fontdb::Database::new())
  }

  fn with_database(db: fontdb::Database) -> Self {
    Self {
      db,
      fonts: Mutex::new(LruCache::with_hasher(
        NonZeroUsize::new(FONT_CACHE_SIZE).unwrap(),
        FontCacheHasher::default(),
      )),
      fallback: Arc::new(BitmapFace),
    }
  }

  /// Returns a sized face for the family, or `None` when neither the
  /// family nor a weight/style variant of it exists.
  pub fn get_face(&self, family: &str, size_px: f32, bold: bool, italic: bool) -> Option<FaceHandle> {
    let key = FontKey {
      family: family.to_ascii_lowercase(),
      bold,
      italic,
    };
    {
      let mut cache = self.fonts.lock();
      if let Some(entry) = cache.get(&key) {
        return entry
          .as_ref()
          .map(|font| Arc::new(FontdueFace::new(Arc::clone(font), size_px)) as FaceHandle);
      }
    }

    let parsed = self.load_font(family, bold, italic);

    let mut cache = self.fonts.lock();
    if let Some(entry) = cache.get(&key) {
      return entry
        .as_ref()
        .map(|font| Arc::new(FontdueFace::new(Arc::clone(font), size_px)) as FaceHandle);
    }
    cache.put(key, parsed.clone());
    parsed.map(|font| Arc::new(FontdueFace::new(font, size_px)) as FaceHandle)
  }

  /// The built-in bitmap face. Never fails.
  pub fn fallback_face(&self) -> FaceHandle {
    Arc::clone(&self.fallback)
  }

  /// Resolves a model font to a face, walking the fallback family chain
  /// and ending at the bitmap face. Point size is converted to pixels at
  /// the given DPI.
  pub fn face_for(&self, font: &Font, dpi: f64) -> FaceHandle {
    let size_pt = if font.size_pt > 0.0 { font.size_pt } else { 10.0 };
    let size_px = (size_pt * dpi / 72.0) as f32;
    if let Some(face) = self.get_face(&font.name, size_px, font.bold, font.italic) {
      return face;
    }
    for family in FALLBACK_FAMILIES {
      if let Some(face) = self.get_face(family, size_px, font.bold, font.italic) {
        return face;
      }
    }
    log::debug!("no face for family '{}', using builtin bitmap face", font.name);
    self.fallback_face()
  }

  fn load_font(&self, family: &str, bold: bool, italic: bool) -> Option<Arc<fontdue::Font>> {
    let query = fontdb::Query {
      families: &[fontdb::Family::Name(family)],
      weight: if bold {
        fontdb::Weight::BOLD
      } else {
        fontdb::Weight::NORMAL
      },
      stretch: fontdb::Stretch::Normal,
      style: if italic {
        fontdb::Style::Italic
      } else {
        fontdb::Style::Normal
      },
    };
    let id = self.db.query(&query)?;
    let parsed = self.db.with_face_data(id, |data, index| {
      fontdue::Font::from_bytes(
        data,
        fontdue::FontSettings {
          collection_index: index,
          ..fontdue::FontSettings::default()
        },
      )
    })?;
    match parsed {
      Ok(font) => Some(Arc::new(font)),
      Err(reason) => {
        log::warn!("failed to parse font for family '{family}': {reason}");
        None
      }
    }
  }
}

impl Default for FontCache {
  fn default() -> Self {
    Self::new(&[])
  }
}

impl std::fmt::Debug for FontCache {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FontCache")
      .field("faces", &self.db.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_cache_misses_everything() {
    let cache = FontCache::empty();
    assert!(cache.get_face("Calibri", 16.0, false, false).is_none());
    // Repeated lookups hit the negative cache and stay None.
    assert!(cache.get_face("Calibri", 16.0, false, false).is_none());
  }

  #[test]
  fn face_for_never_fails() {
    let cache = FontCache::empty();
    let face = cache.face_for(&Font::default(), 96.0);
    assert!(face.measure("x") > 0);
  }

  #[test]
  fn fallback_face_has_metrics() {
    let cache = FontCache::empty();
    let m = cache.fallback_face().metrics();
    assert!(m.ascent > 0 && m.line_height > 0);
  }
}
