//! Text: font faces, the font cache, and paragraph layout.

pub mod cache;
pub mod face;
pub mod layout;

pub use cache::FontCache;
pub use face::{FaceHandle, FaceMetrics, FontFace};
