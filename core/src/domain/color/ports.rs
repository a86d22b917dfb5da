use std::path::Path;

use crate::domain::color::entities::ColorSwatch;

/// Extracts the dominant colors of a garment photo.
///
/// Never fails: undecodable images yield [`ColorSwatch::extraction_failed`].
#[cfg_attr(test, mockall::automock)]
pub trait ColorExtractor: Send + Sync + 'static {
    fn extract_dominant_colors(&self, image_path: &Path) -> Vec<ColorSwatch>;
}
