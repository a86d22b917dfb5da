use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageReader};
use tracing::{debug, instrument, warn};

use crate::domain::{
    color::{
        clustering::KMeans,
        entities::ColorSwatch,
        ports::ColorExtractor,
        services::dominant_swatches,
    },
    common::entities::app_errors::CoreError,
};

/// Longest side an image is reduced to before clustering.
const MAX_CLUSTER_SIDE: u32 = 256;

#[derive(Debug, Clone, Default)]
pub struct ImageColorExtractor {
    kmeans: KMeans,
}

impl ImageColorExtractor {
    pub fn new(kmeans: KMeans) -> Self {
        Self { kmeans }
    }

    fn extract_from_image(&self, image: &DynamicImage) -> Vec<ColorSwatch> {
        let (width, height) = image.dimensions();
        let image = if width > MAX_CLUSTER_SIDE || height > MAX_CLUSTER_SIDE {
            image.thumbnail(MAX_CLUSTER_SIDE, MAX_CLUSTER_SIDE)
        } else {
            image.clone()
        };

        let pixels: Vec<[u8; 3]> = image.to_rgb8().pixels().map(|p| p.0).collect();
        dominant_swatches(&pixels, &self.kmeans)
    }
}

/// Decodes with the format implied by the file extension, then retries from
/// the raw buffer with the format sniffed from its content.
fn decode(image_path: &Path) -> Result<DynamicImage, CoreError> {
    let by_extension = ImageReader::open(image_path)
        .map_err(CoreError::from)
        .and_then(|reader| {
            reader
                .decode()
                .map_err(|e| CoreError::ImageDecode(e.to_string()))
        });

    match by_extension {
        Ok(image) => Ok(image),
        Err(e @ CoreError::Storage(_)) => Err(e),
        Err(e) => {
            warn!(path = %image_path.display(), error = %e, "Image read failed, retrying from buffer");
            let data = std::fs::read(image_path)?;
            image::load_from_memory(&data).map_err(|e| CoreError::ImageDecode(e.to_string()))
        }
    }
}

impl ColorExtractor for ImageColorExtractor {
    #[instrument(skip(self))]
    fn extract_dominant_colors(&self, image_path: &Path) -> Vec<ColorSwatch> {
        let swatches = match decode(image_path) {
            Ok(image) => self.extract_from_image(&image),
            Err(e) => {
                warn!(path = %image_path.display(), error = %e, "Color extraction failed");
                vec![ColorSwatch::extraction_failed()]
            }
        };

        debug!(path = %image_path.display(), ?swatches, "Extracted colors");
        swatches
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;
    use crate::domain::color::entities::ColorName;

    fn write_png(dir: &Path, name: &str, image: &RgbImage) -> std::path::PathBuf {
        let path = dir.join(name);
        image.save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    #[test]
    fn test_uniform_image_yields_single_swatch() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::from_pixel(64, 48, Rgb([60, 80, 140]));
        let path = write_png(dir.path(), "denim.png", &image);

        let swatches = ImageColorExtractor::default().extract_dominant_colors(&path);

        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].name, ColorName::Blue);
        assert_eq!(swatches[0].percentage, 100.0);
    }

    #[test]
    fn test_large_image_is_reduced_but_keeps_shares() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::from_fn(800, 400, |x, _| {
            if x < 400 {
                Rgb([250, 250, 250])
            } else {
                Rgb([10, 10, 10])
            }
        });
        let path = write_png(dir.path(), "split.png", &image);

        let swatches = ImageColorExtractor::default().extract_dominant_colors(&path);

        assert!(swatches.len() >= 2 && swatches.len() <= 3);
        assert!(swatches.windows(2).all(|w| w[0].percentage >= w[1].percentage));
        let total: f64 = swatches.iter().map(|s| s.percentage).sum();
        assert!(total <= 100.0);
        let names: Vec<&ColorName> = swatches.iter().map(|s| &s.name).collect();
        assert!(names.contains(&&ColorName::White));
        assert!(names.contains(&&ColorName::Black));
    }

    #[test]
    fn test_misleading_extension_is_decoded_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::from_pixel(16, 16, Rgb([30, 150, 40]));
        let png = write_png(dir.path(), "shirt.png", &image);
        let renamed = dir.path().join("shirt.jpg");
        std::fs::rename(&png, &renamed).unwrap();

        let swatches = ImageColorExtractor::default().extract_dominant_colors(&renamed);

        assert_eq!(swatches[0].name, ColorName::Green);
    }

    #[test]
    fn test_undecodable_file_returns_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let swatches = ImageColorExtractor::default().extract_dominant_colors(&path);

        assert_eq!(swatches, vec![ColorSwatch::extraction_failed()]);
        assert_eq!(swatches[0].name.to_string(), "색상 추출 실패");
    }

    #[test]
    fn test_missing_file_returns_sentinel() {
        let swatches = ImageColorExtractor::default()
            .extract_dominant_colors(Path::new("/nonexistent/outer_coat.png"));
        assert_eq!(swatches, vec![ColorSwatch::extraction_failed()]);
    }

    #[test]
    fn test_file_without_extension_is_decoded_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::from_pixel(8, 8, Rgb([5, 5, 5]));
        let png = write_png(dir.path(), "scarf.png", &image);
        let bare = dir.path().join("scarf");
        std::fs::rename(&png, &bare).unwrap();

        let swatches = ImageColorExtractor::default().extract_dominant_colors(&bare);

        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].name, ColorName::Black);
    }

    #[test]
    fn test_decode_prefers_extension_then_content() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::from_pixel(4, 4, Rgb([200, 30, 30]));
        let png = write_png(dir.path(), "coat.png", &image);
        let misnamed = dir.path().join("coat.jpeg");
        std::fs::copy(&png, &misnamed).unwrap();

        assert!(ImageReader::open(&misnamed).unwrap().decode().is_err());
        assert_eq!(decode(&misnamed).unwrap().dimensions(), (4, 4));
        assert!(matches!(
            decode(&dir.path().join("missing.png")),
            Err(CoreError::Storage(_))
        ));
    }
}
