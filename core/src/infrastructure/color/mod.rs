pub mod image_color_extractor;

pub use image_color_extractor::ImageColorExtractor;
