use std::path::Path;

use image::{DynamicImage, ImageReader, imageops::FilterType};

use crate::domain::common::entities::app_errors::CoreError;

/// Side length the classifiers were trained on.
pub const INPUT_SIZE: u32 = 224;

/// NHWC shape of a single preprocessed image.
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3];

/// Reads an image from disk and turns it into a model input.
pub fn load_input(image_path: &Path) -> Result<Vec<f32>, CoreError> {
    let image = ImageReader::open(image_path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| CoreError::ImageDecode(e.to_string()))?;

    Ok(to_input(&image))
}

/// Bicubic resize to [`INPUT_SIZE`], RGB, scaled to `[0, 1]`, row-major NHWC.
pub fn to_input(image: &DynamicImage) -> Vec<f32> {
    image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom)
        .to_rgb8()
        .into_raw()
        .into_iter()
        .map(|channel| channel as f32 / 255.0)
        .collect()
}

/// True when the values already look like class probabilities.
pub fn is_distribution(values: &[f32]) -> bool {
    if values.is_empty() || values.iter().any(|v| !(0.0..=1.0).contains(v)) {
        return false;
    }
    let sum: f32 = values.iter().sum();
    (sum - 1.0).abs() < 1e-3
}

pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|x| x / sum).collect()
}

/// Index and value of the largest finite entry. Ties resolve to the first.
pub fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .fold(None, |best, (index, value)| match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((index, value)),
        })
}
