use std::path::Path;

use crate::domain::{classification::entities::Classification, wardrobe::entities::GarmentCategory};

/// Per-category garment type and pattern inference.
///
/// Both methods degrade to a zero-confidence sentinel instead of failing.
#[cfg_attr(test, mockall::automock)]
pub trait GarmentClassifier: Send + Sync + 'static {
    fn classify_item(&self, image_path: &Path, category: GarmentCategory) -> Classification;

    fn classify_pattern(&self, image_path: &Path) -> Classification;

    /// Models that loaded successfully, for startup reporting.
    fn loaded_models(&self) -> Vec<String>;
}
