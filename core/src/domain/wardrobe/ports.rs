use std::{future::Future, path::PathBuf};

use crate::domain::{
    common::entities::app_errors::CoreError,
    styling::entities::Recommendation,
    wardrobe::{
        entities::UploadedImage,
        value_objects::{AnalyzeOutfitInput, OutfitAnalysis, ReRecommendInput},
    },
};

/// Request-scoped storage for uploaded photos.
#[cfg_attr(test, mockall::automock)]
pub trait UploadStore: Send + Sync + 'static {
    /// Writes the image and returns where it landed.
    fn save(
        &self,
        image: UploadedImage,
    ) -> impl Future<Output = Result<PathBuf, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait OutfitService: Send + Sync {
    fn analyze_outfit(
        &self,
        input: AnalyzeOutfitInput,
    ) -> impl Future<Output = Result<OutfitAnalysis, CoreError>> + Send;

    fn re_recommend(
        &self,
        input: ReRecommendInput,
    ) -> impl Future<Output = Recommendation> + Send;
}
