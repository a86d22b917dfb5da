use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    styling::entities::{Recommendation, UserProfile},
    wardrobe::entities::{UploadedImage, UploadedItems},
};

pub struct AnalyzeOutfitInput {
    pub profile: UserProfile,
    /// At most one image per category.
    pub images: Vec<UploadedImage>,
}

pub struct ReRecommendInput {
    pub profile: UserProfile,
    pub items: UploadedItems,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OutfitAnalysis {
    pub user_info: UserProfile,
    #[schema(value_type = Object)]
    pub uploaded_items: UploadedItems,
    pub recommendation: Recommendation,
}
