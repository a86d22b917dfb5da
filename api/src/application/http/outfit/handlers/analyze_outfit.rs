use axum::extract::{Multipart, State};
use outfitter_core::domain::{
    styling::entities::{Recommendation, UserProfile},
    wardrobe::{
        entities::{GarmentCategory, UploadedImage, UploadedItems},
        ports::OutfitService,
        value_objects::AnalyzeOutfitInput,
    },
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeOutfitResponse {
    pub success: bool,
    pub user_info: UserProfile,
    /// Keyed by category: outer, inner1, inner2, bottom.
    #[schema(value_type = Object)]
    pub uploaded_items: UploadedItems,
    pub recommendation: Recommendation,
}

/// Multipart body of `/api/analyze`, for documentation only.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AnalyzeOutfitForm {
    gender: String,
    age_group: String,
    body_type: String,
    tpo: String,
    #[schema(value_type = Option<String>, format = Binary)]
    outer: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    inner1: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    inner2: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    bottom: Option<Vec<u8>>,
}

#[derive(Default)]
struct ProfileFields {
    gender: Option<String>,
    age_group: Option<String>,
    body_type: Option<String>,
    tpo: Option<String>,
}

impl ProfileFields {
    fn slot(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "gender" => Some(&mut self.gender),
            "age_group" => Some(&mut self.age_group),
            "body_type" => Some(&mut self.body_type),
            "tpo" => Some(&mut self.tpo),
            _ => None,
        }
    }

    fn into_profile(self) -> Result<UserProfile, ApiError> {
        fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
            value.ok_or_else(|| ApiError::UnprocessableEntity(format!("Missing form field: {name}")))
        }

        Ok(UserProfile {
            gender: required(self.gender, "gender")?,
            age_group: required(self.age_group, "age_group")?,
            body_type: required(self.body_type, "body_type")?,
            tpo: required(self.tpo, "tpo")?,
        })
    }
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "outfit",
    summary = "Analyze uploaded garments and recommend an outfit",
    description = "Classifies each uploaded garment photo, extracts its dominant colors and asks the stylist model to complete the outfit. Advisor failures are reported inside `recommendation`.",
    request_body(content = AnalyzeOutfitForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeOutfitResponse),
        (status = 413, description = "Image too large", body = ApiErrorResponse),
        (status = 422, description = "Missing form field", body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse)
    ),
)]
pub async fn analyze_outfit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeOutfitResponse>, ApiError> {
    let mut fields = ProfileFields::default();
    let mut images: Vec<UploadedImage> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::UnprocessableEntity(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if let Ok(category) = name.parse::<GarmentCategory>() {
            let Some(filename) = field.file_name().map(str::to_string).filter(|f| !f.is_empty())
            else {
                continue;
            };

            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read {name}: {}", e)))?;

            if data.is_empty() {
                continue;
            }
            if data.len() > MAX_IMAGE_SIZE {
                return Err(ApiError::PayloadTooLarge(format!(
                    "Image too large. Max size is {} bytes",
                    MAX_IMAGE_SIZE
                )));
            }

            images.retain(|image| image.category != category);
            images.push(UploadedImage {
                category,
                filename,
                data,
            });
        } else if let Some(slot) = fields.slot(&name) {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read {name}: {}", e)))?;
            *slot = Some(value);
        }
    }

    let profile = fields.into_profile()?;
    info!(
        categories = ?images.iter().map(|image| image.category.as_str()).collect::<Vec<_>>(),
        "Analyzing outfit"
    );

    let analysis = state
        .service
        .analyze_outfit(AnalyzeOutfitInput { profile, images })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeOutfitResponse {
        success: true,
        user_info: analysis.user_info,
        uploaded_items: analysis.uploaded_items,
        recommendation: analysis.recommendation,
    }))
}
