use axum::extract::State;
use outfitter_core::domain::{
    styling::entities::Recommendation,
    wardrobe::{ports::OutfitService, value_objects::ReRecommendInput},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::application::http::{
    outfit::validators::ReRecommendRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReRecommendResponse {
    pub recommendation: Recommendation,
}

#[utoipa::path(
    post,
    path = "/re-recommend",
    tag = "outfit",
    summary = "Recommend again from edited analysis results",
    description = "Skips classification and color extraction and re-runs only the stylist model on the items supplied.",
    request_body = ReRecommendRequest,
    responses(
        (status = 200, body = ReRecommendResponse),
        (status = 422, description = "Invalid body", body = ApiErrorResponse)
    ),
)]
pub async fn re_recommend(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ReRecommendRequest>,
) -> Result<Response<ReRecommendResponse>, ApiError> {
    info!(
        categories = ?payload.uploaded_items.keys().collect::<Vec<_>>(),
        "Re-recommendation requested"
    );

    let recommendation = state
        .service
        .re_recommend(ReRecommendInput {
            profile: payload.user_info.into(),
            items: payload.uploaded_items,
        })
        .await;

    Ok(Response::OK(ReRecommendResponse { recommendation }))
}
