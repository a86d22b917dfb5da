use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    analyze_outfit::{__path_analyze_outfit, MAX_IMAGE_SIZE, analyze_outfit},
    re_recommend::{__path_re_recommend, re_recommend},
};
use crate::application::http::server::app_state::AppState;

/// Four images plus the text fields and multipart framing.
const MAX_ANALYZE_BODY: usize = 4 * MAX_IMAGE_SIZE + 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_outfit, re_recommend))]
pub struct OutfitApiDoc;

pub fn outfit_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/analyze", state.args.server.root_path),
            post(analyze_outfit).layer(DefaultBodyLimit::max(MAX_ANALYZE_BODY)),
        )
        .route(
            &format!("{}/api/re-recommend", state.args.server.root_path),
            post(re_recommend),
        )
}
