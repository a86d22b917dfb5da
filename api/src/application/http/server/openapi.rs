use utoipa::OpenApi;

use crate::application::http::{health::HealthApiDoc, outfit::router::OutfitApiDoc};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Winter Outfit Wizard API"
    ),
    nest(
        (path = "/api", api = OutfitApiDoc),
        (path = "/api", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
