use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    styling::entities::{Recommendation, UserProfile},
    wardrobe::entities::UploadedItems,
};

/// Text generation backed by a remote model.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync + 'static {
    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Produces outfit advice for the categories the user has not uploaded.
///
/// Infallible by contract: remote failures come back as a degraded
/// [`Recommendation`].
#[cfg_attr(test, mockall::automock)]
pub trait StylingService: Send + Sync {
    fn recommend(
        &self,
        profile: UserProfile,
        items: UploadedItems,
    ) -> impl Future<Output = Recommendation> + Send;
}
