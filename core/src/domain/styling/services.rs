use tracing::{info, warn};

use crate::domain::{
    classification::ports::GarmentClassifier,
    color::ports::ColorExtractor,
    common::{entities::app_errors::CoreError, services::Service},
    styling::{
        entities::{Recommendation, UserProfile},
        parser::parse_recommendation,
        ports::{LLMClient, StylingService},
        prompt::build_prompt,
        schema::get_recommendation_schema,
    },
    wardrobe::{entities::UploadedItems, ports::UploadStore},
};

impl<GC, CE, LLM, US> StylingService for Service<GC, CE, LLM, US>
where
    GC: GarmentClassifier,
    CE: ColorExtractor,
    LLM: LLMClient,
    US: UploadStore,
{
    async fn recommend(&self, profile: UserProfile, items: UploadedItems) -> Recommendation {
        let Some(llm_client) = self.llm_client.as_ref() else {
            warn!("Gemini API key not configured, skipping recommendation");
            return Recommendation::not_configured();
        };

        let prompt = build_prompt(&profile, &items);
        info!(
            uploaded = items.len(),
            tpo = %profile.tpo,
            "Requesting outfit recommendation"
        );

        match llm_client
            .generate_with_text(prompt, get_recommendation_schema())
            .await
        {
            Ok(reply) => {
                let recommendation = parse_recommendation(&reply, &items);
                info!(
                    slots = recommendation.recommendations.len(),
                    degraded = recommendation.is_degraded(),
                    "Recommendation parsed"
                );
                recommendation
            }
            Err(e) if is_quota_error(&e) => {
                warn!(error = %e, "Gemini quota exceeded");
                Recommendation::quota_exceeded()
            }
            Err(e) => {
                warn!(error = %e, "Gemini request failed");
                Recommendation::remote_error(e.to_string())
            }
        }
    }
}

fn is_quota_error(error: &CoreError) -> bool {
    if matches!(error, CoreError::QuotaExceeded(_)) {
        return true;
    }
    let text = error.to_string();
    text.contains("429") || text.to_lowercase().contains("quota")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        classification::{entities::Classification, ports::MockGarmentClassifier},
        color::{
            entities::{ColorName, ColorSwatch},
            ports::MockColorExtractor,
        },
        styling::{entities::UPLOADED_REASON, ports::MockLLMClient},
        wardrobe::{
            entities::{GarmentCategory, UploadedItem},
            ports::MockUploadStore,
        },
    };

    type TestService = Service<MockGarmentClassifier, MockColorExtractor, MockLLMClient, MockUploadStore>;

    fn service(llm_client: Option<MockLLMClient>) -> TestService {
        Service::new(
            MockGarmentClassifier::new(),
            MockColorExtractor::new(),
            llm_client,
            MockUploadStore::new(),
        )
    }

    fn profile() -> UserProfile {
        UserProfile {
            gender: "female".to_string(),
            age_group: "20s".to_string(),
            body_type: "slim".to_string(),
            tpo: "campus".to_string(),
        }
    }

    fn jeans() -> UploadedItems {
        let mut items = UploadedItems::new();
        items.insert(
            GarmentCategory::Bottom,
            UploadedItem {
                garment: Classification::new("청바지/데님", 0.91),
                pattern: Classification::new("무지", 0.88),
                colors: vec![ColorSwatch::new(ColorName::Blue, [50, 80, 150], 100.0)],
                image_path: None,
            },
        );
        items
    }

    fn failing_client(error: CoreError) -> MockLLMClient {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().times(1).returning(move |_, _| {
            let error = error.clone();
            Box::pin(async move { Err(error) })
        });
        llm
    }

    #[tokio::test]
    async fn test_recommend_without_client_is_not_configured() {
        let recommendation = service(None).recommend(profile(), jeans()).await;

        assert_eq!(recommendation.error.as_deref(), Some("API key not configured"));
        assert!(recommendation.recommendations.is_empty());
        assert!(recommendation.styling_tips.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_backfills_uploaded_items() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .withf(|prompt, schema| {
                prompt.contains("- 하의: 청바지/데님") && schema.get("properties").is_some()
            })
            .times(1)
            .returning(|_, _| {
                Box::pin(async move {
                    Ok(r#"{
                        "recommendations": {
                            "outer": {"item": "코트", "color": "카멜", "pattern": "무지", "reason": "단정함"},
                            "inner1": {"item": "니트", "color": "아이보리", "pattern": "무지", "reason": "보온"},
                            "inner2": {"item": "셔츠", "color": "화이트", "pattern": "스트라이프", "reason": "레이어드"},
                            "bottom": {"item": "미니스커트", "color": "레드", "pattern": "체크", "reason": "포인트"},
                            "shoes": {"item": "로퍼", "color": "블랙", "reason": "캠퍼스"}
                        },
                        "style_direction": "클래식 캠퍼스룩",
                        "styling_tips": ["머플러", "벨트", "양말"]
                    }"#
                    .to_string())
                })
            });

        let recommendation = service(Some(llm)).recommend(profile(), jeans()).await;

        let bottom = &recommendation.recommendations["bottom"];
        assert!(bottom.uploaded);
        assert_eq!(bottom.item, "청바지/데님");
        assert_eq!(bottom.color, "블루");
        assert_eq!(bottom.reason, UPLOADED_REASON);
        for slot in ["outer", "inner1", "inner2", "shoes"] {
            assert!(!recommendation.recommendations[slot].reason.is_empty());
        }
        assert_eq!(recommendation.styling_tips.len(), 3);
    }

    #[tokio::test]
    async fn test_recommend_maps_quota_errors() {
        let recommendation = service(Some(failing_client(CoreError::QuotaExceeded(
            "429 Too Many Requests".to_string(),
        ))))
        .recommend(profile(), jeans())
        .await;
        assert_eq!(recommendation.error.as_deref(), Some("quota_exceeded"));

        let recommendation = service(Some(failing_client(CoreError::ExternalServiceError(
            "Resource has been exhausted (e.g. check quota).".to_string(),
        ))))
        .recommend(profile(), jeans())
        .await;
        assert_eq!(recommendation.error.as_deref(), Some("quota_exceeded"));
    }

    #[tokio::test]
    async fn test_recommend_other_errors_are_degraded() {
        let recommendation = service(Some(failing_client(CoreError::ExternalServiceError(
            "connection refused".to_string(),
        ))))
        .recommend(profile(), jeans())
        .await;

        assert!(recommendation.recommendations.is_empty());
        assert!(recommendation.style_direction.starts_with("오류 발생: "));
        assert!(
            recommendation
                .error
                .as_deref()
                .is_some_and(|error| error.contains("connection refused"))
        );
    }
}
