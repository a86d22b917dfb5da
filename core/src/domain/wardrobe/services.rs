use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::domain::{
    classification::ports::GarmentClassifier,
    color::ports::ColorExtractor,
    common::{entities::app_errors::CoreError, services::Service},
    styling::{
        entities::Recommendation,
        ports::{LLMClient, StylingService},
    },
    wardrobe::{
        entities::{UploadedImage, UploadedItem, UploadedItems},
        ports::{OutfitService, UploadStore},
        value_objects::{AnalyzeOutfitInput, OutfitAnalysis, ReRecommendInput},
    },
};

impl<GC, CE, LLM, US> Service<GC, CE, LLM, US>
where
    GC: GarmentClassifier,
    CE: ColorExtractor,
    LLM: LLMClient,
    US: UploadStore,
{
    /// Saves one photo and runs the CPU-bound analysis on the blocking pool.
    async fn analyze_image(&self, image: UploadedImage) -> Result<UploadedItem, CoreError> {
        let category = image.category;
        let path = self.upload_store.save(image).await?;

        let classifier = Arc::clone(&self.classifier);
        let color_extractor = Arc::clone(&self.color_extractor);

        tokio::task::spawn_blocking(move || {
            let garment = classifier.classify_item(&path, category);
            let pattern = classifier.classify_pattern(&path);
            let colors = color_extractor.extract_dominant_colors(&path);

            UploadedItem {
                garment,
                pattern,
                colors,
                image_path: Some(path.display().to_string()),
            }
        })
        .await
        .map_err(|e| {
            error!(category = %category, error = %e, "Image analysis task failed");
            CoreError::InternalServerError
        })
    }
}

impl<GC, CE, LLM, US> OutfitService for Service<GC, CE, LLM, US>
where
    GC: GarmentClassifier,
    CE: ColorExtractor,
    LLM: LLMClient,
    US: UploadStore,
{
    #[instrument(skip_all, fields(images = input.images.len()))]
    async fn analyze_outfit(&self, input: AnalyzeOutfitInput) -> Result<OutfitAnalysis, CoreError> {
        let mut images = input.images;
        images.sort_by_key(|image| image.category);

        let mut uploaded_items = UploadedItems::new();
        for image in images {
            let category = image.category;
            if uploaded_items.contains_key(&category) {
                return Err(CoreError::Invalid(format!(
                    "more than one image for category {category}"
                )));
            }

            let item = self.analyze_image(image).await?;
            info!(
                category = %category,
                garment = %item.garment.label,
                pattern = %item.pattern.label,
                colors = %item.color_names(),
                "Analyzed uploaded item"
            );
            uploaded_items.insert(category, item);
        }

        let recommendation = self
            .recommend(input.profile.clone(), uploaded_items.clone())
            .await;

        Ok(OutfitAnalysis {
            user_info: input.profile,
            uploaded_items,
            recommendation,
        })
    }

    async fn re_recommend(&self, input: ReRecommendInput) -> Recommendation {
        self.recommend(input.profile, input.items).await
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{
        classification::{entities::Classification, ports::MockGarmentClassifier},
        color::{
            entities::{ColorName, ColorSwatch},
            ports::MockColorExtractor,
        },
        styling::{entities::UserProfile, ports::MockLLMClient},
        wardrobe::{entities::GarmentCategory, ports::MockUploadStore},
    };

    type TestService =
        Service<MockGarmentClassifier, MockColorExtractor, MockLLMClient, MockUploadStore>;

    fn profile() -> UserProfile {
        UserProfile {
            gender: "female".to_string(),
            age_group: "20s".to_string(),
            body_type: "slim".to_string(),
            tpo: "campus".to_string(),
        }
    }

    fn image(category: GarmentCategory) -> UploadedImage {
        UploadedImage {
            category,
            filename: "photo.png".to_string(),
            data: bytes::Bytes::from_static(b"not really a png"),
        }
    }

    fn upload_store() -> MockUploadStore {
        let mut store = MockUploadStore::new();
        store.expect_save().returning(|image| {
            let path = PathBuf::from(format!("uploads/{}_{}", image.category, image.filename));
            Box::pin(async move { Ok(path) })
        });
        store
    }

    fn classifier() -> MockGarmentClassifier {
        let mut classifier = MockGarmentClassifier::new();
        classifier
            .expect_classify_item()
            .returning(|_, category| match category {
                GarmentCategory::Bottom => Classification::new("청바지/데님", 0.9),
                _ => Classification::new("코트", 0.7),
            });
        classifier
            .expect_classify_pattern()
            .returning(|_| Classification::new("무지", 0.95));
        classifier
    }

    fn color_extractor() -> MockColorExtractor {
        let mut extractor = MockColorExtractor::new();
        extractor
            .expect_extract_dominant_colors()
            .returning(|_| vec![ColorSwatch::new(ColorName::Blue, [40, 70, 160], 100.0)]);
        extractor
    }

    #[tokio::test]
    async fn test_analyze_outfit_without_advisor() {
        let service: TestService =
            Service::new(classifier(), color_extractor(), None, upload_store());

        let analysis = service
            .analyze_outfit(AnalyzeOutfitInput {
                profile: profile(),
                images: vec![image(GarmentCategory::Bottom)],
            })
            .await
            .unwrap();

        assert_eq!(analysis.user_info, profile());
        assert_eq!(analysis.uploaded_items.len(), 1);

        let bottom = &analysis.uploaded_items[&GarmentCategory::Bottom];
        assert_eq!(bottom.garment.label, "청바지/데님");
        assert_eq!(bottom.pattern.label, "무지");
        assert_eq!(bottom.color_names(), "블루");
        assert_eq!(bottom.image_path.as_deref(), Some("uploads/bottom_photo.png"));
        assert_eq!(
            analysis.recommendation.error.as_deref(),
            Some("API key not configured")
        );
    }

    #[tokio::test]
    async fn test_analyze_outfit_passes_items_to_advisor() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .withf(|prompt, _| prompt.contains("- 아우터: 코트") && prompt.contains("- 하의: 청바지/데님"))
            .times(1)
            .returning(|_, _| {
                Box::pin(async move {
                    Ok(r#"{"recommendations": {"shoes": {"item": "부츠", "color": "블랙", "reason": "보온"}}, "style_direction": "모던", "styling_tips": []}"#.to_string())
                })
            });
        let service: TestService =
            Service::new(classifier(), color_extractor(), Some(llm), upload_store());

        let analysis = service
            .analyze_outfit(AnalyzeOutfitInput {
                profile: profile(),
                images: vec![image(GarmentCategory::Bottom), image(GarmentCategory::Outer)],
            })
            .await
            .unwrap();

        let recommendations = &analysis.recommendation.recommendations;
        assert!(recommendations["outer"].uploaded);
        assert!(recommendations["bottom"].uploaded);
        assert_eq!(recommendations["shoes"].item, "부츠");
    }

    #[tokio::test]
    async fn test_analyze_outfit_propagates_storage_errors() {
        let mut store = MockUploadStore::new();
        store.expect_save().returning(|_| {
            Box::pin(async move { Err(CoreError::Storage("disk full".to_string())) })
        });
        let service: TestService =
            Service::new(MockGarmentClassifier::new(), MockColorExtractor::new(), None, store);

        let result = service
            .analyze_outfit(AnalyzeOutfitInput {
                profile: profile(),
                images: vec![image(GarmentCategory::Outer)],
            })
            .await;

        assert!(matches!(result, Err(CoreError::Storage(_))));
    }

    #[tokio::test]
    async fn test_analyze_outfit_rejects_duplicate_categories() {
        let service: TestService =
            Service::new(classifier(), color_extractor(), None, upload_store());

        let result = service
            .analyze_outfit(AnalyzeOutfitInput {
                profile: profile(),
                images: vec![image(GarmentCategory::Inner1), image(GarmentCategory::Inner1)],
            })
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_re_recommend_only_calls_advisor() {
        let service: TestService = Service::new(
            MockGarmentClassifier::new(),
            MockColorExtractor::new(),
            None,
            MockUploadStore::new(),
        );

        let recommendation = service
            .re_recommend(ReRecommendInput {
                profile: profile(),
                items: UploadedItems::new(),
            })
            .await;

        assert_eq!(recommendation.error.as_deref(), Some("API key not configured"));
    }
}
