use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{classification::labels, wardrobe::entities::GarmentCategory};

pub const UNAVAILABLE_LABEL: &str = "분류 불가 (모델 로드 실패)";
pub const PREPROCESS_FAILED_LABEL: &str = "이미지 처리 실패";
pub const INFERENCE_FAILED_LABEL: &str = "분류 실패";

/// One classification model per garment category plus the shared pattern model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    Outer,
    Inner1,
    Inner2,
    Bottom,
    Pattern,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Outer,
        ModelKind::Inner1,
        ModelKind::Inner2,
        ModelKind::Bottom,
        ModelKind::Pattern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Outer => "outer",
            ModelKind::Inner1 => "inner1",
            ModelKind::Inner2 => "inner2",
            ModelKind::Bottom => "bottom",
            ModelKind::Pattern => "pattern",
        }
    }

    pub fn weight_file(&self) -> String {
        format!("{}_best.onnx", self.as_str())
    }

    /// Labels in training class-index order.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            ModelKind::Outer => labels::OUTER,
            ModelKind::Inner1 => labels::INNER1,
            ModelKind::Inner2 => labels::INNER2,
            ModelKind::Bottom => labels::BOTTOM,
            ModelKind::Pattern => labels::PATTERN,
        }
    }

    /// Label for a predicted index, or a numbered placeholder when out of range.
    pub fn label_for(&self, index: usize) -> String {
        match self.labels().get(index) {
            Some(label) => label.to_string(),
            None if *self == ModelKind::Pattern => format!("패턴_{index}"),
            None => format!("클래스_{index}"),
        }
    }
}

impl From<GarmentCategory> for ModelKind {
    fn from(category: GarmentCategory) -> Self {
        match category {
            GarmentCategory::Outer => ModelKind::Outer,
            GarmentCategory::Inner1 => ModelKind::Inner1,
            GarmentCategory::Inner2 => ModelKind::Inner2,
            GarmentCategory::Bottom => ModelKind::Bottom,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Classification {
    pub label: String,
    /// Percentage with two decimals; 0 for every degraded result.
    #[serde(default)]
    pub confidence: f64,
}

impl Classification {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            confidence: (probability as f64 * 10_000.0).round() / 100.0,
        }
    }

    pub fn unavailable() -> Self {
        Self::sentinel(UNAVAILABLE_LABEL)
    }

    pub fn preprocess_failed() -> Self {
        Self::sentinel(PREPROCESS_FAILED_LABEL)
    }

    pub fn inference_failed() -> Self {
        Self::sentinel(INFERENCE_FAILED_LABEL)
    }

    fn sentinel(label: &str) -> Self {
        Self {
            label: label.to_string(),
            confidence: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_for_in_and_out_of_range() {
        assert_eq!(ModelKind::Bottom.label_for(3), "청바지/데님");
        assert_eq!(ModelKind::Pattern.label_for(4), "무지");
        assert_eq!(ModelKind::Inner1.label_for(7), "클래스_7");
        assert_eq!(ModelKind::Pattern.label_for(6), "패턴_6");
    }

    #[test]
    fn test_label_counts_match_trained_heads() {
        assert_eq!(ModelKind::Outer.labels().len(), 9);
        assert_eq!(ModelKind::Inner1.labels().len(), 4);
        assert_eq!(ModelKind::Inner2.labels().len(), 4);
        assert_eq!(ModelKind::Bottom.labels().len(), 9);
        assert_eq!(ModelKind::Pattern.labels().len(), 6);
    }

    #[test]
    fn test_confidence_is_percentage_with_two_decimals() {
        let classification = Classification::new("코트", 0.912_345);
        assert_eq!(classification.confidence, 91.23);
        assert_eq!(Classification::unavailable().confidence, 0.0);
    }

    #[test]
    fn test_weight_file_names() {
        assert_eq!(ModelKind::Inner2.weight_file(), "inner2_best.onnx");
        assert_eq!(ModelKind::from(GarmentCategory::Outer), ModelKind::Outer);
    }
}
