use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Longest slice of an unparseable reply echoed back to the client.
pub const RAW_RESPONSE_LIMIT: usize = 1000;

pub const UPLOADED_REASON: &str = "사용자가 업로드한 아이템";

/// Who the outfit is for. Values are free-form and only required to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub gender: String,
    pub age_group: String,
    pub body_type: String,
    /// Time, place and occasion the outfit is meant for.
    pub tpo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemRecommendation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub item: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub color: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub uploaded: bool,
}

/// Styling advice for a whole outfit.
///
/// Failures of the remote advisor are reported in-band: `error`, `message`,
/// `raw_response` and `parse_error` are set and `recommendations` stays empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    /// Keyed by slot: outer, inner1, inner2, bottom and shoes.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub recommendations: BTreeMap<String, ItemRecommendation>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub style_direction: String,
    #[serde(default)]
    pub styling_tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl Recommendation {
    pub fn not_configured() -> Self {
        Self {
            error: Some("API key not configured".to_string()),
            message: Some("Gemini API 키가 설정되지 않았습니다.".to_string()),
            style_direction: "API 키를 설정하면 AI 추천을 받을 수 있습니다.".to_string(),
            ..Self::default()
        }
    }

    pub fn quota_exceeded() -> Self {
        Self {
            error: Some("quota_exceeded".to_string()),
            message: Some(
                "⚠️ Gemini API 무료 할당량을 초과했습니다. 24시간 후 다시 시도하거나 새 API 키를 발급받아주세요."
                    .to_string(),
            ),
            style_direction: "Gemini API 할당량 초과로 AI 추천을 제공할 수 없습니다. ML 모델 분석 결과는 정상적으로 표시됩니다."
                .to_string(),
            ..Self::default()
        }
    }

    pub fn remote_error(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            message: Some("코디 추천을 생성할 수 없습니다.".to_string()),
            style_direction: format!("오류 발생: {error}"),
            error: Some(error),
            ..Self::default()
        }
    }

    /// Reply contained no JSON object at all.
    pub fn not_json(raw: &str) -> Self {
        Self {
            style_direction: "AI가 JSON 형식으로 응답하지 않았습니다. 다시 시도해주세요.".to_string(),
            raw_response: Some(truncate_chars(raw, RAW_RESPONSE_LIMIT)),
            ..Self::default()
        }
    }

    /// Reply contained something object-shaped that did not decode.
    pub fn parse_failed(raw: &str, error: impl Into<String>) -> Self {
        Self {
            style_direction: "응답 파싱 중 오류가 발생했습니다.".to_string(),
            parse_error: Some(error.into()),
            raw_response: Some(truncate_chars(raw, RAW_RESPONSE_LIMIT)),
            ..Self::default()
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some() || self.raw_response.is_some()
    }
}

pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Flattens a loosely typed JSON value into display text.
pub(crate) fn value_to_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        serde_json::Value::Array(values) => values
            .into_iter()
            .filter(|value| !value.is_null())
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Accepts a string, a list of strings, a number or null where text is expected.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    serde_json::Value::deserialize(deserializer).map(value_to_text)
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok((!value.is_null()).then(|| value_to_text(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_recommendation_accepts_loose_shapes() {
        let item: ItemRecommendation = serde_json::from_str(
            r#"{"item": "첼시부츠", "color": ["블랙", "브라운"], "reason": null}"#,
        )
        .unwrap();

        assert_eq!(item.item, "첼시부츠");
        assert_eq!(item.color, "블랙, 브라운");
        assert_eq!(item.reason, "");
        assert_eq!(item.pattern, None);
        assert!(!item.uploaded);

        let numbered: ItemRecommendation =
            serde_json::from_str(r#"{"item": "코트", "pattern": 3}"#).unwrap();
        assert_eq!(numbered.pattern.as_deref(), Some("3"));
    }

    #[test]
    fn test_degraded_constructors() {
        let not_configured = Recommendation::not_configured();
        assert_eq!(not_configured.error.as_deref(), Some("API key not configured"));
        assert!(not_configured.recommendations.is_empty());
        assert!(not_configured.styling_tips.is_empty());

        let remote = Recommendation::remote_error("boom");
        assert_eq!(remote.style_direction, "오류 발생: boom");
        assert!(remote.is_degraded());

        let raw = "가".repeat(RAW_RESPONSE_LIMIT + 50);
        let not_json = Recommendation::not_json(&raw);
        assert_eq!(not_json.raw_response.unwrap().chars().count(), RAW_RESPONSE_LIMIT);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let value = serde_json::to_value(Recommendation::default()).unwrap();
        assert!(value.get("error").is_none());
        assert!(value.get("raw_response").is_none());
        assert_eq!(value["recommendations"], serde_json::json!({}));
    }
}
