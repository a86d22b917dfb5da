use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::domain::{
    styling::entities::{
        ItemRecommendation, Recommendation, UPLOADED_REASON, truncate_chars, value_to_text,
    },
    wardrobe::entities::UploadedItems,
};

/// Parses a free-text model reply into a [`Recommendation`].
///
/// Never fails: replies without a decodable JSON object come back degraded
/// with the raw text attached. Malformed slots or tips are dropped one by one.
/// Uploaded categories always carry ground truth.
pub fn parse_recommendation(reply: &str, uploaded: &UploadedItems) -> Recommendation {
    let body = strip_code_fence(reply.trim());

    let Some(json_text) = extract_json_object(body) else {
        warn!(reply = %truncate_chars(body, 500), "Advisor reply contains no JSON object");
        return Recommendation::not_json(body);
    };

    let mut fields = match serde_json::from_str::<Value>(json_text) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => return Recommendation::parse_failed(body, "reply is not a JSON object"),
        Err(e) => {
            warn!(error = %e, reply = %truncate_chars(body, 500), "Failed to parse advisor reply");
            return Recommendation::parse_failed(body, e.to_string());
        }
    };

    let mut recommendation = Recommendation {
        recommendations: fields
            .remove("recommendations")
            .map(parse_slots)
            .unwrap_or_default(),
        style_direction: fields
            .remove("style_direction")
            .map(value_to_text)
            .unwrap_or_default(),
        styling_tips: fields
            .remove("styling_tips")
            .map(parse_tips)
            .unwrap_or_default(),
        ..Recommendation::default()
    };

    backfill_uploaded(&mut recommendation, uploaded);
    recommendation
}

fn parse_slots(value: Value) -> BTreeMap<String, ItemRecommendation> {
    let Value::Object(slots) = value else {
        warn!("Advisor reply has non-object recommendations");
        return BTreeMap::new();
    };

    slots
        .into_iter()
        .filter_map(|(slot, item)| {
            match serde_json::from_value::<ItemRecommendation>(item) {
                Ok(item) => Some((slot, ItemRecommendation { uploaded: false, ..item })),
                Err(e) => {
                    warn!(slot = %slot, error = %e, "Dropping malformed recommendation slot");
                    None
                }
            }
        })
        .collect()
}

fn parse_tips(value: Value) -> Vec<String> {
    match value {
        Value::Array(tips) => tips
            .into_iter()
            .filter(|tip| !tip.is_null())
            .map(value_to_text)
            .filter(|tip| !tip.is_empty())
            .collect(),
        Value::Null => Vec::new(),
        tip => vec![value_to_text(tip)],
    }
}

/// Drops a surrounding ```json (or bare ```) fence when present.
pub fn strip_code_fence(text: &str) -> &str {
    let inner = if let Some((_, rest)) = text.split_once("```json") {
        rest
    } else if let Some((_, rest)) = text.split_once("```") {
        rest
    } else {
        return text;
    };

    inner.split("```").next().unwrap_or(inner).trim()
}

/// Slice from the first `{` to the last `}` inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Overwrites uploaded categories with what was actually observed.
pub fn backfill_uploaded(recommendation: &mut Recommendation, uploaded: &UploadedItems) {
    for (category, item) in uploaded {
        recommendation.recommendations.insert(
            category.as_str().to_string(),
            ItemRecommendation {
                item: item.garment.label.clone(),
                color: item.color_names(),
                pattern: Some(item.pattern.label.clone()),
                reason: UPLOADED_REASON.to_string(),
                uploaded: true,
            },
        );
    }
}
