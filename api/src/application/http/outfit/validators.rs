use outfitter_core::domain::{styling::entities::UserProfile, wardrobe::entities::UploadedItems};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UserInfoRequest {
    #[validate(length(min = 1, message = "gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, message = "age_group is required"))]
    pub age_group: String,
    #[validate(length(min = 1, message = "body_type is required"))]
    pub body_type: String,
    #[validate(length(min = 1, message = "tpo is required"))]
    pub tpo: String,
}

impl From<UserInfoRequest> for UserProfile {
    fn from(request: UserInfoRequest) -> Self {
        UserProfile {
            gender: request.gender,
            age_group: request.age_group,
            body_type: request.body_type,
            tpo: request.tpo,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct ReRecommendRequest {
    #[validate(nested)]
    pub user_info: UserInfoRequest,
    /// Items as returned by `/api/analyze`, possibly edited by the user.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub uploaded_items: UploadedItems,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_profile_fields_fail_validation() {
        let request: ReRecommendRequest = serde_json::from_value(serde_json::json!({
            "user_info": {"gender": "", "age_group": "20s", "body_type": "slim", "tpo": "campus"},
            "uploaded_items": {}
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.to_string().contains("gender"));
    }

    #[test]
    fn test_edited_items_keep_custom_colors() {
        let request: ReRecommendRequest = serde_json::from_value(serde_json::json!({
            "user_info": {"gender": "male", "age_group": "20s", "body_type": "normal", "tpo": "date"},
            "uploaded_items": {
                "outer": {
                    "type": {"label": "코트", "confidence": 91.2},
                    "pattern": {"label": "체크", "confidence": 80.0},
                    "colors": [{"name": "버건디", "rgb": [128, 0, 32], "percentage": 100.0}]
                }
            }
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        let items = request.uploaded_items;
        let outer = items.values().next().unwrap();
        assert_eq!(outer.color_names(), "버건디");
        assert_eq!(outer.image_path, None);
    }
}
