use crate::domain::{
    styling::entities::UserProfile,
    wardrobe::entities::{GarmentCategory, UploadedItems},
};

const UNKNOWN: &str = "정보 없음";

/// Renders the stylist instruction sent to the remote model.
pub fn build_prompt(profile: &UserProfile, items: &UploadedItems) -> String {
    let mut owned = Vec::new();
    let mut missing = Vec::new();

    for category in GarmentCategory::ALL {
        match items.get(&category) {
            Some(item) => {
                let colors = if item.colors.is_empty() {
                    UNKNOWN.to_string()
                } else {
                    item.color_names()
                };
                owned.push(format!(
                    "- {}: {} / 색상: {} / 무늬: {}",
                    category.display_name(),
                    non_empty(&item.garment.label),
                    colors,
                    non_empty(&item.pattern.label),
                ));
            }
            None => missing.push(category.display_name()),
        }
    }

    let missing = missing.join(", ");

    format!(
        "
당신은 대학생을 위한 전문 패션 스타일리스트입니다.
다음 정보를 바탕으로 겨울 코디를 추천해주세요.

**사용자 정보:**
- 성별: {gender}
- 연령대: {age_group}
- 체형: {body_type}
- TPO (상황): {tpo}

**현재 가지고 있는 옷:**
{owned}

**추천이 필요한 아이템:**
{missing}

**요청사항:**
1. 위의 업로드된 옷들과 잘 어울리는 {missing}를 구체적으로 추천해주세요.
2. 전체 코디에 어울리는 신발을 추천해주세요 (스니커즈, 부츠, 로퍼 등).
3. 사용자의 체형({body_type})을 고려하여 가장 잘 어울리는 핏과 스타일을 추천해주세요:
   - 슬림: 레이어드와 볼륨감으로 균형을 맞추세요
   - 보통: 다양한 스타일 자유롭게 소화 가능
   - 건장/근육질: 넉넉한 핏과 테일러드 아이템으로 스타일리시하게
   - 통통: 세로 라인 강조, 오버핏으로 편안하면서 세련되게
4. 각 추천 아이템(신발 포함)에 대해 다음을 포함해주세요:
   - 아이템 종류 (예: 청바지, 코트, 첼시부츠 등)
   - 추천 색상 (구체적인 색상명)
   - 추천 무늬/패턴
   - 추천 이유 (체형과 TPO를 고려한 이유)
5. 전체 코디의 스타일 방향성을 설명해주세요.
6. 실용적인 스타일링 팁 3-5개를 제공해주세요 (레이어드, 액세서리, 컬러 매칭 등).
7. 대학생에게 어울리고 {tpo} 상황에 적절한 실용적인 추천을 해주세요.

**출력 형식:**
다음 JSON 형식으로 답변해주세요:
{{
  \"recommendations\": {{
    \"outer\": {{\"item\": \"...\", \"color\": \"...\", \"pattern\": \"...\", \"reason\": \"...\"}},
    \"inner1\": {{\"item\": \"...\", \"color\": \"...\", \"pattern\": \"...\", \"reason\": \"...\"}},
    \"inner2\": {{\"item\": \"...\", \"color\": \"...\", \"pattern\": \"...\", \"reason\": \"...\"}},
    \"bottom\": {{\"item\": \"...\", \"color\": \"...\", \"pattern\": \"...\", \"reason\": \"...\"}},
    \"shoes\": {{\"item\": \"...\", \"color\": \"...\", \"reason\": \"...\"}}
  }},
  \"style_direction\": \"전체 코디 스타일 설명 (컨셉, 무드, 특징 등)\",
  \"styling_tips\": [\"실용적인 스타일링 팁1\", \"팁2\", \"팁3\", \"팁4\", \"팁5\"]
}}

이미 업로드된 아이템은 그대로 유지하고, 누락된 아이템만 추천해주세요.
",
        gender = profile.gender,
        age_group = profile.age_group,
        body_type = profile.body_type,
        tpo = profile.tpo,
        owned = owned.join("\n"),
        missing = missing,
    )
}

fn non_empty(label: &str) -> &str {
    if label.trim().is_empty() { UNKNOWN } else { label }
}
