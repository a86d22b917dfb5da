use serde_json::{Value, json};

fn item_schema(with_pattern: bool) -> Value {
    let mut properties = json!({
        "item": { "type": "string" },
        "color": { "type": "string" },
        "reason": { "type": "string" }
    });
    let mut required = vec!["item", "color", "reason"];

    if with_pattern {
        properties["pattern"] = json!({ "type": "string" });
        required.push("pattern");
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Returns the JSON schema the advisor reply is constrained to.
pub fn get_recommendation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recommendations": {
                "type": "object",
                "properties": {
                    "outer": item_schema(true),
                    "inner1": item_schema(true),
                    "inner2": item_schema(true),
                    "bottom": item_schema(true),
                    "shoes": item_schema(false)
                }
            },
            "style_direction": { "type": "string" },
            "styling_tips": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["recommendations", "style_direction", "styling_tips"]
    })
}
