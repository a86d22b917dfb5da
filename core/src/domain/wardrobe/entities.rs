use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    classification::entities::Classification,
    color::entities::ColorSwatch,
    common::entities::app_errors::CoreError,
};

/// Upload slots of an outfit, in layering order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum GarmentCategory {
    Outer,
    Inner1,
    Inner2,
    Bottom,
}

impl GarmentCategory {
    pub const ALL: [GarmentCategory; 4] = [
        GarmentCategory::Outer,
        GarmentCategory::Inner1,
        GarmentCategory::Inner2,
        GarmentCategory::Bottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentCategory::Outer => "outer",
            GarmentCategory::Inner1 => "inner1",
            GarmentCategory::Inner2 => "inner2",
            GarmentCategory::Bottom => "bottom",
        }
    }

    /// Name used when talking to the stylist model.
    pub fn display_name(&self) -> &'static str {
        match self {
            GarmentCategory::Outer => "아우터",
            GarmentCategory::Inner1 => "이너1 (겉 상의)",
            GarmentCategory::Inner2 => "이너2 (속 상의)",
            GarmentCategory::Bottom => "하의",
        }
    }
}

impl fmt::Display for GarmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GarmentCategory {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        GarmentCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| CoreError::Invalid(format!("unknown garment category: {value}")))
    }
}

/// Analysis of one uploaded garment photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadedItem {
    #[serde(rename = "type")]
    pub garment: Classification,
    pub pattern: Classification,
    /// Ordered by descending share.
    pub colors: Vec<ColorSwatch>,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl UploadedItem {
    pub fn color_names(&self) -> String {
        self.colors
            .iter()
            .map(|swatch| swatch.name.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub type UploadedItems = BTreeMap<GarmentCategory, UploadedItem>;

/// Raw photo received for a category, before it is written to disk.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub category: GarmentCategory,
    pub filename: String,
    pub data: bytes::Bytes,
}
