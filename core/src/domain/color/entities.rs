use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// Human readable color bucket attached to a swatch.
///
/// The extractor only ever produces the named variants. `Custom` carries a
/// name a client sent back on re-recommendation so it survives verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorName {
    Black,
    White,
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Navy,
    Purple,
    Pink,
    Brown,
    Beige,
    Khaki,
    Other,
    ExtractionFailed,
    Custom(String),
}

impl ColorName {
    pub const NAMED: [ColorName; 16] = [
        ColorName::Black,
        ColorName::White,
        ColorName::Gray,
        ColorName::Red,
        ColorName::Orange,
        ColorName::Yellow,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Navy,
        ColorName::Purple,
        ColorName::Pink,
        ColorName::Brown,
        ColorName::Beige,
        ColorName::Khaki,
        ColorName::Other,
        ColorName::ExtractionFailed,
    ];

    pub fn display_name(&self) -> &str {
        match self {
            ColorName::Black => "블랙",
            ColorName::White => "화이트",
            ColorName::Gray => "그레이",
            ColorName::Red => "레드",
            ColorName::Orange => "오렌지",
            ColorName::Yellow => "옐로우",
            ColorName::Green => "그린",
            ColorName::Blue => "블루",
            ColorName::Navy => "네이비",
            ColorName::Purple => "퍼플",
            ColorName::Pink => "핑크",
            ColorName::Brown => "브라운",
            ColorName::Beige => "베이지",
            ColorName::Khaki => "카키",
            ColorName::Other => "기타",
            ColorName::ExtractionFailed => "색상 추출 실패",
            ColorName::Custom(name) => name,
        }
    }

    /// Maps a centroid to its bucket.
    ///
    /// Rule order matters: achromatic checks first, then the strictly
    /// dominant channel, then the warm neutral branch, then pink.
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        if r < 50.0 && g < 50.0 && b < 50.0 {
            return ColorName::Black;
        }
        if r > 200.0 && g > 200.0 && b > 200.0 {
            return ColorName::White;
        }
        if (r - g).abs() < 30.0 && (g - b).abs() < 30.0 && (r - b).abs() < 30.0 {
            return ColorName::Gray;
        }

        if r > g && r > b {
            return if g > 100.0 && b < 100.0 {
                ColorName::Orange
            } else if b > g {
                ColorName::Purple
            } else {
                ColorName::Red
            };
        }
        if g > r && g > b {
            return if r > 100.0 {
                ColorName::Yellow
            } else {
                ColorName::Green
            };
        }
        if b > r && b > g {
            return if b > 150.0 && r < 100.0 {
                ColorName::Navy
            } else {
                ColorName::Blue
            };
        }

        if r > b && g > b {
            return if r > 150.0 && g > 120.0 {
                ColorName::Beige
            } else if r > 100.0 && g > 80.0 {
                ColorName::Brown
            } else {
                ColorName::Khaki
            };
        }

        if r > 150.0 && g < 150.0 && b > 100.0 && b < 200.0 {
            return ColorName::Pink;
        }

        ColorName::Other
    }

    fn from_display_name(name: &str) -> Self {
        Self::NAMED
            .iter()
            .find(|candidate| candidate.display_name() == name)
            .cloned()
            .unwrap_or_else(|| ColorName::Custom(name.to_string()))
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for ColorName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for ColorName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ColorName::from_display_name(&name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ColorSwatch {
    #[schema(value_type = String, example = "블루")]
    pub name: ColorName,
    #[schema(value_type = Vec<u8>)]
    pub rgb: [u8; 3],
    /// Share of pixels in this cluster, 0-100 with one decimal.
    pub percentage: f64,
    #[serde(default)]
    pub hex: String,
}

impl ColorSwatch {
    pub fn new(name: ColorName, rgb: [u8; 3], percentage: f64) -> Self {
        Self {
            name,
            rgb,
            percentage: (percentage * 10.0).round() / 10.0,
            hex: format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]),
        }
    }

    /// Returned when the image cannot be decoded at all.
    pub fn extraction_failed() -> Self {
        Self::new(ColorName::ExtractionFailed, [128, 128, 128], 100.0)
    }
}
