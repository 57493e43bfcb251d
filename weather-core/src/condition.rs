//! Weather code classification.
//!
//! Maps an Open-Meteo (WMO-derived) weather code to a short description, an
//! icon and a coarse colour category used to tint the result card. Unknown
//! codes are not an error: they yield an empty description/icon and the
//! [`ColorCategory::Unknown`] bucket.

use serde::Serialize;

/// One row of the known-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionEntry {
    pub code: i32,
    pub description: &'static str,
    pub icon: &'static str,
}

const fn entry(code: i32, description: &'static str, icon: &'static str) -> ConditionEntry {
    ConditionEntry { code, description, icon }
}

const CONDITIONS: [ConditionEntry; 20] = [
    entry(0, "Clear sky", "☀️"),
    entry(1, "Mainly clear", "🌤️"),
    entry(2, "Partly cloudy", "⛅"),
    entry(3, "Overcast", "☁️"),
    entry(45, "Fog", "🌫️"),
    entry(48, "Depositing rime fog", "🌫️"),
    entry(51, "Drizzle: Light", "🌦️"),
    entry(53, "Drizzle: Moderate", "🌦️"),
    entry(55, "Drizzle: Dense", "🌦️"),
    entry(61, "Rain: Slight", "🌧️"),
    entry(63, "Rain: Moderate", "🌧️"),
    entry(65, "Rain: Heavy", "🌧️"),
    entry(71, "Snow: Slight", "🌨️"),
    entry(73, "Snow: Moderate", "🌨️"),
    entry(75, "Snow: Heavy", "🌨️"),
    entry(80, "Rain showers: Slight", "🌦️"),
    entry(81, "Rain showers: Moderate", "🌦️"),
    entry(82, "Rain showers: Violent", "🌧️"),
    entry(95, "Thunderstorm: Slight or moderate", "⛈️"),
    entry(99, "Thunderstorm: Heavy hail", "⛈️"),
];

/// Coarse visual bucket for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Clear,
    Overcast,
    Precipitation,
    Snow,
    Storm,
    Unknown,
}

impl ColorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Clear => "clear",
            ColorCategory::Overcast => "overcast",
            ColorCategory::Precipitation => "precipitation",
            ColorCategory::Snow => "snow",
            ColorCategory::Storm => "storm",
            ColorCategory::Unknown => "unknown",
        }
    }

    /// Presentation colour token (a CSS utility class) for the card background.
    pub fn color_token(&self) -> &'static str {
        match self {
            ColorCategory::Clear => "bg-yellow-200",
            ColorCategory::Overcast => "bg-gray-300",
            ColorCategory::Precipitation => "bg-blue-200",
            ColorCategory::Snow => "bg-blue-100",
            ColorCategory::Storm => "bg-gray-500",
            ColorCategory::Unknown => "bg-white/90",
        }
    }

    pub const fn all() -> &'static [ColorCategory] {
        &[
            ColorCategory::Clear,
            ColorCategory::Overcast,
            ColorCategory::Precipitation,
            ColorCategory::Snow,
            ColorCategory::Storm,
            ColorCategory::Unknown,
        ]
    }
}

impl std::fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Checked top to bottom; anything left over is `Unknown`.
const BUCKETS: [(ColorCategory, &[i32]); 5] = [
    (ColorCategory::Clear, &[0, 1, 2]),
    (ColorCategory::Overcast, &[3, 45, 48]),
    (ColorCategory::Precipitation, &[51, 53, 55, 61, 63, 65, 80, 81, 82]),
    (ColorCategory::Snow, &[71, 73, 75]),
    (ColorCategory::Storm, &[95, 99]),
];

/// Result of [`classify`]. Description and icon are empty for unknown codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub description: &'static str,
    pub icon: &'static str,
    pub color: ColorCategory,
}

/// Exact-match lookup in the known-code table.
pub fn lookup_condition(code: i32) -> Option<&'static ConditionEntry> {
    CONDITIONS.iter().find(|entry| entry.code == code)
}

/// Every known condition, in ascending code order.
pub fn conditions() -> impl Iterator<Item = &'static ConditionEntry> {
    CONDITIONS.iter()
}

pub fn color_category(code: i32) -> ColorCategory {
    BUCKETS
        .iter()
        .find(|(_, codes)| codes.contains(&code))
        .map(|(category, _)| *category)
        .unwrap_or(ColorCategory::Unknown)
}

pub fn classify(code: i32) -> Classification {
    let (description, icon) = lookup_condition(code)
        .map(|entry| (entry.description, entry.icon))
        .unwrap_or(("", ""));

    Classification { description, icon, color: color_category(code) }
}
