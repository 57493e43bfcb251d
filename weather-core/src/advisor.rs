//! Activity and clothing advice for an observation.
//!
//! Rules are evaluated in order and the first matching one wins. Adverse
//! weather (bad codes or strong wind) always beats the temperature bands.

use serde::Serialize;

use crate::model::WeatherObservation;

/// Wind above this speed (km/h) is treated as adverse.
pub const WIND_THRESHOLD_KMH: f64 = 30.0;

/// Codes that trigger a caution advisory regardless of temperature.
pub const ADVERSE_CODES: [i32; 13] = [45, 48, 51, 53, 55, 61, 63, 65, 80, 81, 82, 95, 99];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    Caution,
    Chilly,
    Mild,
    Warm,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub activity: &'static str,
    pub clothing: &'static str,
}

const CAUTION: Advisory = Advisory {
    kind: AdvisoryKind::Caution,
    activity: "⚠️ Not ideal for outdoor activities today.",
    clothing: "Consider wearing waterproof or warm clothes and take caution!",
};

const CHILLY: Advisory = Advisory {
    kind: AdvisoryKind::Chilly,
    activity: "It's chilly, perfect for a brisk walk!",
    clothing: "Wear a jacket, warm layers, and gloves.",
};

const MILD: Advisory = Advisory {
    kind: AdvisoryKind::Mild,
    activity: "Nice weather for outdoor activities!",
    clothing: "Wear light layers or a hoodie.",
};

const WARM: Advisory = Advisory {
    kind: AdvisoryKind::Warm,
    activity: "Great weather for an adventure!",
    clothing: "T-shirt and comfortable pants or shorts should be fine.",
};

// Only reachable for a NaN temperature.
const MODERATE: Advisory = Advisory {
    kind: AdvisoryKind::Moderate,
    activity: "Weather is moderate.",
    clothing: "Dress comfortably.",
};

type Predicate = fn(&WeatherObservation) -> bool;

const RULES: [(Predicate, Advisory); 4] = [
    (is_adverse, CAUTION),
    (is_chilly, CHILLY),
    (is_mild, MILD),
    (is_warm, WARM),
];

pub fn is_adverse(obs: &WeatherObservation) -> bool {
    ADVERSE_CODES.contains(&obs.weather_code) || obs.wind_speed > WIND_THRESHOLD_KMH
}

fn is_chilly(obs: &WeatherObservation) -> bool {
    obs.temperature <= 10.0
}

fn is_mild(obs: &WeatherObservation) -> bool {
    obs.temperature > 10.0 && obs.temperature <= 20.0
}

fn is_warm(obs: &WeatherObservation) -> bool {
    obs.temperature > 20.0
}

pub fn advise(obs: &WeatherObservation) -> Advisory {
    RULES
        .iter()
        .find(|(applies, _)| applies(obs))
        .map(|(_, advisory)| *advisory)
        .unwrap_or(MODERATE)
}
