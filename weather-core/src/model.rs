use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{advisor::Advisory, condition::Classification};

/// First geocoding hit for a city name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
}

impl Location {
    /// "Name, Country", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// Current conditions at a location, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: Option<f64>,
    pub weather_code: i32,
    pub is_day: Option<bool>,
    pub observation_time: Option<DateTime<Utc>>,
}

impl CurrentWeather {
    pub fn observation(&self) -> WeatherObservation {
        WeatherObservation {
            temperature: self.temperature_c,
            wind_speed: self.wind_speed_kmh,
            weather_code: self.weather_code,
        }
    }
}

/// Input shared by the classifier and the advisor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Degrees Celsius.
    pub temperature: f64,
    /// km/h.
    pub wind_speed: f64,
    pub weather_code: i32,
}

/// Everything needed to render one lookup result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: Location,
    pub weather: CurrentWeather,
    pub classification: Classification,
    pub advisory: Advisory,
}
