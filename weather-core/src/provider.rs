use crate::{
    Config, CurrentWeather, Location, provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Resolves a free-text city name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means the service answered but found nothing.
    async fn locate(&self, city: &str) -> anyhow::Result<Option<Location>>;
}

/// Fetches current conditions for a resolved location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, location: &Location) -> anyhow::Result<CurrentWeather>;
}

/// Construct the Open-Meteo client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenMeteoProvider> {
    OpenMeteoProvider::new(config.endpoints.clone(), config.timeout())
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
