use thiserror::Error;

use crate::{
    advisor::advise,
    condition::classify,
    model::WeatherReport,
    provider::{Geocoder, WeatherProvider},
};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The two failure states a user can see.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("City not found!")]
    CityNotFound { city: String },

    #[error("Failed to fetch weather")]
    FetchFailed(#[source] BoxError),
}

impl LookupError {
    fn fetch_failed(err: anyhow::Error) -> Self {
        LookupError::FetchFailed(err.into())
    }
}

/// Geocode `city`, fetch its current weather, then classify and advise.
pub async fn lookup(
    geocoder: &dyn Geocoder,
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<WeatherReport, LookupError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(LookupError::CityNotFound { city: city.to_string() });
    }

    let location = geocoder
        .locate(city)
        .await
        .map_err(LookupError::fetch_failed)?
        .ok_or_else(|| LookupError::CityNotFound { city: city.to_string() })?;

    tracing::debug!(city, resolved = %location.display_name(), "city resolved");

    let weather = provider
        .current_weather(&location)
        .await
        .map_err(LookupError::fetch_failed)?;

    let observation = weather.observation();
    let classification = classify(observation.weather_code);
    let advisory = advise(&observation);

    Ok(WeatherReport { location, weather, classification, advisory })
}
