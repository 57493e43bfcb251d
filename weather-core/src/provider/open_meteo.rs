use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    config::Endpoints,
    model::{CurrentWeather, Location},
    provider::{Geocoder, WeatherProvider, truncate_body},
};

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoints: Endpoints,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { endpoints, http })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        what: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let res = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        tracing::debug!(what, %status, bytes = body.len(), "Open-Meteo response");

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse Open-Meteo {what} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    // Omitted entirely when nothing matches.
    #[serde(default)]
    results: Vec<OmPlace>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrentWeather,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: Option<f64>,
    weathercode: i32,
    is_day: Option<u8>,
    time: Option<String>,
}

impl From<OmPlace> for Location {
    fn from(place: OmPlace) -> Self {
        Location {
            name: place.name,
            country: place.country,
            latitude: place.latitude,
            longitude: place.longitude,
            timezone: place.timezone,
        }
    }
}

impl From<OmCurrentWeather> for CurrentWeather {
    fn from(cw: OmCurrentWeather) -> Self {
        CurrentWeather {
            temperature_c: cw.temperature,
            wind_speed_kmh: cw.windspeed,
            wind_direction_deg: cw.winddirection,
            weather_code: cw.weathercode,
            is_day: cw.is_day.map(|d| d != 0),
            observation_time: cw.time.as_deref().and_then(parse_observation_time),
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoProvider {
    async fn locate(&self, city: &str) -> Result<Option<Location>> {
        tracing::debug!(city, url = %self.endpoints.geocoding_url, "geocoding");

        let request = self
            .http
            .get(&self.endpoints.geocoding_url)
            .query(&[("name", city), ("count", "1")]);

        let parsed: OmGeocodingResponse = self.get_json("geocoding", request).await?;

        Ok(parsed.results.into_iter().next().map(Location::from))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current_weather(&self, location: &Location) -> Result<CurrentWeather> {
        tracing::debug!(
            lat = location.latitude,
            lon = location.longitude,
            url = %self.endpoints.forecast_url,
            "fetching current weather"
        );

        let request = self
            .http
            .get(&self.endpoints.forecast_url)
            .query(&[("latitude", location.latitude), ("longitude", location.longitude)])
            .query(&[("current_weather", "true")]);

        let parsed: OmForecastResponse = self.get_json("forecast", request).await?;

        Ok(parsed.current_weather.into())
    }
}

/// Open-Meteo reports `current_weather.time` in GMT as `YYYY-MM-DDTHH:MM`.
fn parse_observation_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|ndt| ndt.and_utc())
        .map_err(|e| tracing::warn!(raw, error = %e, "unparseable observation time"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    async fn provider_for(server: &MockServer) -> OpenMeteoProvider {
        let endpoints = Endpoints {
            geocoding_url: format!("{}/v1/search", server.uri()),
            forecast_url: format!("{}/v1/forecast", server.uri()),
        };
        OpenMeteoProvider::new(endpoints, Duration::from_secs(5)).expect("client builds")
    }

    fn berlin() -> Location {
        Location {
            name: "Berlin".into(),
            country: Some("Germany".into()),
            latitude: 52.52,
            longitude: 13.41,
            timezone: Some("Europe/Berlin".into()),
        }
    }

    #[tokio::test]
    async fn locate_takes_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Berlin"))
            .and(query_param("count", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{
                    "id": 2950159,
                    "name": "Berlin",
                    "latitude": 52.52,
                    "longitude": 13.41,
                    "country": "Germany",
                    "timezone": "Europe/Berlin"
                }],
                "generationtime_ms": 0.7
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let location = provider.locate("Berlin").await.expect("request succeeds");

        assert_eq!(location, Some(berlin()));
    }

    #[tokio::test]
    async fn locate_without_results_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.3 })),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        assert_eq!(provider.locate("Atlantis").await.expect("request succeeds"), None);
    }

    #[tokio::test]
    async fn locate_with_empty_results_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        assert_eq!(provider.locate("Atlantis").await.expect("request succeeds"), None);
    }

    #[tokio::test]
    async fn locate_surfaces_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.locate("Berlin").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("geocoding"));
        assert!(msg.contains("500"));
        assert!(msg.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn current_weather_is_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "52.52"))
            .and(query_param("longitude", "13.41"))
            .and(query_param("current_weather", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": 52.52,
                "longitude": 13.419998,
                "current_weather": {
                    "time": "2024-05-01T12:00",
                    "interval": 900,
                    "temperature": 17.4,
                    "windspeed": 11.2,
                    "winddirection": 250,
                    "is_day": 1,
                    "weathercode": 3
                }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let weather = provider.current_weather(&berlin()).await.expect("request succeeds");

        assert_eq!(weather.temperature_c, 17.4);
        assert_eq!(weather.wind_speed_kmh, 11.2);
        assert_eq!(weather.wind_direction_deg, Some(250.0));
        assert_eq!(weather.weather_code, 3);
        assert_eq!(weather.is_day, Some(true));

        let time = weather.observation_time.expect("time parsed");
        assert_eq!((time.year(), time.month(), time.day()), (2024, 5, 1));
        assert_eq!((time.hour(), time.minute()), (12, 0));
    }

    #[tokio::test]
    async fn current_weather_rejects_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "current_weather": {} })),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.current_weather(&berlin()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse Open-Meteo forecast JSON"));
    }

    #[test]
    fn observation_time_formats() {
        assert!(parse_observation_time("2024-05-01T12:00").is_some());
        assert!(parse_observation_time("2024-05-01T12:00:30").is_some());
        assert!(parse_observation_time("yesterday").is_none());
    }
}
