//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration (Open-Meteo endpoints, timeout, default city)
//! - The Open-Meteo geocoding and current-weather client
//! - Pure weather-code classification and activity/clothing advice
//! - The lookup flow tying them together
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod advisor;
pub mod condition;
pub mod config;
pub mod lookup;
pub mod model;
pub mod provider;

pub use advisor::{Advisory, AdvisoryKind, advise};
pub use condition::{Classification, ColorCategory, ConditionEntry, classify};
pub use config::{Config, Endpoints};
pub use lookup::{LookupError, lookup};
pub use model::{CurrentWeather, Location, WeatherObservation, WeatherReport};
pub use provider::{Geocoder, WeatherProvider, open_meteo::OpenMeteoProvider, provider_from_config};
