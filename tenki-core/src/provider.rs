use crate::{WeatherReading, WeatherRequest, config::Settings, error::WeatherError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, request: &WeatherRequest) -> Result<WeatherReading, WeatherError>;
}

/// Construct the provider described by resolved settings.
pub fn provider_from_settings(settings: &Settings) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    Ok(Box::new(WeatherApiProvider::from_settings(settings)?))
}
