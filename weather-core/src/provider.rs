use crate::{
    WidgetConfig,
    error::WeatherError,
    model::{CurrentConditions, ForecastSample, LocationQuery},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Read-only source of weather data for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &LocationQuery) -> Result<CurrentConditions, WeatherError>;

    /// The 5-day forecast as 3-hour samples, in the order the API returned them.
    async fn forecast(&self, city: &LocationQuery) -> Result<Vec<ForecastSample>, WeatherError>;
}

/// Construct the OpenWeather provider from a resolved widget configuration.
pub fn provider_from_config(config: &WidgetConfig) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(config.clone()))
}
