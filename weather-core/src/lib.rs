//! Core library for the `weather` lookup widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (current conditions, 5-day forecast)
//! - Icon mapping and per-day forecast selection
//! - The display abstraction and the widget that drives it
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod display;
pub mod error;
pub mod forecast;
pub mod icon;
pub mod model;
pub mod provider;
pub mod widget;

pub use config::{Config, WidgetConfig};
pub use display::{CurrentPanel, ForecastCard, Regions, WeatherDisplay};
pub use error::WeatherError;
pub use icon::Icon;
pub use model::{CurrentConditions, ForecastEntry, ForecastSample, LocationQuery};
pub use provider::WeatherProvider;
pub use widget::{SearchOutcome, WeatherWidget};
