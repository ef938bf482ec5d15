use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    WidgetConfig,
    error::WeatherError,
    model::{CurrentConditions, ForecastSample, LocationQuery},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: WidgetConfig,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: WidgetConfig) -> Self {
        Self { config, http: Client::new() }
    }

    async fn get(&self, endpoint: &str, city: &LocationQuery) -> Result<Response, WeatherError> {
        let url = format!("{}/{endpoint}", self.config.base_url);
        debug!(%url, city = city.as_str(), "requesting OpenWeather");

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        Ok(res)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip_all, fields(city = %city))]
    async fn current(&self, city: &LocationQuery) -> Result<CurrentConditions, WeatherError> {
        let res = self.get("weather", city).await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "current conditions lookup failed");
            return Err(WeatherError::CityNotFound { city: city.to_string(), status });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }

    #[instrument(skip_all, fields(city = %city))]
    async fn forecast(&self, city: &LocationQuery) -> Result<Vec<ForecastSample>, WeatherError> {
        let res = self.get("forecast", city).await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "forecast lookup failed");
            return Err(WeatherError::ForecastUnavailable { city: city.to_string(), status });
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .list
            .into_iter()
            .filter_map(|entry| {
                let Some(timestamp) = DateTime::<Utc>::from_timestamp(entry.dt, 0) else {
                    debug!(dt = entry.dt, "skipping forecast sample with invalid timestamp");
                    return None;
                };

                Some(ForecastSample {
                    timestamp,
                    temperature_c: entry.main.temp,
                    condition: category(&entry.weather),
                })
            })
            .collect())
    }
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        Self {
            city: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            condition: category(&parsed.weather),
        }
    }
}

/// Lower-cased `main` of the first weather entry, empty when there is none.
fn category(weather: &[OwWeather]) -> String {
    weather.first().map(|w| w.main.to_lowercase()).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_response_maps_to_conditions() {
        let json = r#"{
            "name": "Navsari",
            "dt": 1760000000,
            "main": {"temp": 29.4, "feels_like": 33.1, "humidity": 74, "pressure": 1006},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
            "wind": {"speed": 4.12, "deg": 240},
            "sys": {"country": "IN"}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(json).unwrap();
        let current = CurrentConditions::from(parsed);

        assert_eq!(current.city, "Navsari");
        assert_eq!(current.country, "IN");
        assert_eq!(current.humidity_pct, 74);
        assert_eq!(current.pressure_hpa, 1006.0);
        assert_eq!(current.wind_speed_mps, 4.12);
        assert_eq!(current.condition, "rain");
    }

    #[test]
    fn missing_weather_entry_gives_empty_category() {
        assert_eq!(category(&[]), "");
    }

    #[test]
    fn missing_main_block_is_rejected() {
        let json = r#"{"name": "X", "wind": {"speed": 1.0}}"#;
        assert!(serde_json::from_str::<OwCurrentResponse>(json).is_err());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
