//! Display regions the widget writes into, and the view models it writes.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{
    icon::Icon,
    model::{CurrentConditions, ForecastEntry, round_temperature},
};

/// Formatted contents of the current-conditions panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPanel {
    pub city: String,
    pub temperature: String,
    pub wind_speed: String,
    pub humidity: String,
    pub feels_like: String,
    pub pressure: String,
    pub icon: Icon,
}

impl From<&CurrentConditions> for CurrentPanel {
    fn from(c: &CurrentConditions) -> Self {
        Self {
            city: format!("{}, {}", c.city, c.country),
            temperature: format!("{}°", round_temperature(c.temperature_c)),
            wind_speed: format!("{} m/s", c.wind_speed_mps),
            humidity: format!("{}%", c.humidity_pct),
            feels_like: format!("{}°", round_temperature(c.feels_like_c)),
            pressure: format!("{} hPa", c.pressure_hpa),
            icon: Icon::for_condition(&c.condition),
        }
    }
}

/// One forecast card: day label, icon, temperature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastCard {
    pub day: String,
    pub icon: Icon,
    pub temperature: String,
}

impl From<&ForecastEntry> for ForecastCard {
    fn from(e: &ForecastEntry) -> Self {
        Self {
            day: e.day_name.clone(),
            icon: Icon::for_condition(&e.condition),
            temperature: format!("{}°", e.temperature),
        }
    }
}

/// US long date, e.g. "Friday, October 16, 2026".
pub fn date_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %-d, %Y").to_string()
}

/// The set of regions a [`crate::WeatherWidget`] owns.
///
/// Implementations only store or draw what they are given; all formatting
/// happens before these methods are called.
pub trait WeatherDisplay: Send {
    fn set_loading(&mut self, visible: bool);

    /// Dim the weather regions while a fetch is in flight.
    fn set_dimmed(&mut self, dimmed: bool);

    fn set_error(&mut self, visible: bool);

    fn render_current(&mut self, panel: &CurrentPanel);

    /// Replace all previously rendered cards.
    fn render_forecast(&mut self, cards: &[ForecastCard]);

    fn set_date_label(&mut self, label: &str);
}

/// In-memory display state. Used directly by tests and wrapped by front ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions {
    pub loading: bool,
    pub dimmed: bool,
    pub error: bool,
    pub current: Option<CurrentPanel>,
    pub forecast: Vec<ForecastCard>,
    pub date_label: String,
}

impl WeatherDisplay for Regions {
    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn set_dimmed(&mut self, dimmed: bool) {
        self.dimmed = dimmed;
    }

    fn set_error(&mut self, visible: bool) {
        self.error = visible;
    }

    fn render_current(&mut self, panel: &CurrentPanel) {
        self.current = Some(panel.clone());
    }

    fn render_forecast(&mut self, cards: &[ForecastCard]) {
        self.forecast = cards.to_vec();
    }

    fn set_date_label(&mut self, label: &str) {
        self.date_label = label.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            city: "Navsari".into(),
            country: "IN".into(),
            temperature_c: 31.5,
            feels_like_c: 35.49,
            humidity_pct: 62,
            wind_speed_mps: 3.6,
            pressure_hpa: 1008.0,
            condition: "light rain and cloud".into(),
        }
    }

    #[test]
    fn current_panel_formats_fields() {
        let panel = CurrentPanel::from(&conditions());

        assert_eq!(panel.city, "Navsari, IN");
        assert_eq!(panel.temperature, "32°");
        assert_eq!(panel.feels_like, "35°");
        assert_eq!(panel.wind_speed, "3.6 m/s");
        assert_eq!(panel.humidity, "62%");
        assert_eq!(panel.pressure, "1008 hPa");
        assert_eq!(panel.icon, Icon::Cloud);
    }

    #[test]
    fn forecast_card_formats_fields() {
        let entry = ForecastEntry {
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            day_name: "Friday".into(),
            temperature: -2,
            condition: "snow".into(),
        };

        let card = ForecastCard::from(&entry);
        assert_eq!(card.day, "Friday");
        assert_eq!(card.temperature, "-2°");
        assert_eq!(card.icon, Icon::Snow);
    }

    #[test]
    fn date_label_uses_long_us_format() {
        let now = Utc.with_ymd_and_hms(2026, 10, 6, 23, 59, 0).unwrap();
        assert_eq!(date_label(&now), "Tuesday, October 6, 2026");
    }

    #[test]
    fn regions_replace_forecast_cards() {
        let mut regions = Regions::default();
        let card = |day: &str| ForecastCard {
            day: day.into(),
            icon: Icon::Clear,
            temperature: "1°".into(),
        };

        regions.render_forecast(&[card("Monday"), card("Tuesday")]);
        regions.render_forecast(&[card("Friday")]);

        assert_eq!(regions.forecast, vec![card("Friday")]);
    }
}
