use std::fmt::Write as _;

use weather_core::{CurrentPanel, ForecastCard, Regions, WeatherDisplay};

/// Terminal front end: keeps the regions in memory and prints them.
///
/// Status changes go to stderr, the rendered widget goes to stdout once the
/// forecast row (always the last write of a successful search) arrives.
#[derive(Debug, Default)]
pub struct TerminalDisplay {
    regions: Regions,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }
}

impl WeatherDisplay for TerminalDisplay {
    fn set_loading(&mut self, visible: bool) {
        if visible && !self.regions.loading {
            eprintln!("Loading weather data...");
        }
        self.regions.set_loading(visible);
    }

    fn set_dimmed(&mut self, dimmed: bool) {
        self.regions.set_dimmed(dimmed);
    }

    fn set_error(&mut self, visible: bool) {
        if visible {
            eprintln!("Could not load weather data. Check the city name and try again.");
        }
        self.regions.set_error(visible);
    }

    fn render_current(&mut self, panel: &CurrentPanel) {
        self.regions.render_current(panel);
    }

    fn render_forecast(&mut self, cards: &[ForecastCard]) {
        self.regions.render_forecast(cards);
        print!("{}", render_text(&self.regions));
    }

    fn set_date_label(&mut self, label: &str) {
        self.regions.set_date_label(label);
    }
}

/// Plain-text rendering of the date label, current panel and forecast row.
pub fn render_text(regions: &Regions) -> String {
    let mut out = String::new();

    if !regions.date_label.is_empty() {
        let _ = writeln!(out, "{}", regions.date_label);
    }

    if let Some(panel) = &regions.current {
        let _ = writeln!(out, "{}  {}  {}", panel.icon.glyph(), panel.city, panel.temperature);
        let _ = writeln!(
            out,
            "   Feels like {}  Humidity {}  Wind {}  Pressure {}",
            panel.feels_like, panel.humidity, panel.wind_speed, panel.pressure
        );
    }

    if !regions.forecast.is_empty() {
        out.push('\n');
        for card in &regions.forecast {
            let _ = writeln!(out, "   {:<10} {}  {}", card.day, card.icon.glyph(), card.temperature);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::Icon;

    #[test]
    fn renders_panel_and_cards() {
        let regions = Regions {
            date_label: "Friday, October 16, 2026".into(),
            current: Some(CurrentPanel {
                city: "Navsari, IN".into(),
                temperature: "31°".into(),
                wind_speed: "3.6 m/s".into(),
                humidity: "62%".into(),
                feels_like: "35°".into(),
                pressure: "1008 hPa".into(),
                icon: Icon::Cloud,
            }),
            forecast: vec![ForecastCard {
                day: "Saturday".into(),
                icon: Icon::Rain,
                temperature: "29°".into(),
            }],
            ..Default::default()
        };

        let text = render_text(&regions);

        assert!(text.starts_with("Friday, October 16, 2026\n"));
        assert!(text.contains("☁  Navsari, IN  31°"));
        assert!(text.contains("Feels like 35°  Humidity 62%  Wind 3.6 m/s  Pressure 1008 hPa"));
        assert!(text.contains("Saturday   🌧  29°"));
    }

    #[test]
    fn empty_regions_render_nothing() {
        assert_eq!(render_text(&Regions::default()), "");
    }
}
