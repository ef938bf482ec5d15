//! The weather widget: one search box, two sequential lookups, two renders.

use std::{
    fmt::Display,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{Local, TimeZone, Utc};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    WidgetConfig,
    display::{CurrentPanel, ForecastCard, WeatherDisplay, date_label},
    error::WeatherError,
    forecast::daily_forecast,
    model::{CurrentConditions, ForecastSample, LocationQuery},
    provider::{WeatherProvider, provider_from_config},
};

/// How often the date label is refreshed.
pub const DATE_REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// What happened to a single search.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Input was empty after trimming; nothing was requested.
    Skipped,
    Rendered,
    /// Shown to the user as the error banner.
    Failed(WeatherError),
    /// A newer search started while this one was in flight; its result was dropped.
    Superseded,
}

impl SearchOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SearchOutcome::Rendered)
    }
}

/// Owns the display regions and drives the fetch cycle.
///
/// Only the latest search may touch the display. Each fetch cycle takes a
/// generation number; results of older generations are discarded and the
/// loading state is left to the newest cycle.
#[derive(Debug)]
pub struct WeatherWidget<D, Tz: TimeZone = Local> {
    provider: Box<dyn WeatherProvider>,
    display: Mutex<D>,
    tz: Tz,
    generation: AtomicU64,
}

impl<D: WeatherDisplay> WeatherWidget<D, Local> {
    pub fn new(provider: Box<dyn WeatherProvider>, display: D) -> Self {
        Self::with_timezone(provider, display, Local)
    }

    pub fn from_config(config: &WidgetConfig, display: D) -> Self {
        Self::new(provider_from_config(config), display)
    }
}

impl<D, Tz> WeatherWidget<D, Tz>
where
    D: WeatherDisplay,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Dates and hours of forecast samples are interpreted in `tz`.
    pub fn with_timezone(provider: Box<dyn WeatherProvider>, display: D, tz: Tz) -> Self {
        Self { provider, display: Mutex::new(display), tz, generation: AtomicU64::new(0) }
    }

    /// Run `f` against the display regions.
    pub fn with_display<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        let mut display = self.display.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut display)
    }

    /// Initial load: set the date label and show `default_city`.
    pub async fn start(&self, default_city: &str) -> SearchOutcome {
        self.refresh_date();
        self.search(default_city).await
    }

    /// Search for the city typed by the user. Blank input is ignored.
    pub async fn search(&self, input: &str) -> SearchOutcome {
        let Some(city) = LocationQuery::parse(input) else {
            debug!("ignoring empty search");
            return SearchOutcome::Skipped;
        };

        self.fetch_cycle(&city).await
    }

    #[instrument(skip_all, fields(city = %city))]
    async fn fetch_cycle(&self, city: &LocationQuery) -> SearchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::show(self, generation);

        let result = self.fetch(city).await;

        if !self.is_current(generation) {
            warn!(generation, "discarding result of superseded search");
            return SearchOutcome::Superseded;
        }

        match result {
            Ok((current, samples)) => {
                let panel = CurrentPanel::from(&current);
                let cards: Vec<ForecastCard> =
                    daily_forecast(&samples, self.tz.clone()).iter().map(ForecastCard::from).collect();

                self.with_display(|d| {
                    d.render_current(&panel);
                    d.render_forecast(&cards);
                });

                info!(temperature = %panel.temperature, cards = cards.len(), "rendered weather");
                SearchOutcome::Rendered
            }
            Err(err) => {
                error!(error = %err, "Error fetching weather data");
                self.with_display(|d| d.set_error(true));
                SearchOutcome::Failed(err)
            }
        }
    }

    /// Both lookups must succeed before anything is rendered.
    async fn fetch(
        &self,
        city: &LocationQuery,
    ) -> Result<(CurrentConditions, Vec<ForecastSample>), WeatherError> {
        let current = self.provider.current(city).await?;
        let forecast = self.provider.forecast(city).await?;
        Ok((current, forecast))
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Write today's date into the date label.
    pub fn refresh_date(&self) {
        let now = Utc::now().with_timezone(&self.tz);
        let label = date_label(&now);
        self.with_display(|d| d.set_date_label(&label));
    }

    /// Refresh the date label every `period`, forever. Touches nothing else.
    pub async fn run_date_refresh(&self, period: Duration) {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.refresh_date();
        }
    }
}

/// Shows the loading state for one fetch cycle and clears it on drop, on
/// every exit path, as long as no newer cycle has taken over.
struct LoadingGuard<'a, D, Tz>
where
    D: WeatherDisplay,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    widget: &'a WeatherWidget<D, Tz>,
    generation: u64,
}

impl<'a, D, Tz> LoadingGuard<'a, D, Tz>
where
    D: WeatherDisplay,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn show(widget: &'a WeatherWidget<D, Tz>, generation: u64) -> Self {
        widget.with_display(|d| {
            d.set_loading(true);
            d.set_dimmed(true);
            d.set_error(false);
        });
        Self { widget, generation }
    }
}

impl<D, Tz> Drop for LoadingGuard<'_, D, Tz>
where
    D: WeatherDisplay,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn drop(&mut self) {
        if self.widget.is_current(self.generation) {
            self.widget.with_display(|d| {
                d.set_loading(false);
                d.set_dimmed(false);
            });
        }
    }
}
