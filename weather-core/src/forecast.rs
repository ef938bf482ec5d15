//! Day selection over the 3-hourly forecast series.
//!
//! The upstream API returns roughly 40 samples spanning five days. Each card
//! shows one representative sample per calendar date: the first sample at or
//! after local noon when there is one, otherwise the first sample of the date.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike};

use crate::model::{ForecastEntry, ForecastSample, round_temperature};

/// Number of forecast cards the widget shows.
pub const MAX_DAYS: usize = 5;

/// Local hour from which a sample counts as representative of its day.
pub const MIDDAY_HOUR: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Preferred,
    Fallback,
}

/// Lazy, bounded sequence of at most [`MAX_DAYS`] entries, one per local date.
///
/// The first pass only accepts samples matching the `preferred` predicate; if
/// it runs out of input before [`MAX_DAYS`] entries exist, a second pass
/// rescans from the start and accepts any sample whose date is still free.
#[derive(Debug)]
pub struct DailyPicks<'a, Tz: TimeZone, P> {
    samples: &'a [ForecastSample],
    tz: Tz,
    preferred: P,
    seen: HashSet<NaiveDate>,
    pass: Pass,
    cursor: usize,
    emitted: usize,
}

/// Pick one sample per local calendar date, preferring samples where `preferred` holds.
pub fn pick_daily<Tz, P>(samples: &[ForecastSample], tz: Tz, preferred: P) -> DailyPicks<'_, Tz, P>
where
    Tz: TimeZone,
    P: Fn(&DateTime<Tz>) -> bool,
{
    DailyPicks {
        samples,
        tz,
        preferred,
        seen: HashSet::with_capacity(MAX_DAYS),
        pass: Pass::Preferred,
        cursor: 0,
        emitted: 0,
    }
}

impl<Tz, P> Iterator for DailyPicks<'_, Tz, P>
where
    Tz: TimeZone,
    P: Fn(&DateTime<Tz>) -> bool,
{
    type Item = ForecastEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while self.emitted < MAX_DAYS {
            let Some(sample) = self.samples.get(self.cursor) else {
                match self.pass {
                    Pass::Preferred => {
                        self.pass = Pass::Fallback;
                        self.cursor = 0;
                        continue;
                    }
                    Pass::Fallback => return None,
                }
            };
            self.cursor += 1;

            let local = sample.timestamp.with_timezone(&self.tz);
            let date = local.date_naive();

            if self.seen.contains(&date) {
                continue;
            }
            if self.pass == Pass::Preferred && !(self.preferred)(&local) {
                continue;
            }

            self.seen.insert(date);
            self.emitted += 1;

            return Some(ForecastEntry {
                date,
                day_name: day_name(date),
                temperature: round_temperature(sample.temperature_c),
                condition: sample.condition.to_lowercase(),
            });
        }

        None
    }
}

/// True for samples at or after local noon.
pub fn is_midday_or_later<Tz: TimeZone>(local: &DateTime<Tz>) -> bool {
    local.hour() >= MIDDAY_HOUR
}

/// The forecast row: up to [`MAX_DAYS`] entries with distinct dates, ascending.
pub fn daily_forecast<Tz: TimeZone>(samples: &[ForecastSample], tz: Tz) -> Vec<ForecastEntry> {
    let mut entries: Vec<_> = pick_daily(samples, tz, is_midday_or_later::<Tz>).collect();
    entries.sort_by_key(|e| e.date);
    entries
}

/// Full English weekday name, e.g. "Monday".
pub fn day_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}
