use bon::Builder;
use chrono::TimeDelta;

use crate::{
    core::{
        optimal_hours::{OptimalHours, OptimalHoursBuilder},
        quote::PriceQuote,
    },
    prelude::*,
};

pub const DEFAULT_MAX_THRESHOLD: f64 = 100.0;

/// Picks the cheapest hours in widening price bands until the charging time is covered.
#[derive(Builder)]
pub struct OptimalHourSelector<'a> {
    quotes: &'a [PriceQuote],

    /// Charging time to cover.
    required: TimeDelta,

    /// Bands at or above this many percentage points are never swept.
    #[builder(default = DEFAULT_MAX_THRESHOLD)]
    max_threshold: f64,
}

impl OptimalHourSelector<'_> {
    /// Width of the first band and the step it grows by, in percentage points.
    const THRESHOLD_STEP: f64 = 2.0;

    /// Resolve the optimal hours.
    ///
    /// Every quote is placed on a scale where the most expensive quote is 100.
    /// A quote is accepted once its distance from the cheapest quote on that scale
    /// fits into the current band. Each pass sweeps the remaining quotes cheapest-first,
    /// and stops as soon as the required time is covered. The band then grows by
    /// [`Self::THRESHOLD_STEP`] until the quotes run out, the time is covered,
    /// or the band reaches the maximum threshold.
    ///
    /// The selection may cover less than the required time. Empty input yields empty selection.
    #[instrument(skip_all, fields(n_quotes = self.quotes.len(), required = ?self.required))]
    pub fn resolve(&self) -> OptimalHours {
        let mut remaining = self.quotes.to_vec();
        remaining.sort_by_key(|quote| quote.price);

        let mut selection = OptimalHoursBuilder::default();
        let (Some(cheapest), Some(most_expensive)) = (remaining.first(), remaining.last()) else {
            warn!("no quotes to select from");
            return selection.build();
        };
        let max_price = most_expensive.price;
        let min_percentage = cheapest.price / max_price * 100.0;

        let mut accumulated = TimeDelta::zero();
        let mut threshold = Self::THRESHOLD_STEP;

        while !remaining.is_empty() && accumulated < self.required && threshold < self.max_threshold
        {
            let mut index = 0;
            while index < remaining.len() && accumulated < self.required {
                let distance = remaining[index].price / max_price * 100.0 - min_percentage;
                if distance <= threshold {
                    selection.push(remaining.remove(index), distance);
                    accumulated += PriceQuote::DURATION;
                } else {
                    index += 1;
                }
            }
            debug!(threshold, n_selected = selection.len(), ?accumulated, "swept");
            threshold += Self::THRESHOLD_STEP;
        }

        selection.build()
    }
}
