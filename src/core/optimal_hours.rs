use std::slice;

use chrono::TimeDelta;

use crate::{core::quote::PriceQuote, quantity::rate::KilowattHourRate};

/// Selected quote together with the band it was accepted in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OptimalHour {
    pub quote: PriceQuote,

    /// Percentage points above the cheapest quote, relative to the most expensive one.
    pub threshold: f64,
}

/// Read-only selection of optimal hours, ordered by start time.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct OptimalHours(Vec<OptimalHour>);

impl OptimalHours {
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, OptimalHour> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[OptimalHour] {
        &self.0
    }

    /// Total charging time covered by the selection.
    ///
    /// May fall short of the requested duration when the selector ran out of acceptable hours.
    pub fn duration(&self) -> TimeDelta {
        PriceQuote::DURATION * i32::try_from(self.0.len()).unwrap_or(i32::MAX)
    }

    pub fn total_price(&self) -> KilowattHourRate {
        total_price(&self.0)
    }

    pub fn average_price(&self) -> Option<KilowattHourRate> {
        average_price(&self.0)
    }
}

impl<'a> IntoIterator for &'a OptimalHours {
    type Item = &'a OptimalHour;
    type IntoIter = slice::Iter<'a, OptimalHour>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Accumulates the hours while the selector runs.
#[derive(Default)]
pub struct OptimalHoursBuilder(Vec<OptimalHour>);

impl OptimalHoursBuilder {
    pub fn push(&mut self, quote: PriceQuote, threshold: f64) {
        debug_assert!(
            self.0.iter().all(|hour| hour.quote != quote),
            "the quote has already been selected",
        );
        self.0.push(OptimalHour { quote, threshold });
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Seal the selection, ordering it by start time.
    pub fn build(mut self) -> OptimalHours {
        self.0.sort_by_key(|hour| hour.quote.start);
        OptimalHours(self.0)
    }
}

pub fn total_price(hours: &[OptimalHour]) -> KilowattHourRate {
    hours.iter().map(|hour| hour.quote.price).sum()
}

pub fn average_price(hours: &[OptimalHour]) -> Option<KilowattHourRate> {
    if hours.is_empty() {
        return None;
    }
    #[expect(clippy::cast_precision_loss)]
    let n_hours = hours.len() as f64;
    Some(total_price(hours) / n_hours)
}
