use chrono::{DateTime, Local, TimeDelta};

use crate::quantity::rate::KilowattHourRate;

/// Electricity price for one hour.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PriceQuote {
    /// Inclusive.
    pub start: DateTime<Local>,

    /// Inclusive, conventionally the last second of the hour.
    pub end: DateTime<Local>,

    pub price: KilowattHourRate,
}

impl PriceQuote {
    /// Charging time credited to each selected quote, regardless of its actual span.
    ///
    /// Quotes shorter than an hour are still credited a full hour,
    /// so the selection would then cover less time than it claims.
    pub const DURATION: TimeDelta = TimeDelta::hours(1);

    /// Time covered by the quote, with the inclusive end counted as a whole second.
    pub fn span(&self) -> TimeDelta {
        self.end - self.start + TimeDelta::seconds(1)
    }

    pub fn is_hourly(&self) -> bool {
        self.span() == Self::DURATION
    }
}
