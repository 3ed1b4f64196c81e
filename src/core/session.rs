use chrono::TimeDelta;

use crate::{
    core::optimal_hours::{OptimalHour, OptimalHours, average_price, total_price},
    quantity::rate::KilowattHourRate,
};

/// Consecutive optimal hours the charger may run without a pause.
#[derive(Copy, Clone, Debug)]
pub struct Session<'a>(&'a [OptimalHour]);

impl<'a> Session<'a> {
    /// Largest gap between two hours that still keeps them in one session.
    pub const MAX_GAP: TimeDelta = TimeDelta::minutes(1);

    /// Split the selection into sessions.
    pub fn split(hours: &'a OptimalHours) -> impl Iterator<Item = Self> {
        hours
            .as_slice()
            .chunk_by(|left, right| right.quote.start <= left.quote.end + Self::MAX_GAP)
            .map(Self)
    }

    pub const fn hours(&self) -> &'a [OptimalHour] {
        self.0
    }

    pub fn total_price(&self) -> KilowattHourRate {
        total_price(self.0)
    }

    pub fn average_price(&self) -> Option<KilowattHourRate> {
        average_price(self.0)
    }
}
