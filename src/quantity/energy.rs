use std::ops::{Div, Mul};

use chrono::TimeDelta;

use crate::quantity::{percent::Percent, power::Kilowatts};

quantity!(KilowattHours, f64, "kWh");

impl KilowattHours {
    /// Round to two decimal places, half away from zero.
    pub fn round_to_hundredths(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Mul<Percent> for KilowattHours {
    type Output = Self;

    fn mul(self, percent: Percent) -> Self::Output {
        self * percent.to_proportion()
    }
}

impl Div<Kilowatts> for KilowattHours {
    type Output = Option<TimeDelta>;

    /// Time needed to transfer the energy at the given power, rounded to the nearest second.
    ///
    /// [`None`] if the time is not finite or does not fit into [`TimeDelta`].
    fn div(self, rhs: Kilowatts) -> Self::Output {
        let seconds = (self.0 / rhs.0 * 3600.0).round();
        if !seconds.is_finite() {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let seconds = seconds as i64;
        TimeDelta::try_seconds(seconds)
    }
}
