use bon::Builder;
use chrono::TimeDelta;

use crate::{
    prelude::*,
    quantity::{energy::KilowattHours, percent::Percent, power::Kilowatts},
};

/// Charging session parameters of a vehicle.
#[derive(Copy, Clone, Builder)]
pub struct ChargeEstimate {
    /// Usable battery capacity.
    capacity: KilowattHours,

    /// Energy the charger delivers in one hour.
    charging_power: Kilowatts,

    current_level: Percent,

    #[builder(default = Percent(80))]
    target_level: Percent,
}

impl ChargeEstimate {
    /// Time needed to charge from the current to the target level.
    ///
    /// Both energy levels are rounded to two decimals before subtracting.
    /// Zero or negative duration means there is nothing to charge.
    pub fn duration(&self) -> Result<TimeDelta> {
        ensure!(self.charging_power > Kilowatts::zero(), "the charging power must be positive");
        let target_energy = (self.capacity * self.target_level).round_to_hundredths();
        let current_energy = (self.capacity * self.current_level).round_to_hundredths();
        ((target_energy - current_energy) / self.charging_power).with_context(|| {
            format!(
                "the charging time for {} at {} is out of range",
                self.capacity, self.charging_power,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(current_level: u8, target_level: u8) -> ChargeEstimate {
        ChargeEstimate::builder()
            .capacity(KilowattHours(77.0))
            .charging_power(Kilowatts(3.4))
            .current_level(Percent(current_level))
            .target_level(Percent(target_level))
            .build()
    }

    #[test]
    fn test_duration() -> Result {
        // (61.6 - 15.4) / 3.4 hours:
        assert_eq!(estimate(20, 80).duration()?.num_seconds(), 48918);
        Ok(())
    }

    #[test]
    fn test_duration_is_deterministic() -> Result {
        let estimate = estimate(20, 80);
        assert_eq!(estimate.duration()?, estimate.duration()?);
        Ok(())
    }

    #[test]
    fn test_default_target_level() -> Result {
        let estimate = ChargeEstimate::builder()
            .capacity(KilowattHours(77.0))
            .charging_power(Kilowatts(3.4))
            .current_level(Percent(20))
            .build();
        assert_eq!(estimate.duration()?.num_seconds(), 48918);
        Ok(())
    }

    #[test]
    fn test_already_at_target() -> Result {
        assert_eq!(estimate(80, 80).duration()?, TimeDelta::zero());
        Ok(())
    }

    #[test]
    fn test_above_target() -> Result {
        assert!(estimate(90, 80).duration()? < TimeDelta::zero());
        Ok(())
    }

    #[test]
    fn test_zero_charging_power() {
        let estimate = ChargeEstimate::builder()
            .capacity(KilowattHours(77.0))
            .charging_power(Kilowatts::zero())
            .current_level(Percent(20))
            .build();
        assert!(estimate.duration().is_err());
    }

    #[test]
    fn test_huge_capacity() {
        let estimate = ChargeEstimate::builder()
            .capacity(KilowattHours(1e300))
            .charging_power(Kilowatts(3.4))
            .current_level(Percent(20))
            .build();
        assert!(estimate.duration().is_err());
    }
}
