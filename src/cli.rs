mod plan;

use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;

pub use self::plan::plan;
use crate::{
    cache::Cache,
    core::{charge::ChargeEstimate, price_area::PriceArea, selector::DEFAULT_MAX_THRESHOLD},
    prelude::*,
    quantity::{energy::KilowattHours, percent::Percent, power::Kilowatts},
};

const AFTER_HELP: &str = "\
This application is intended for Norwegian electricity consumers who charge their electric cars \
and want to find the optimal charging hours based on the price.

Thanks to https://www.hvakosterstrommen.no/ for the electricity prices API.";

#[derive(Parser)]
#[command(author, version, about, propagate_version = true, after_help = AFTER_HELP)]
#[must_use]
pub struct Args {
    /// Energy the charger delivers each hour, in kWh.
    #[clap(long = "charge", env = "LADEKALK_CHARGE", value_parser = parse_charging_power)]
    pub charging_power: Kilowatts,

    /// Battery capacity in kWh.
    #[clap(long = "battery", env = "LADEKALK_BATTERY", value_parser = parse_battery_capacity)]
    pub battery_capacity: KilowattHours,

    /// Current charge level in percent.
    #[clap(
        long = "level",
        env = "LADEKALK_LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=100),
    )]
    pub level: u8,

    /// Target charge level in percent.
    #[clap(
        long = "max",
        env = "LADEKALK_MAX",
        default_value = "80",
        value_parser = clap::value_parser!(u8).range(0..=100),
    )]
    pub max_level: u8,

    /// Time to stop charging by, like a departure time, in `H:M` format.
    ///
    /// If the time has already passed today, the deadline is the same time tomorrow.
    /// For example, at 13:00 `--end 08:00` means 08:00 tomorrow, and `--end 16:00` means 16:00 today.
    /// Defaults to the end of tomorrow.
    #[clap(long = "end", env = "LADEKALK_END", value_parser = parse_time)]
    pub end: Option<NaiveTime>,

    /// Price area.
    #[clap(long = "pricearea", env = "LADEKALK_PRICE_AREA", ignore_case = true)]
    pub price_area: PriceArea,

    /// Stop widening the accepted price band at this many percentage points.
    #[clap(
        long = "maxthreshold",
        env = "LADEKALK_MAX_THRESHOLD",
        default_value_t = DEFAULT_MAX_THRESHOLD,
    )]
    pub max_threshold: f64,

    /// Directory to cache the fetched prices in. Defaults to the system temporary directory.
    #[clap(long = "cache-dir", env = "LADEKALK_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

impl Args {
    pub fn charge_estimate(&self) -> ChargeEstimate {
        ChargeEstimate::builder()
            .capacity(self.battery_capacity)
            .charging_power(self.charging_power)
            .current_level(Percent(self.level))
            .target_level(Percent(self.max_level))
            .build()
    }

    pub fn cache(&self) -> Cache {
        Cache::new(self.cache_dir.clone().unwrap_or_else(|| std::env::temp_dir().join("ladekalk")))
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M")
}

fn parse_charging_power(value: &str) -> Result<Kilowatts> {
    let power: Kilowatts = value.parse()?;
    ensure!(power > Kilowatts::zero() && power.0.is_finite(), "must be a positive number");
    Ok(power)
}

fn parse_battery_capacity(value: &str) -> Result<KilowattHours> {
    let capacity: KilowattHours = value.parse()?;
    ensure!(
        capacity > KilowattHours::zero() && capacity.0.is_finite(),
        "must be a positive number",
    );
    Ok(capacity)
}
