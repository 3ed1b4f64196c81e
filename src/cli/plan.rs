use chrono::{DateTime, Local, TimeDelta, Timelike};

use crate::{
    api::{hvakosterstrommen, price_source::PriceSource},
    cli::Args,
    core::{
        deadline,
        optimal_hours::OptimalHours,
        quote::PriceQuote,
        selector::OptimalHourSelector,
        session::Session,
    },
    prelude::*,
    tables::{build_session_table, format_window},
};

/// Fetch the prices, pick the optimal hours, and print them grouped by sessions.
#[instrument(skip_all)]
pub async fn plan(args: &Args) -> Result {
    let now = Local::now();
    let now = now.with_nanosecond(0).unwrap_or(now);
    let source = hvakosterstrommen::Api::new(args.cache())?;
    let selection = select(args, &source, now).await?;

    if let Some(shortfall) = selection.shortfall() {
        warn!(
            selected = ?selection.optimal_hours.duration(),
            required = ?selection.required,
            ?shortfall,
            "not enough acceptable hours before the deadline",
        );
    }
    if let Some(window) = format_window(&selection.quotes) {
        println!("Prices fetched for period {window}");
    }
    for session in Session::split(&selection.optimal_hours) {
        println!("{}", build_session_table(&session));
        if let Some(average) = session.average_price() {
            println!("Session average: {average:.4}");
        }
        println!("Session total: {:.2}", session.total_price());
    }
    if let Some(average) = selection.optimal_hours.average_price() {
        println!("Total average: {average:.4}");
    }
    println!("Total: {:.2}", selection.optimal_hours.total_price());

    Ok(())
}

#[derive(Debug)]
struct Selection {
    /// Quotes in the charging window, ordered by start time.
    quotes: Vec<PriceQuote>,

    required: TimeDelta,
    optimal_hours: OptimalHours,
}

impl Selection {
    /// Charging time the optimal hours fall short of, if any.
    fn shortfall(&self) -> Option<TimeDelta> {
        let selected = self.optimal_hours.duration();
        (selected < self.required).then(|| self.required - selected)
    }
}

async fn select(
    args: &Args,
    source: &impl PriceSource,
    now: DateTime<Local>,
) -> Result<Selection> {
    let required = args.charge_estimate().duration()?;
    info!(?required, "estimated charging time");
    ensure!(
        required > TimeDelta::zero(),
        "the battery is already at or above the target level, nothing to charge",
    );

    let deadline = deadline::resolve(now, args.end)?;
    let quotes = source.get_upcoming_quotes(args.price_area, now, deadline).await?;
    info!(n_quotes = quotes.len(), %deadline, "fetched prices");

    let optimal_hours = OptimalHourSelector::builder()
        .quotes(&quotes)
        .required(required)
        .max_threshold(args.max_threshold)
        .build()
        .resolve();
    ensure!(!optimal_hours.is_empty(), "no optimal hours were found");
    info!(n_hours = optimal_hours.len(), "resolved optimal hours");

    Ok(Selection { quotes, required, optimal_hours })
}
