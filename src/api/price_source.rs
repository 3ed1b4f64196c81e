use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};

use crate::{
    core::{deadline, price_area::PriceArea, quote::PriceQuote},
    prelude::*,
};

#[async_trait]
pub trait PriceSource: Sync {
    /// Get the quotes which start now or later and end before the deadline.
    ///
    /// Today and the deadline date are fetched concurrently.
    #[instrument(skip_all, fields(%area, %now, %deadline))]
    async fn get_upcoming_quotes(
        &self,
        area: PriceArea,
        now: DateTime<Local>,
        deadline: DateTime<Local>,
    ) -> Result<Vec<PriceQuote>> {
        let mut quotes = match deadline::dates(now, deadline).as_slice() {
            [today] => self.get_quotes(area, *today).await?,
            [today, deadline_date] => {
                let (mut quotes, later) = tokio::try_join!(
                    self.get_quotes(area, *today),
                    self.get_quotes(area, *deadline_date),
                )?;
                quotes.extend(later);
                quotes
            }
            dates => bail!("expected one or two dates to fetch, got {}", dates.len()),
        };
        quotes.sort_by_key(|quote| quote.start);
        quotes.retain(|quote| quote.start >= now && quote.end <= deadline);
        let n_not_hourly = quotes.iter().filter(|quote| !quote.is_hourly()).count();
        if n_not_hourly != 0 {
            warn!(n_not_hourly, "some quotes do not span an hour, each is still counted as one");
        }
        Ok(quotes)
    }

    /// Get all quotes on the date.
    ///
    /// Prices which are not published yet yield no quotes rather than an error.
    async fn get_quotes(&self, area: PriceArea, on: NaiveDate) -> Result<Vec<PriceQuote>>;
}
