//! [Hva koster strømmen](https://www.hvakosterstrommen.no/strompris-api) client.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeDelta};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    api::{client, price_source::PriceSource},
    cache::Cache,
    core::{price_area::PriceArea, quote::PriceQuote},
    prelude::*,
    quantity::rate::KilowattHourRate,
};

const BASE_URL: &str = "https://www.hvakosterstrommen.no/api/v1/prices";

pub struct Api {
    client: Client,
    base_url: String,
    cache: Cache,
}

impl Api {
    pub fn new(cache: Cache) -> Result<Self> {
        Self::with_base_url(BASE_URL, cache)
    }

    fn with_base_url(base_url: impl Into<String>, cache: Cache) -> Result<Self> {
        Ok(Self { client: client::try_new()?, base_url: base_url.into(), cache })
    }

    /// Get the raw response body.
    ///
    /// # Returns
    ///
    /// [`None`], if the prices are not published (yet).
    async fn fetch(&self, area: PriceArea, on: NaiveDate) -> Result<Option<Vec<u8>>> {
        let url = format!("{}/{}_{area}.json", self.base_url, on.format("%Y/%m-%d"));
        info!(%url, "fetching…");
        let response = self.client.get(&url).send().await.context("failed to call")?;
        if response.status() == StatusCode::NOT_FOUND {
            warn!("prices are not published yet");
            return Ok(None);
        }
        let body = response
            .error_for_status()
            .context("request failed")?
            .bytes()
            .await
            .context("failed to read the response")?
            .to_vec();
        Ok(Some(body))
    }
}

#[async_trait]
impl PriceSource for Api {
    /// Get the quotes, preferring the cache.
    ///
    /// Only a body that parses is cached. A cached body which does not parse is fetched again.
    #[instrument(skip_all, fields(%area, %on))]
    async fn get_quotes(&self, area: PriceArea, on: NaiveDate) -> Result<Vec<PriceQuote>> {
        if let Some(body) = self.cache.read(area, on)? {
            match parse_quotes(&body) {
                Ok(quotes) => return Ok(quotes),
                Err(error) => warn!("ignoring the cached prices: {error:#}"),
            }
        }
        let Some(body) = self.fetch(area, on).await? else {
            return Ok(Vec::new());
        };
        let quotes = parse_quotes(&body)?;
        self.cache.write(area, on, &body)?;
        info!(n_quotes = quotes.len(), "fetched");
        Ok(quotes)
    }
}

fn parse_quotes(body: &[u8]) -> Result<Vec<PriceQuote>> {
    Ok(serde_json::from_slice::<Vec<Record>>(body)
        .context("failed to deserialize the prices")?
        .into_iter()
        .map(PriceQuote::from)
        .collect())
}

#[derive(Deserialize)]
struct Record {
    #[serde(rename = "NOK_per_kWh")]
    nok_per_kwh: f64,

    time_start: DateTime<Local>,

    /// Exclusive.
    time_end: DateTime<Local>,
}

impl From<Record> for PriceQuote {
    fn from(record: Record) -> Self {
        Self {
            start: record.time_start,
            end: record.time_end - TimeDelta::seconds(1),
            price: KilowattHourRate(record.nok_per_kwh),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{FixedOffset, TimeZone, Timelike};
    use mockito::Server;
    use tempfile::TempDir;

    use super::*;

    // language=JSON
    const RESPONSE: &str = r#"
        [
            {
                "NOK_per_kWh": 1.35183,
                "EUR_per_kWh": 0.12859,
                "EXR": 10.5128,
                "time_start": "2023-01-01T00:00:00+01:00",
                "time_end": "2023-01-01T01:00:00+01:00"
            },
            {
                "NOK_per_kWh": 1.30519,
                "EUR_per_kWh": 0.12415,
                "EXR": 10.5128,
                "time_start": "2023-01-01T01:00:00+01:00",
                "time_end": "2023-01-01T02:00:00+01:00"
            }
        ]
    "#;

    const PATH: &str = "/2023/01-01_NO1.json";

    fn new_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    #[test]
    fn test_parse_quotes_ok() -> Result {
        let quotes = parse_quotes(RESPONSE.as_bytes())?;
        assert_eq!(quotes.len(), 2);

        let offset = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(quotes[1].start, offset.with_ymd_and_hms(2023, 1, 1, 1, 0, 0).unwrap());
        assert_eq!(quotes[1].end, offset.with_ymd_and_hms(2023, 1, 1, 1, 59, 59).unwrap());
        assert_abs_diff_eq!(quotes[0].price.0, 1.35183);
        Ok(())
    }

    #[test]
    fn test_parse_quotes_malformed() {
        assert!(parse_quotes(br#"{"error": "nope"}"#).is_err());
    }

    #[tokio::test]
    async fn test_get_quotes_caches_response() -> Result {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(RESPONSE)
            .expect(1)
            .create_async()
            .await;
        let directory = TempDir::new()?;
        let api = Api::with_base_url(server.url(), Cache::new(directory.path().to_path_buf()))?;

        assert_eq!(api.get_quotes(PriceArea::No1, new_year()).await?.len(), 2);
        assert_eq!(api.get_quotes(PriceArea::No1, new_year()).await?.len(), 2);

        mock.assert_async().await;
        assert!(api.cache.read(PriceArea::No1, new_year())?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_quotes_does_not_cache_malformed_response() -> Result {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>maintenance</html>")
            .expect(2)
            .create_async()
            .await;
        let directory = TempDir::new()?;
        let api = Api::with_base_url(server.url(), Cache::new(directory.path().to_path_buf()))?;

        assert!(api.get_quotes(PriceArea::No1, new_year()).await.is_err());
        assert!(api.cache.read(PriceArea::No1, new_year())?.is_none());
        assert!(api.get_quotes(PriceArea::No1, new_year()).await.is_err());

        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get_quotes_refetches_malformed_cache() -> Result {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .with_status(200)
            .with_body(RESPONSE)
            .create_async()
            .await;
        let directory = TempDir::new()?;
        let api = Api::with_base_url(server.url(), Cache::new(directory.path().to_path_buf()))?;
        api.cache.write(PriceArea::No1, new_year(), b"<html>maintenance</html>")?;

        assert_eq!(api.get_quotes(PriceArea::No1, new_year()).await?.len(), 2);

        mock.assert_async().await;
        assert_eq!(
            api.cache.read(PriceArea::No1, new_year())?.as_deref(),
            Some(RESPONSE.as_bytes()),
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_get_quotes_not_published() -> Result {
        let mut server = Server::new_async().await;
        let mock = server.mock("GET", PATH).with_status(404).create_async().await;
        let directory = TempDir::new()?;
        let api = Api::with_base_url(server.url(), Cache::new(directory.path().to_path_buf()))?;

        assert!(api.get_quotes(PriceArea::No1, new_year()).await?.is_empty());

        mock.assert_async().await;
        assert!(api.cache.read(PriceArea::No1, new_year())?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_quotes_server_error() -> Result {
        let mut server = Server::new_async().await;
        let _mock = server.mock("GET", PATH).with_status(500).create_async().await;
        let directory = TempDir::new()?;
        let api = Api::with_base_url(server.url(), Cache::new(directory.path().to_path_buf()))?;

        assert!(api.get_quotes(PriceArea::No1, new_year()).await.is_err());
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_get_quotes_ok() -> Result {
        let directory = TempDir::new()?;
        let quotes = Api::new(Cache::new(directory.path().to_path_buf()))?
            .get_quotes(PriceArea::No1, Local::now().date_naive())
            .await?;
        assert!(!quotes.is_empty());
        assert!(quotes.len() <= 100);
        assert_eq!(quotes[0].start.minute(), 0);
        assert!(quotes.iter().is_sorted_by_key(|quote| quote.start));
        Ok(())
    }
}
