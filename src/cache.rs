use std::{fs, path::PathBuf};

use chrono::NaiveDate;

use crate::{core::price_area::PriceArea, prelude::*};

/// Raw price responses, one file per price area and date.
///
/// Entries never expire.
pub struct Cache {
    directory: PathBuf,
}

impl Cache {
    pub const fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    #[instrument(skip(self))]
    pub fn read(&self, area: PriceArea, on: NaiveDate) -> Result<Option<Vec<u8>>> {
        let path = self.path(area, on);
        if !path.is_file() {
            debug!(path = %path.display(), "miss");
            return Ok(None);
        }
        let body = fs::read(&path)
            .with_context(|| format!("failed to read the cache from `{}`", path.display()))?;
        debug!(path = %path.display(), n_bytes = body.len(), "hit");
        Ok(Some(body))
    }

    #[instrument(skip(self, body))]
    pub fn write(&self, area: PriceArea, on: NaiveDate, body: &[u8]) -> Result {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!("failed to create the cache directory `{}`", self.directory.display())
        })?;
        let path = self.path(area, on);
        fs::write(&path, body)
            .with_context(|| format!("failed to write the cache to `{}`", path.display()))?;
        debug!(path = %path.display(), n_bytes = body.len(), "written");
        Ok(())
    }

    fn path(&self, area: PriceArea, on: NaiveDate) -> PathBuf {
        self.directory.join(format!("prices_{area}_{}.json", on.format("%Y%m%d")))
    }
}
