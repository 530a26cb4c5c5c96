use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CONTEST_TIMEZONE;
use crate::contest::SelectedYear;
use crate::errors::{Error, Result};

/// Host-supplied configuration for a state store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Year selected when the store is created.
    pub default_year: SelectedYear,
    /// IANA zone the contest deadlines are wall-clock times in.
    pub timezone: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            default_year: SelectedYear::default(),
            timezone: DEFAULT_CONTEST_TIMEZONE.to_string(),
        }
    }
}

impl StoreSettings {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            Error::InvalidConfigValue(format!("unknown timezone '{}'", self.timezone))
        })
    }
}
