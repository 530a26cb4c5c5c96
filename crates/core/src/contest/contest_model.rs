//! Contest year domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::contest_constants::YEAR_CONFIGS;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::parse_local_timestamp;

/// The contest year being viewed.
///
/// Only the years with an entry in [`YEAR_CONFIGS`] exist. Conversions from
/// integers, strings and JSON reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum SelectedYear {
    Y2025,
    #[default]
    Y2026,
}

/// Static per-year contest configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearConfig {
    pub year: SelectedYear,
    /// Wall-clock deadline, `YYYY-MM-DD HH:MM:SS`.
    pub end_time: &'static str,
}

impl YearConfig {
    pub fn parsed_end_time(&self) -> Result<NaiveDateTime> {
        parse_local_timestamp(self.end_time)
    }
}

impl SelectedYear {
    pub const ALL: [SelectedYear; 2] = [SelectedYear::Y2025, SelectedYear::Y2026];

    pub fn as_i64(self) -> i64 {
        match self {
            SelectedYear::Y2025 => 2025,
            SelectedYear::Y2026 => 2026,
        }
    }

    pub fn config(self) -> &'static YearConfig {
        match self {
            SelectedYear::Y2025 => &YEAR_CONFIGS[0],
            SelectedYear::Y2026 => &YEAR_CONFIGS[1],
        }
    }

    /// Contest deadline for this year as a wall-clock timestamp.
    pub fn end_time(self) -> Result<NaiveDateTime> {
        self.config().parsed_end_time()
    }
}

impl TryFrom<i64> for SelectedYear {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            2025 => Ok(SelectedYear::Y2025),
            2026 => Ok(SelectedYear::Y2026),
            other => Err(ValidationError::UnsupportedYear(other).into()),
        }
    }
}

impl From<SelectedYear> for i64 {
    fn from(year: SelectedYear) -> Self {
        year.as_i64()
    }
}

impl FromStr for SelectedYear {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s.trim().parse().map_err(|_| {
            ValidationError::InvalidInput(format!("'{}' is not a contest year", s))
        })?;
        SelectedYear::try_from(value)
    }
}

impl fmt::Display for SelectedYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}
