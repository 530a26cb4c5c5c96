//! Store event types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::contest::SelectedYear;

/// Events published by the state store after a mutation was applied.
///
/// Listeners re-read whatever they render from the store; the payload itself
/// is not carried in the event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The payload was replaced or cleared.
    PortfolioChanged {
        /// `updatedAt` of the new payload, `None` once cleared.
        updated_at: Option<String>,
    },

    /// The loading flag flipped.
    LoadingChanged { loading: bool },

    /// The contest year changed, together with the re-derived deadline.
    SelectedYearChanged {
        year: SelectedYear,
        end_time: Option<NaiveDateTime>,
    },
}

impl StoreEvent {
    pub fn portfolio_changed(updated_at: Option<String>) -> Self {
        Self::PortfolioChanged { updated_at }
    }

    pub fn loading_changed(loading: bool) -> Self {
        Self::LoadingChanged { loading }
    }

    pub fn selected_year_changed(year: SelectedYear) -> Self {
        Self::SelectedYearChanged {
            year,
            end_time: year.end_time().ok(),
        }
    }
}
