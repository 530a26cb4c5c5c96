use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::contest::SelectedYear;
use crate::errors::Result;
use crate::portfolio::PortfolioPayload;

/// Read/write surface the presentation layer uses.
pub trait PortfolioStateStoreTrait: Send + Sync {
    /// The loaded payload, `None` until one is set.
    fn get_portfolio(&self) -> Option<Arc<PortfolioPayload>>;

    /// Replaces the payload and notifies subscribers.
    fn set_portfolio(&self, payload: PortfolioPayload);

    fn is_loading(&self) -> bool;

    fn set_loading(&self, loading: bool);

    fn get_selected_year(&self) -> SelectedYear;

    fn set_selected_year(&self, year: SelectedYear);

    /// Deadline of the selected contest year, derived on every read.
    fn get_end_time(&self) -> Result<NaiveDateTime>;
}
