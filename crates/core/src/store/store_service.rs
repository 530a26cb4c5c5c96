use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;
use log::{debug, info, warn};

use super::store_model::{StoreSnapshot, SubscriptionId};
use super::store_traits::PortfolioStateStoreTrait;
use crate::contest::SelectedYear;
use crate::errors::Result;
use crate::events::{StoreEvent, StoreEventSink};
use crate::portfolio::PortfolioPayload;
use crate::settings::StoreSettings;
use crate::utils::time_utils::localize;

#[derive(Debug)]
struct StoreState {
    portfolio: Option<Arc<PortfolioPayload>>,
    loading: bool,
    selected_year: SelectedYear,
}

/// Shared portfolio display state.
///
/// Holds the payload (unset until loaded), the loading flag and the selected
/// contest year. All methods take `&self`; one writer at a time is enforced
/// by an internal lock, so the store can be shared through an `Arc`.
///
/// Subscribers are notified after the state lock is released, so a sink may
/// read the store from `emit`. Mutations from different threads are
/// serialized together with their notification: events arrive in the order
/// the mutations were applied, and the last event describes the current
/// state. A sink must not mutate the store from `emit`.
pub struct PortfolioStateStore {
    state: RwLock<StoreState>,
    // Held from the state write until every subscriber has seen the event.
    delivery: Mutex<()>,
    subscribers: RwLock<Vec<(SubscriptionId, Arc<dyn StoreEventSink>)>>,
    settings: StoreSettings,
}

impl Default for PortfolioStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioStateStoreTrait for PortfolioStateStore {
    fn get_portfolio(&self) -> Option<Arc<PortfolioPayload>> {
        self.read_state().portfolio.clone()
    }

    fn set_portfolio(&self, payload: PortfolioPayload) {
        debug!(
            "Setting portfolio payload updated at {} ({} dates)",
            payload.updated_at,
            payload.data.dates.len()
        );
        let updated_at = payload.updated_at.clone();
        let _delivery = self.lock_delivery();
        self.write_state().portfolio = Some(Arc::new(payload));
        self.notify(StoreEvent::portfolio_changed(Some(updated_at)));
    }

    fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    fn set_loading(&self, loading: bool) {
        let _delivery = self.lock_delivery();
        let changed = {
            let mut state = self.write_state();
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        };
        if changed {
            debug!("Loading flag set to {}", loading);
            self.notify(StoreEvent::loading_changed(loading));
        }
    }

    fn get_selected_year(&self) -> SelectedYear {
        self.read_state().selected_year
    }

    fn set_selected_year(&self, year: SelectedYear) {
        let _delivery = self.lock_delivery();
        let previous = {
            let mut state = self.write_state();
            std::mem::replace(&mut state.selected_year, year)
        };
        if previous != year {
            info!("Selected contest year changed from {} to {}", previous, year);
            self.notify(StoreEvent::selected_year_changed(year));
        }
    }

    fn get_end_time(&self) -> Result<NaiveDateTime> {
        self.get_selected_year().end_time()
    }
}

impl PortfolioStateStore {
    pub fn new() -> Self {
        Self::with_settings(StoreSettings::default())
    }

    pub fn with_settings(settings: StoreSettings) -> Self {
        Self {
            state: RwLock::new(StoreState {
                portfolio: None,
                loading: false,
                selected_year: settings.default_year,
            }),
            delivery: Mutex::new(()),
            subscribers: RwLock::new(Vec::new()),
            settings,
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Returns the payload to the unset state.
    pub fn clear_portfolio(&self) {
        let _delivery = self.lock_delivery();
        let had_payload = self.write_state().portfolio.take().is_some();
        debug!("Cleared portfolio payload (was set: {})", had_payload);
        self.notify(StoreEvent::portfolio_changed(None));
    }

    /// Sets the year from an untyped value. Unknown years are rejected and
    /// leave the current selection untouched.
    pub fn set_selected_year_value(&self, value: i64) -> Result<()> {
        let year = SelectedYear::try_from(value).map_err(|e| {
            warn!("Rejected contest year {}: {}", value, e);
            e
        })?;
        self.set_selected_year(year);
        Ok(())
    }

    /// Parses a payload document and stores it, raising the loading flag for
    /// the duration. On a parse error the previous payload is kept.
    pub fn apply_payload_json(&self, json: &str) -> Result<()> {
        self.set_loading(true);
        let outcome = PortfolioPayload::from_json_str(json).map(|payload| {
            self.set_portfolio(payload);
        });
        if let Err(e) = &outcome {
            warn!("Keeping previous portfolio payload: {}", e);
        }
        self.set_loading(false);
        outcome
    }

    /// Deadline of the selected year in the configured timezone.
    pub fn get_end_time_in_zone(&self) -> Result<DateTime<Tz>> {
        let tz = self.settings.tz()?;
        localize(self.get_end_time()?, tz)
    }

    /// Time left until the deadline; negative once it has passed.
    pub fn time_until_end(&self, now: DateTime<Utc>) -> Result<Duration> {
        let end = self.get_end_time_in_zone()?;
        Ok(end.with_timezone(&Utc).signed_duration_since(now))
    }

    pub fn is_contest_over(&self, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.time_until_end(now)? <= Duration::zero())
    }

    /// Reads all state and the derived deadline in one go.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.read_state();
        StoreSnapshot {
            portfolio: state.portfolio.clone(),
            loading: state.loading,
            selected_year: state.selected_year,
            end_time: state.selected_year.end_time().ok(),
        }
    }

    pub fn subscribe(&self, sink: Arc<dyn StoreEventSink>) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, sink));
        debug!("Store subscriber {} added", id);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, event: StoreEvent) {
        let sinks: Vec<Arc<dyn StoreEventSink>> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, sink)| Arc::clone(sink))
            .collect();
        for sink in sinks {
            sink.emit(event.clone());
        }
    }

    // Poisoned locks are recovered; the state holds no partial writes.
    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // A sink that panicked mid-delivery poisons this lock; later writers go on.
    fn lock_delivery(&self) -> MutexGuard<'_, ()> {
        self.delivery.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
