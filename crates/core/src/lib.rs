//! Apostinha Core - portfolio contest dashboard state.
//!
//! This crate holds the state a dashboard renders: the portfolio payload
//! published by the data producer, a loading flag and the selected contest
//! year with its derived deadline. It also contains the producer side that
//! turns daily close prices into that payload.

pub mod constants;
pub mod contest;
pub mod errors;
pub mod events;
pub mod portfolio;
pub mod prices;
pub mod settings;
pub mod store;
pub mod utils;

// Re-export the types most callers need
pub use contest::SelectedYear;
pub use portfolio::{PortfolioEntry, PortfolioId, PortfolioPayload};
pub use store::{PortfolioStateStore, PortfolioStateStoreTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
