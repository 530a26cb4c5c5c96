//! Portfolio module - payload models, roster and the payload builder.

mod payload_builder;
mod portfolio_constants;
mod portfolio_model;
mod returns_calculator;


pub use payload_builder::{
    apply_natu3_history, build_payload, parse_contest_date, PayloadBuildOptions,
};
pub use portfolio_constants::*;
pub use portfolio_model::{
    PortfolioData, PortfolioEntry, PortfolioId, PortfolioPayload, Portfolios, Series,
};
pub use returns_calculator::{
    calculate_portfolio_entry, equal_weight, forward_fill, inception_to_date,
};
