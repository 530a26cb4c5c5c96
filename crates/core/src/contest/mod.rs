//! Contest module - selectable contest years and their deadlines.

mod contest_constants;
mod contest_model;

#[cfg(test)]
mod contest_model_tests;

pub use contest_constants::*;
pub use contest_model::{SelectedYear, YearConfig};
