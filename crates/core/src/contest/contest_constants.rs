use super::contest_model::{SelectedYear, YearConfig};

/// Contest end times, one entry per selectable year.
pub static YEAR_CONFIGS: [YearConfig; 2] = [
    YearConfig {
        year: SelectedYear::Y2025,
        end_time: "2025-12-12 21:00:00",
    },
    YearConfig {
        year: SelectedYear::Y2026,
        end_time: "2026-12-15 21:00:00",
    },
];

/// Last trading day kept in the 2025 contest payload.
pub const CONTEST_END_DATE: &str = "2025-12-13";
