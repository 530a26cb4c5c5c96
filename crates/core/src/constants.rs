/// Layout of the contest end timestamps in the embedded year table.
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of the entries in `data.dates`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Layout of `updatedAt` written by the payload builder (ISO-8601, local, no offset).
pub const UPDATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fraction appended to `updatedAt` when the timestamp has microseconds.
pub const UPDATED_AT_FRACTION_FORMAT: &str = "%.6f";

/// Timezone the contest deadlines are expressed in when no setting overrides it.
pub const DEFAULT_CONTEST_TIMEZONE: &str = "America/Sao_Paulo";
