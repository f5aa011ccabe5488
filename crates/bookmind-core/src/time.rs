use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to milliseconds.
///
/// Timestamps are serialized with millisecond precision; storing anything
/// finer would make a value read back from JSON compare unequal to the row.
pub fn now_ms() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
