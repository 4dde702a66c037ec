//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDate, Utc};

/// UTC timestamp used for `created_at`.
pub type Timestamp = DateTime<Utc>;

/// Calendar date without time zone, used for task due dates (`YYYY-MM-DD`).
pub type Date = NaiveDate;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
