use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged menstrual period. Immutable after insert (no edit/delete flow).
///
/// `cycle_length` is derived once by the entry command when an end date is
/// supplied; downstream consumers trust the stored value as-is.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cycle {
  pub id: i64,
  pub user_id: String,
  pub start_date: NaiveDate,
  pub end_date: Option<NaiveDate>,
  pub cycle_length: Option<i64>,
  pub notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}
