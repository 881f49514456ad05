use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
  pub user_id: String,
  pub full_name: Option<String>,
  pub age: Option<i64>,
  pub typical_cycle_length: Option<i64>,
  pub medical_notes: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
  /// Empty profile shell for a user that hasn't filled anything in yet.
  pub fn empty(user_id: &str) -> Self {
    Self {
      user_id: user_id.to_string(),
      full_name: None,
      age: None,
      typical_cycle_length: None,
      medical_notes: None,
      created_at: None,
      updated_at: None,
    }
  }
}
