use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One daily wellness entry: general mood/flow plus PCOS indicators.
/// Severity scales run 0-10; PCOS flags are booleans.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SymptomLog {
  pub id: i64,
  pub user_id: String,
  pub log_date: NaiveDate,
  pub mood: Option<String>,
  pub cramps_severity: Option<i64>,
  pub flow_intensity: Option<String>,
  pub fatigue_level: Option<i64>,
  pub acne_severity: Option<i64>,
  pub bloating_level: Option<i64>,
  pub sleep_quality: Option<i64>,
  pub pcos_hair_growth: Option<bool>,
  pub pcos_hair_loss: Option<bool>,
  pub pcos_weight_change: Option<f64>,
  pub insulin_notes: Option<String>,
  pub other_symptoms: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

/// For inserting new entries (without id, user_id, created_at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSymptomLog {
  pub log_date: String,
  pub mood: Option<String>,
  pub cramps_severity: Option<i64>,
  pub flow_intensity: Option<String>,
  pub fatigue_level: Option<i64>,
  pub acne_severity: Option<i64>,
  pub bloating_level: Option<i64>,
  pub sleep_quality: Option<i64>,
  pub pcos_hair_growth: Option<bool>,
  pub pcos_hair_loss: Option<bool>,
  pub pcos_weight_change: Option<f64>,
  pub insulin_notes: Option<String>,
  pub other_symptoms: Option<String>,
}
