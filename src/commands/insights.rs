use crate::analysis;
use crate::commands::auth::current_user;
use crate::db::AppState;
use crate::models::Cycle;
use crate::tips::{tips_for_age, TipSection};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tauri::State;

/// ---------------------------------------------------------------------------
/// Insights Page Payload
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct QuickStats {
  pub cycles_logged: i64,
  pub symptom_entries: i64,
  pub average_cycle_length: Option<i64>,
  pub tracking_since: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct InsightsSummary {
  pub age: Option<i64>,
  pub tip_sections: Vec<TipSection>,
  pub quick_stats: QuickStats,
}

/// Age-banded tips plus the quick-stats card.
#[tauri::command]
pub async fn get_insights(state: State<'_, Arc<AppState>>) -> Result<InsightsSummary, String> {
  let session = current_user(&state.db).await.map_err(|e| e.to_string())?;

  let age = sqlx::query_scalar::<_, Option<i64>>("SELECT age FROM profiles WHERE user_id = ?1")
    .bind(&session.user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| format!("Failed to get profile: {}", e))?
    .flatten();

  let cycles: Vec<Cycle> = sqlx::query_as(
    r#"
    SELECT id, user_id, start_date, end_date, cycle_length, notes, created_at
    FROM cycles
    WHERE user_id = ?1
    ORDER BY start_date DESC
    "#,
  )
  .bind(&session.user_id)
  .fetch_all(&state.db)
  .await
  .map_err(|e| format!("Failed to fetch cycles: {}", e))?;

  let symptom_entries: i64 =
    sqlx::query_scalar("SELECT COUNT(*) FROM symptom_logs WHERE user_id = ?1")
      .bind(&session.user_id)
      .fetch_one(&state.db)
      .await
      .map_err(|e| format!("Failed to count symptom logs: {}", e))?;

  let first_log_date: Option<NaiveDate> =
    sqlx::query_scalar("SELECT MIN(log_date) FROM symptom_logs WHERE user_id = ?1")
      .bind(&session.user_id)
      .fetch_one(&state.db)
      .await
      .map_err(|e| format!("Failed to read first log date: {}", e))?;

  // Earliest activity across both record kinds
  let first_cycle_date = cycles.iter().map(|c| c.start_date).min();
  let tracking_since = match (first_cycle_date, first_log_date) {
    (Some(a), Some(b)) => Some(a.min(b)),
    (a, b) => a.or(b),
  };

  Ok(InsightsSummary {
    age,
    tip_sections: tips_for_age(age),
    quick_stats: QuickStats {
      cycles_logged: cycles.len() as i64,
      symptom_entries,
      average_cycle_length: analysis::average_cycle_length(&cycles),
      tracking_since,
    },
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
