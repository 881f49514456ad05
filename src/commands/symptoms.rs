use crate::commands::auth::current_user;
use crate::db::AppState;
use crate::models::{NewSymptomLog, SymptomLog};
use chrono::NaiveDate;
use std::sync::Arc;
use tauri::State;

/// Severity sliders in the entry form run 0-10.
const SEVERITY_MAX: i64 = 10;

fn clamp_severity(value: Option<i64>) -> Option<i64> {
  value.map(|v| v.clamp(0, SEVERITY_MAX))
}

/// ---------------------------------------------------------------------------
/// Symptom Entry
/// ---------------------------------------------------------------------------

/// Record one daily wellness entry.
#[tauri::command]
pub async fn log_symptoms(
  entry: NewSymptomLog,
  state: State<'_, Arc<AppState>>,
) -> Result<(), String> {
  let session = current_user(&state.db).await.map_err(|e| e.to_string())?;

  let log_date =
    NaiveDate::parse_from_str(&entry.log_date, "%Y-%m-%d").map_err(|e| e.to_string())?;

  sqlx::query(
    r#"
    INSERT INTO symptom_logs (
      user_id, log_date, mood, cramps_severity, flow_intensity,
      fatigue_level, acne_severity, bloating_level, sleep_quality,
      pcos_hair_growth, pcos_hair_loss, pcos_weight_change,
      insulin_notes, other_symptoms
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
    "#,
  )
  .bind(&session.user_id)
  .bind(log_date)
  .bind(entry.mood.filter(|m| !m.is_empty()))
  .bind(clamp_severity(entry.cramps_severity))
  .bind(entry.flow_intensity.filter(|f| !f.is_empty()))
  .bind(clamp_severity(entry.fatigue_level))
  .bind(clamp_severity(entry.acne_severity))
  .bind(clamp_severity(entry.bloating_level))
  .bind(clamp_severity(entry.sleep_quality))
  .bind(entry.pcos_hair_growth)
  .bind(entry.pcos_hair_loss)
  .bind(entry.pcos_weight_change)
  .bind(entry.insulin_notes.filter(|n| !n.is_empty()))
  .bind(entry.other_symptoms.filter(|s| !s.is_empty()))
  .execute(&state.db)
  .await
  .map_err(|e| format!("Failed to save symptom log: {}", e))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Symptom History
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_symptom_logs(
  limit: Option<i64>,
  state: State<'_, Arc<AppState>>,
) -> Result<Vec<SymptomLog>, String> {
  let session = current_user(&state.db).await.map_err(|e| e.to_string())?;
  let limit = limit.unwrap_or(50);

  sqlx::query_as::<_, SymptomLog>(
    r#"
    SELECT id, user_id, log_date, mood, cramps_severity, flow_intensity,
           fatigue_level, acne_severity, bloating_level, sleep_quality,
           pcos_hair_growth, pcos_hair_loss, pcos_weight_change,
           insulin_notes, other_symptoms, created_at
    FROM symptom_logs
    WHERE user_id = ?1
    ORDER BY log_date DESC
    LIMIT ?2
    "#,
  )
  .bind(&session.user_id)
  .bind(limit)
  .fetch_all(&state.db)
  .await
  .map_err(|e| format!("Failed to fetch symptom logs: {}", e))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
