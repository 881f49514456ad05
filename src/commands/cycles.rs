use crate::commands::auth::current_user;
use crate::db::AppState;
use crate::models::Cycle;
use chrono::NaiveDate;
use std::sync::Arc;
use tauri::State;

/// ---------------------------------------------------------------------------
/// Cycle Entry
/// ---------------------------------------------------------------------------

/// Log one period. `cycle_length` is derived here, once, when an end date
/// is supplied; records are immutable afterwards.
#[tauri::command]
pub async fn log_cycle(
  start_date: String,
  end_date: Option<String>,
  notes: Option<String>,
  state: State<'_, Arc<AppState>>,
) -> Result<(), String> {
  let session = current_user(&state.db).await.map_err(|e| e.to_string())?;

  let start = NaiveDate::parse_from_str(&start_date, "%Y-%m-%d").map_err(|e| e.to_string())?;

  let end = match end_date.as_deref().filter(|s| !s.is_empty()) {
    Some(s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string())?),
    None => None,
  };

  if let Some(end) = end {
    if end < start {
      return Err("End date cannot be before start date".to_string());
    }
  }

  // Whole-day span, fixed at creation; the dashboard trusts it as stored
  let cycle_length = end.map(|e| (e - start).num_days());

  sqlx::query(
    r#"
    INSERT INTO cycles (user_id, start_date, end_date, cycle_length, notes)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(&session.user_id)
  .bind(start)
  .bind(end)
  .bind(cycle_length)
  .bind(notes.filter(|n| !n.is_empty()))
  .execute(&state.db)
  .await
  .map_err(|e| format!("Failed to save cycle: {}", e))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Cycle History
/// ---------------------------------------------------------------------------

/// The user's cycle history, most recent first.
#[tauri::command]
pub async fn get_cycles(state: State<'_, Arc<AppState>>) -> Result<Vec<Cycle>, String> {
  let session = current_user(&state.db).await.map_err(|e| e.to_string())?;

  sqlx::query_as::<_, Cycle>(
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
  .map_err(|e| format!("Failed to fetch cycles: {}", e))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
