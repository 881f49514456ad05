use crate::analysis::{self, CycleOverview, NextPeriod, DEFAULT_CYCLE_LENGTH};
use crate::commands::auth::current_user;
use crate::db::AppState;
use crate::models::Cycle;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tauri::State;

/// ---------------------------------------------------------------------------
/// Dashboard Overview
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DashboardOverview {
  pub average_cycle_length: Option<i64>,
  pub logs_this_month: i64,
  pub next_period: NextPeriod,
  pub next_period_label: String,
}

/// Assemble the dashboard: fetch the user's snapshot, read the clock once,
/// and hand everything to the pure calculator.
#[tauri::command]
pub async fn get_dashboard_overview(
  state: State<'_, Arc<AppState>>,
) -> Result<DashboardOverview, String> {
  let session = current_user(&state.db).await.map_err(|e| e.to_string())?;

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

  let typical_cycle_length = sqlx::query_scalar::<_, Option<i64>>(
    "SELECT typical_cycle_length FROM profiles WHERE user_id = ?1",
  )
  .bind(&session.user_id)
  .fetch_optional(&state.db)
  .await
  .map_err(|e| format!("Failed to get profile: {}", e))?
  .flatten()
  .unwrap_or(DEFAULT_CYCLE_LENGTH);

  let log_dates: Vec<NaiveDate> =
    sqlx::query_scalar("SELECT log_date FROM symptom_logs WHERE user_id = ?1")
      .bind(&session.user_id)
      .fetch_all(&state.db)
      .await
      .map_err(|e| format!("Failed to fetch symptom logs: {}", e))?;

  // The only clock read; the calculator itself stays deterministic
  let today = chrono::Local::now().date_naive();

  let overview = CycleOverview::compute(&cycles, &log_dates, typical_cycle_length, today);
  let next_period_label = analysis::next_period_label(&overview.next_period);

  Ok(DashboardOverview {
    average_cycle_length: overview.average_cycle_length,
    logs_this_month: overview.logs_this_month,
    next_period: overview.next_period,
    next_period_label,
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
