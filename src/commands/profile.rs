use crate::commands::auth::current_user;
use crate::db::AppState;
use crate::models::Profile;
use std::sync::Arc;
use tauri::State;

/// ---------------------------------------------------------------------------
/// Profile Commands
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_profile(state: State<'_, Arc<AppState>>) -> Result<Profile, String> {
  let session = current_user(&state.db).await.map_err(|e| e.to_string())?;

  let row: Option<Profile> = sqlx::query_as(
    r#"
    SELECT user_id, full_name, age, typical_cycle_length, medical_notes,
           created_at, updated_at
    FROM profiles
    WHERE user_id = ?1
    "#,
  )
  .bind(&session.user_id)
  .fetch_optional(&state.db)
  .await
  .map_err(|e| format!("Failed to get profile: {}", e))?;

  Ok(row.unwrap_or_else(|| Profile::empty(&session.user_id)))
}

/// Partial update: absent fields keep their current value.
#[tauri::command]
pub async fn update_profile(
  full_name: Option<String>,
  age: Option<i64>,
  typical_cycle_length: Option<i64>,
  medical_notes: Option<String>,
  state: State<'_, Arc<AppState>>,
) -> Result<(), String> {
  let session = current_user(&state.db).await.map_err(|e| e.to_string())?;

  sqlx::query(
    r#"
    INSERT INTO profiles (user_id, full_name, age, typical_cycle_length, medical_notes)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(user_id) DO UPDATE SET
      full_name = COALESCE(?2, full_name),
      age = COALESCE(?3, age),
      typical_cycle_length = COALESCE(?4, typical_cycle_length),
      medical_notes = COALESCE(?5, medical_notes),
      updated_at = CURRENT_TIMESTAMP
    "#,
  )
  .bind(&session.user_id)
  .bind(full_name)
  .bind(age)
  .bind(typical_cycle_length)
  .bind(medical_notes)
  .execute(&state.db)
  .await
  .map_err(|e| format!("Failed to update profile: {}", e))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
