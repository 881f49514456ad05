use crate::auth::{self, AuthConfig, AuthError, AuthSession};
use crate::db::{AppState, DbPool};
use serde::Serialize;
use std::sync::Arc;
use tauri::State;

/// ---------------------------------------------------------------------------
/// Session Persistence
/// ---------------------------------------------------------------------------

pub async fn save_session(db: &DbPool, session: &AuthSession) -> Result<(), AuthError> {
  sqlx::query(
    r#"
    INSERT INTO auth_session (id, user_id, email, access_token, refresh_token, expires_at)
    VALUES (1, ?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(id) DO UPDATE SET
      user_id = excluded.user_id,
      email = excluded.email,
      access_token = excluded.access_token,
      refresh_token = excluded.refresh_token,
      expires_at = excluded.expires_at
    "#,
  )
  .bind(&session.user_id)
  .bind(&session.email)
  .bind(&session.access_token)
  .bind(&session.refresh_token)
  .bind(session.expires_at)
  .execute(db)
  .await
  .map_err(|e| AuthError::Database(e.to_string()))?;

  Ok(())
}

pub async fn load_session(db: &DbPool) -> Result<Option<AuthSession>, AuthError> {
  let row: Option<AuthSession> = sqlx::query_as(
    "SELECT user_id, email, access_token, refresh_token, expires_at FROM auth_session WHERE id = 1",
  )
  .fetch_optional(db)
  .await
  .map_err(|e| AuthError::Database(e.to_string()))?;

  Ok(row)
}

pub async fn clear_session(db: &DbPool) -> Result<(), AuthError> {
  sqlx::query("DELETE FROM auth_session WHERE id = 1")
    .execute(db)
    .await
    .map_err(|e| AuthError::Database(e.to_string()))?;

  Ok(())
}

/// Resolve the signed-in user for store-backed commands.
pub async fn current_user(db: &DbPool) -> Result<AuthSession, AuthError> {
  load_session(db).await?.ok_or(AuthError::NotAuthenticated)
}

/// Make sure a profile row exists for the user so partial updates and
/// lookups have something to land on.
async fn ensure_profile_row(db: &DbPool, user_id: &str) -> Result<(), AuthError> {
  sqlx::query("INSERT INTO profiles (user_id) VALUES (?1) ON CONFLICT(user_id) DO NOTHING")
    .bind(user_id)
    .execute(db)
    .await
    .map_err(|e| AuthError::Database(e.to_string()))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Auth Commands
/// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct AuthStatus {
  pub is_authenticated: bool,
  pub email: Option<String>,
  pub expires_at: Option<String>,
  pub needs_refresh: bool,
}

#[tauri::command]
pub async fn auth_sign_up(
  email: String,
  password: String,
  state: State<'_, Arc<AppState>>,
) -> Result<AuthStatus, AuthError> {
  let config = AuthConfig::from_env()?;

  match auth::sign_up(&config, &email, &password).await? {
    Some(session) => {
      ensure_profile_row(&state.db, &session.user_id).await?;
      save_session(&state.db, &session).await?;
      Ok(AuthStatus {
        is_authenticated: true,
        email: session.email,
        expires_at: Some(session.expires_at.to_rfc3339()),
        needs_refresh: false,
      })
    }
    // Account created but email confirmation is pending
    None => Ok(AuthStatus {
      is_authenticated: false,
      email: Some(email),
      expires_at: None,
      needs_refresh: false,
    }),
  }
}

#[tauri::command]
pub async fn auth_sign_in(
  email: String,
  password: String,
  state: State<'_, Arc<AppState>>,
) -> Result<AuthStatus, AuthError> {
  let config = AuthConfig::from_env()?;
  let session = auth::sign_in(&config, &email, &password).await?;

  ensure_profile_row(&state.db, &session.user_id).await?;
  save_session(&state.db, &session).await?;

  println!("Signed in as {}", session.user_id);

  Ok(AuthStatus {
    is_authenticated: true,
    email: session.email,
    expires_at: Some(session.expires_at.to_rfc3339()),
    needs_refresh: false,
  })
}

#[tauri::command]
pub async fn auth_sign_out(state: State<'_, Arc<AppState>>) -> Result<(), AuthError> {
  clear_session(&state.db).await?;
  println!("Signed out");
  Ok(())
}

#[tauri::command]
pub async fn auth_get_status(state: State<'_, Arc<AppState>>) -> Result<AuthStatus, AuthError> {
  match load_session(&state.db).await? {
    Some(session) => Ok(AuthStatus {
      is_authenticated: true,
      email: session.email.clone(),
      expires_at: Some(session.expires_at.to_rfc3339()),
      needs_refresh: session.needs_refresh(),
    }),
    None => Ok(AuthStatus {
      is_authenticated: false,
      email: None,
      expires_at: None,
      needs_refresh: false,
    }),
  }
}

#[tauri::command]
pub async fn auth_refresh_session(state: State<'_, Arc<AppState>>) -> Result<(), AuthError> {
  let config = AuthConfig::from_env()?;

  let existing = current_user(&state.db).await?;
  let refreshed = auth::refresh_session(&config, &existing.refresh_token).await?;
  save_session(&state.db, &refreshed).await?;

  println!("Session refreshed");
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
