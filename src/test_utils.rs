//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seeders for sessions, profiles, cycles and symptom logs
//! - Mock data factories

use crate::auth::AuthSession;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;

pub const TEST_USER_ID: &str = "test-user";
pub const TEST_USER_EMAIL: &str = "test@example.com";

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Seeders
/// ---------------------------------------------------------------------------

/// Seed a signed-in session (and its profile row) for the test user
pub async fn seed_test_session(pool: &SqlitePool) {
  sqlx::query("INSERT INTO profiles (user_id) VALUES (?1) ON CONFLICT(user_id) DO NOTHING")
    .bind(TEST_USER_ID)
    .execute(pool)
    .await
    .expect("Failed to seed profile row");

  sqlx::query(
    r#"
    INSERT OR REPLACE INTO auth_session (id, user_id, email, access_token, refresh_token, expires_at)
    VALUES (1, ?1, ?2, 'test-access', 'test-refresh', ?3)
    "#,
  )
  .bind(TEST_USER_ID)
  .bind(TEST_USER_EMAIL)
  .bind(Utc::now() + Duration::hours(1))
  .execute(pool)
  .await
  .expect("Failed to seed session");
}

/// Fill in the test user's profile fields
pub async fn seed_test_profile(
  pool: &SqlitePool,
  age: Option<i64>,
  typical_cycle_length: Option<i64>,
) {
  sqlx::query(
    r#"
    UPDATE profiles SET age = ?1, typical_cycle_length = ?2, updated_at = CURRENT_TIMESTAMP
    WHERE user_id = ?3
    "#,
  )
  .bind(age)
  .bind(typical_cycle_length)
  .bind(TEST_USER_ID)
  .execute(pool)
  .await
  .expect("Failed to seed profile");
}

/// Seed two closed cycles in early 2024 (lengths 4 and 6, average 5)
pub async fn seed_test_cycles(pool: &SqlitePool) {
  let cycles = [
    ("2024-02-01", "2024-02-05", 4_i64),
    ("2024-01-01", "2024-01-07", 6_i64),
  ];

  for (start, end, length) in cycles {
    sqlx::query(
      r#"
      INSERT INTO cycles (user_id, start_date, end_date, cycle_length)
      VALUES (?1, ?2, ?3, ?4)
      "#,
    )
    .bind(TEST_USER_ID)
    .bind(start)
    .bind(end)
    .bind(length)
    .execute(pool)
    .await
    .expect("Failed to seed cycle");
  }
}

/// Seed `count` daily symptom logs, one per day starting 2024-01-10
pub async fn seed_test_symptom_logs(pool: &SqlitePool, count: usize) {
  let first = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

  for i in 0..count {
    let log_date = first + Duration::days(i as i64);

    sqlx::query(
      r#"
      INSERT INTO symptom_logs (user_id, log_date, mood, cramps_severity, fatigue_level)
      VALUES (?1, ?2, 'neutral', ?3, ?4)
      "#,
    )
    .bind(TEST_USER_ID)
    .bind(log_date)
    .bind((i % 10) as i64)
    .bind(((i + 3) % 10) as i64)
    .execute(pool)
    .await
    .expect("Failed to seed symptom log");
  }
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a mock auth session for testing
pub fn mock_session(user_id: &str) -> AuthSession {
  AuthSession {
    user_id: user_id.to_string(),
    email: Some(TEST_USER_EMAIL.to_string()),
    access_token: "mock-access".to_string(),
    refresh_token: "mock-refresh".to_string(),
    expires_at: Utc::now() + Duration::hours(1),
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('profiles', 'cycles', 'symptom_logs', 'auth_session')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seeders_insert_expected_rows() {
    let pool = setup_test_db().await;

    seed_test_session(&pool).await;
    seed_test_cycles(&pool).await;
    seed_test_symptom_logs(&pool, 4).await;

    let cycles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cycles")
      .fetch_one(&pool)
      .await
      .unwrap();
    let logs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM symptom_logs")
      .fetch_one(&pool)
      .await
      .unwrap();

    assert_eq!(cycles, 2);
    assert_eq!(logs, 4);

    teardown_test_db(pool).await;
  }
}
