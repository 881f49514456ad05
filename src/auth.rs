//! Hosted auth provider client (Supabase GoTrue REST API)
//!
//! Authentication is fully delegated: this module only exchanges
//! credentials for tokens, refreshes them, and models the resulting
//! session. Session persistence lives in `commands::auth`.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

const SESSION_REFRESH_BUFFER_MINUTES: i64 = 5;

#[derive(Debug, Clone)]
pub struct AuthConfig {
  pub project_url: String,
  pub anon_key: String,
}

impl AuthConfig {
  pub fn from_env() -> Result<Self, AuthError> {
    Ok(Self {
      project_url: env::var("SUPABASE_URL")
        .map_err(|_| AuthError::MissingConfig("SUPABASE_URL".into()))?,
      anon_key: env::var("SUPABASE_ANON_KEY")
        .map_err(|_| AuthError::MissingConfig("SUPABASE_ANON_KEY".into()))?,
    })
  }

  /// Endpoint under /auth/v1 with optional grant_type query.
  fn endpoint(&self, path: &str, grant_type: Option<&str>) -> Result<Url, AuthError> {
    let mut url = Url::parse(&self.project_url)
      .and_then(|u| u.join(&format!("auth/v1/{}", path)))
      .map_err(|e| AuthError::Provider(e.to_string()))?;

    if let Some(grant) = grant_type {
      url.query_pairs_mut().append_pair("grant_type", grant);
    }

    Ok(url)
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Invalid email or password")]
  InvalidCredentials,

  #[error("Auth provider error: {0}")]
  Provider(String),

  #[error("Not signed in")]
  NotAuthenticated,

  #[error("Database error: {0}")]
  Database(String),
}

impl Serialize for AuthError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// Error body shapes GoTrue returns across endpoints.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
  error_description: Option<String>,
  msg: Option<String>,
  message: Option<String>,
  error: Option<String>,
}

impl ProviderErrorBody {
  fn into_message(self) -> Option<String> {
    self
      .error_description
      .or(self.msg)
      .or(self.message)
      .or(self.error)
  }
}

/// ---------------------------------------------------------------------------
/// Session Types
/// ---------------------------------------------------------------------------

/// Token payload from the provider's signup / password / refresh endpoints.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
  pub refresh_token: String,
  /// Lifetime in seconds from issuance.
  pub expires_in: i64,
  pub user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
  pub id: String,
  pub email: Option<String>,
}

/// Cached session state
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthSession {
  pub user_id: String,
  pub email: Option<String>,
  pub access_token: String,
  pub refresh_token: String,
  pub expires_at: DateTime<Utc>,
}

impl AuthSession {
  pub fn from_response(resp: TokenResponse) -> Self {
    Self {
      user_id: resp.user.id,
      email: resp.user.email,
      access_token: resp.access_token,
      refresh_token: resp.refresh_token,
      expires_at: Utc::now() + Duration::seconds(resp.expires_in),
    }
  }

  pub fn needs_refresh(&self) -> bool {
    let buffer = Duration::minutes(SESSION_REFRESH_BUFFER_MINUTES);
    Utc::now() + buffer >= self.expires_at
  }
}

/// ---------------------------------------------------------------------------
/// Provider Calls
/// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CredentialsBody<'a> {
  email: &'a str,
  password: &'a str,
}

#[derive(Serialize)]
struct RefreshBody<'a> {
  refresh_token: &'a str,
}

/// Register a new account. Returns a session when the project issues tokens
/// on signup; `None` when it requires email confirmation first.
pub async fn sign_up(
  config: &AuthConfig,
  email: &str,
  password: &str,
) -> Result<Option<AuthSession>, AuthError> {
  let url = config.endpoint("signup", None)?;
  let body = post_json(config, url, &CredentialsBody { email, password }).await?;

  match serde_json::from_str::<TokenResponse>(&body) {
    Ok(resp) => Ok(Some(AuthSession::from_response(resp))),
    // Confirmation-required projects return the bare user object instead
    Err(_) => Ok(None),
  }
}

/// Exchange email + password for a session (password grant).
pub async fn sign_in(
  config: &AuthConfig,
  email: &str,
  password: &str,
) -> Result<AuthSession, AuthError> {
  let url = config.endpoint("token", Some("password"))?;
  let body = post_json(config, url, &CredentialsBody { email, password }).await?;

  let resp: TokenResponse =
    serde_json::from_str(&body).map_err(|e| AuthError::Provider(e.to_string()))?;
  Ok(AuthSession::from_response(resp))
}

/// Trade a refresh token for a fresh session.
pub async fn refresh_session(
  config: &AuthConfig,
  refresh_token: &str,
) -> Result<AuthSession, AuthError> {
  let url = config.endpoint("token", Some("refresh_token"))?;
  let body = post_json(config, url, &RefreshBody { refresh_token }).await?;

  let resp: TokenResponse =
    serde_json::from_str(&body).map_err(|e| AuthError::Provider(e.to_string()))?;
  Ok(AuthSession::from_response(resp))
}

async fn post_json<T: Serialize>(
  config: &AuthConfig,
  url: Url,
  payload: &T,
) -> Result<String, AuthError> {
  let client = Client::new();

  let response = client
    .post(url)
    .header("apikey", &config.anon_key)
    .bearer_auth(&config.anon_key)
    .json(payload)
    .send()
    .await?;

  let status = response.status();
  let body = response.text().await?;

  if !status.is_success() {
    // GoTrue answers 400 on bad credentials for the password grant
    if status == reqwest::StatusCode::BAD_REQUEST
      || status == reqwest::StatusCode::UNAUTHORIZED
    {
      return Err(AuthError::InvalidCredentials);
    }

    let message = serde_json::from_str::<ProviderErrorBody>(&body)
      .ok()
      .and_then(ProviderErrorBody::into_message)
      .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
    return Err(AuthError::Provider(message));
  }

  Ok(body)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
