mod analysis;
mod auth;
mod commands;
mod db;
mod llm;
mod models;
mod tips;

#[cfg(test)]
mod test_utils;

use db::AppState;
use std::sync::Arc;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  tauri::Builder::default()
    .plugin(tauri_plugin_opener::init())
    .setup(|app| {
      // Initialize database
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle).await {
          Ok(pool) => {
            let state = Arc::new(AppState { db: pool });
            app_handle.manage(state);
            println!("Database ready");
          }
          Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Auth commands
      commands::auth::auth_sign_up,
      commands::auth::auth_sign_in,
      commands::auth::auth_sign_out,
      commands::auth::auth_get_status,
      commands::auth::auth_refresh_session,
      // Cycle tracking
      commands::cycles::log_cycle,
      commands::cycles::get_cycles,
      // Symptom logging
      commands::symptoms::log_symptoms,
      commands::symptoms::get_symptom_logs,
      // Profile
      commands::profile::get_profile,
      commands::profile::update_profile,
      // Dashboard & insights
      commands::dashboard::get_dashboard_overview,
      commands::insights::get_insights,
      // AI health assistant
      commands::chat::chat_send,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
