pub mod auth;
pub mod chat;
pub mod cycles;
pub mod dashboard;
pub mod insights;
pub mod profile;
pub mod symptoms;
