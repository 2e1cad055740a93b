pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod schema;
pub mod store;
pub mod submission;
