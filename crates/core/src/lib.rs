pub mod capture;
pub mod commands;
pub mod config;
pub mod database;
pub mod model;
pub mod services;

pub use capture::{CaptureError, TaskInput};
pub use commands::{complete_tasks, delete_tasks};
pub use config::AppConfig;
pub use database::Database;
pub use model::*;
pub use services::{TasksService, ViewSnapshot};
