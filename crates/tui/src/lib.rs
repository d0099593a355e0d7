pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use justdoit_core as core;
pub use justdoit_core::capture;
pub use justdoit_core::database as db;
pub use justdoit_core::model;

pub use justdoit_core::AppConfig;
