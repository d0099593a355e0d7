pub use justdoit_tui::cli;
pub use justdoit_tui::commands;
pub use justdoit_tui::config;
pub use justdoit_tui::logging;
pub use justdoit_tui::tui;
pub use justdoit_tui::AppConfig;

pub use justdoit_core as core;
pub use justdoit_core::capture;
pub use justdoit_core::database as db;
pub use justdoit_core::model;
