pub mod config_manager;
pub mod types;
