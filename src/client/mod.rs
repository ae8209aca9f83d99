pub mod client_manager;
pub mod credentials;
pub mod transcriber;
pub mod translator;
