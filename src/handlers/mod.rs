pub mod script;
pub mod transcribe_handler;
pub mod upload;
pub mod utils;
