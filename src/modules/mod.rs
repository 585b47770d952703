// Declare all modules
pub mod account;
pub mod auth;
pub mod jobs;
pub mod storage;
pub mod utils;

// No re-exports here as they're handled in lib.rs
