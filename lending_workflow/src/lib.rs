pub mod account;
pub mod blockchain_manager;
pub mod config;
pub mod utils;
pub mod workflow;
