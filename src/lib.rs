pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod parser;
pub mod server;
pub mod teams;
pub mod types;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;
