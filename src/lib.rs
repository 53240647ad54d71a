pub mod api;
pub mod app;
pub mod bootstrap;
pub mod cloudant;
pub mod config;
pub mod error;
pub mod handlers;
