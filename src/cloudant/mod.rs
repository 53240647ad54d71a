pub mod auth;
pub mod client;
pub mod store;

pub use client::CloudantClient;
pub use store::{CloudantError, DatabaseCreated, DocumentStore};
