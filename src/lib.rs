#![doc = "The `tasktrek` library crate."]
#![doc = ""]
#![doc = "Contains the session core (password hashing, token codec and request"]
#![doc = "authentication), the domain models, the document store, routing and error"]
#![doc = "handling. The binary (`main.rs`) wires these into an HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
