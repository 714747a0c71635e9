//! HTTP API module.
//!
//! The proof relay: accepts proofs from the web frontend and forwards them
//! to the configured notification endpoint.

pub mod server;
pub mod types;

pub use server::{router, start_server};
pub use types::*;
