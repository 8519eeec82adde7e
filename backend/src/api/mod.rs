//! HTTP API module.
//!
//! The server and the JSON documents it answers with.

pub mod server;
pub mod types;

pub use server::{router, serve, start_server};
pub use types::*;
