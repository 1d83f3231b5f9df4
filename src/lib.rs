//! Mock OAuth2 token-introspection endpoint.
//!
//! Answers GET and POST on a single configured route with the bytes of a
//! payload file, tagged `application/json`, and 404 for everything else.
//! The payload is re-read on every request.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use crate::config::Config;
pub use crate::server::{BoundResponder, Responder};
