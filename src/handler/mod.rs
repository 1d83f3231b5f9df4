//! Request handler module
//!
//! Responsible for routing a request to the payload or to 404.

pub mod payload;
pub mod router;

// Re-export main entry point
pub use payload::PayloadError;
pub use router::handle_request;
