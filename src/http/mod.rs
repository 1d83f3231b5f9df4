//! HTTP protocol layer module
//!
//! Response builders shared by the request handler, decoupled from routing.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_500_response, build_payload_response, JSON_CONTENT_TYPE,
};
