//! HTTP utilities module
//!
//! MIME detection, conditional-request support, path safety, and response builders.

pub mod cache;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_403_response, build_404_response, build_405_response,
    build_health_response, build_options_response,
};
