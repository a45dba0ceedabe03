//! Request handling module
//!
//! Routes requests to the landing page, protein files, and viewer assets.

pub mod assets;
pub mod pages;
pub mod router;

pub use router::handle_request;
