//! Request handler module
//!
//! Classifies the caller, picks one of the three diagnostic pages and
//! renders it.

pub mod context;
pub mod render;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
