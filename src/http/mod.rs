//! HTTP protocol layer module
//!
//! Response builders shared by the request handler, kept apart from the
//! page rendering logic.

pub mod response;

// Re-export commonly used builders
pub use response::{build_405_response, build_body_response, build_options_response};
