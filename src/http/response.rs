//! HTTP response building module
//!
//! Turns rendered pages into hyper responses and builds the fixed
//! method-handling responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::logger::{self, writer::LogWriter};

/// Methods this server answers
pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build a response carrying a rendered body
///
/// HEAD requests keep the GET headers (including `Content-Length`) but send
/// no body.
pub fn build_body_response(
    log: &LogWriter,
    status: StatusCode,
    content_type: &str,
    content: String,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(log, status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(log: &LogWriter) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain")
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error(log, "405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response
pub fn build_options_response(log: &LogWriter) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(log, "OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(log: &LogWriter, status: &str, error: &hyper::http::Error) {
    logger::log_error(log, &format!("Failed to build {status} response: {error}"));
}
