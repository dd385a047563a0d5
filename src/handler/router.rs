//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, context
//! construction, route selection, rendering and access logging.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::context::{client_ip, ConnectionContext};
use super::render;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Page selected for a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Default,
    Json,
    Network,
}

/// Select the page for a request path
///
/// Any query string is ignored; unknown paths get the default page.
pub fn route(path: &str) -> ResponseKind {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    match path {
        "/json" => ResponseKind::Json,
        "/network" => ResponseKind::Network,
        _ => ResponseKind::Default,
    }
}

/// Main entry point for HTTP request handling
///
/// Generic over the body type since the request body is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();
    let is_head = *method == Method::HEAD;

    let client_address = client_ip(&peer_addr);
    let mut entry = AccessLogEntry::from_request(
        client_address.clone(),
        method,
        uri,
        req.version(),
        req.headers(),
    );

    let (response, body_bytes) = match check_http_method(method, &state) {
        Some(resp) => (resp, 0),
        None => {
            let request_path = uri
                .path_and_query()
                .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
            let ctx = ConnectionContext::new(
                client_address,
                state.host.server_ip.clone(),
                state.server_port,
                request_path,
            );

            let rendered = render::render(&ctx, route(uri.path()), &state).await;
            let size = if is_head { 0 } else { rendered.body.len() };
            let resp = http::build_body_response(
                &state.log,
                rendered.status,
                rendered.content_type,
                rendered.body,
                is_head,
            );
            (resp, size)
        }
    };

    if state.access_log() {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&state.log, &entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, state: &AppState) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(&state.log)),
        _ => {
            logger::log_warning(&state.log, &format!("Method not allowed: {method}"));
            Some(http::build_405_response(&state.log))
        }
    }
}
