//! Page rendering module
//!
//! Produces the status, content type and body for each response kind.

use hyper::StatusCode;
use serde::Serialize;

use super::context::ConnectionContext;
use super::router::ResponseKind;
use crate::config::AppState;
use crate::logger;
use crate::lookup;

pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A rendered response before it is turned into an HTTP message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl Rendered {
    const fn ok(content_type: &'static str, body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body,
        }
    }
}

/// Body of the /json endpoint; field order is the wire order
#[derive(Debug, Serialize)]
struct ConnectionReport<'a> {
    client_ip: &'a str,
    server_ip: &'a str,
    server_port: u16,
    is_local: bool,
    path: &'a str,
}

/// Render the page selected by `kind`
///
/// Only the network page touches the outside world, and its lookup failure
/// is absorbed into the page.
pub async fn render(ctx: &ConnectionContext, kind: ResponseKind, state: &AppState) -> Rendered {
    match kind {
        ResponseKind::Default => Rendered::ok(CONTENT_TYPE_HTML, render_default(ctx)),
        ResponseKind::Json => {
            let body = render_json(ctx).unwrap_or_else(|e| {
                logger::log_error(&state.log, &format!("Failed to serialize report: {e}"));
                "{}".to_string()
            });
            Rendered::ok(CONTENT_TYPE_JSON, body)
        }
        ResponseKind::Network => {
            let public_ip = lookup::resolve_public_ip(state.lookup.as_ref(), &state.log).await;
            Rendered::ok(
                CONTENT_TYPE_HTML,
                render_network(&state.host.hostname, &public_ip, &ctx.server_address),
            )
        }
    }
}

/// Pretty-printed JSON report with two-space indentation
pub fn render_json(ctx: &ConnectionContext) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ConnectionReport {
        client_ip: &ctx.client_address,
        server_ip: &ctx.server_address,
        server_port: ctx.server_port,
        is_local: ctx.is_local(),
        path: &ctx.request_path,
    })
}

/// Diagnostic home page
pub fn render_default(ctx: &ConnectionContext) -> String {
    let (class, heading, description, kind) = if ctx.is_local() {
        (
            "local",
            "📍 Local Access",
            "from within the VPS/local network",
            "Local",
        )
    } else {
        ("remote", "🌍 Remote Access", "remotely", "Remote")
    };
    let client = escape_html(&ctx.client_address);
    let server = escape_html(&ctx.server_address);
    let path = escape_html(&ctx.request_path);
    let port = ctx.server_port;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>VPS Connection Info</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            max-width: 800px;
            margin: 50px auto;
            padding: 20px;
            background-color: #f5f5f5;
        }}
        .container {{
            background: white;
            padding: 30px;
            border-radius: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }}
        h1 {{ color: #333; }}
        .info-box {{
            background: #e8f4fd;
            border-left: 4px solid #2196F3;
            padding: 15px;
            margin: 20px 0;
        }}
        .local {{ border-left-color: #4CAF50; }}
        .remote {{ border-left-color: #FF9800; }}
        .label {{ font-weight: bold; color: #555; }}
        .value {{ color: #333; }}
        table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
        td {{ padding: 10px; border-bottom: 1px solid #ddd; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>🌐 VPS Connection Information</h1>

        <div class="info-box {class}">
            <h2>{heading}</h2>
            <p>You are accessing this server {description}.</p>
        </div>

        <table>
            <tr>
                <td class="label">Your IP Address:</td>
                <td class="value">{client}</td>
            </tr>
            <tr>
                <td class="label">Server IP:</td>
                <td class="value">{server}</td>
            </tr>
            <tr>
                <td class="label">Server Port:</td>
                <td class="value">{port}</td>
            </tr>
            <tr>
                <td class="label">Request Path:</td>
                <td class="value">{path}</td>
            </tr>
            <tr>
                <td class="label">Connection Type:</td>
                <td class="value">{kind}</td>
            </tr>
        </table>

        <h3>Quick Links:</h3>
        <p>
            <a href="/">Home</a> |
            <a href="/json">JSON Data</a> |
            <a href="/network">Network Info</a>
        </p>

        <div style="margin-top: 30px; padding: 15px; background: #f9f9f9; border-radius: 5px;">
            <small>
                <strong>Note:</strong> To access this from internet, ensure:<br>
                1. VPS firewall allows port {port}<br>
                2. Port is forwarded if behind NAT<br>
                3. Use your VPS public IP: <code>{server}</code>
            </small>
        </div>
    </div>
</body>
</html>"#
    )
}

/// Network information page
pub fn render_network(hostname: &str, public_ip: &str, local_ip: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Network Info</title></head>
<body>
    <h1>Network Information</h1>
    <p><strong>Server Hostname:</strong> {}</p>
    <p><strong>Public IP:</strong> {}</p>
    <p><strong>Local IP:</strong> {}</p>
    <a href="/">Back to Home</a>
</body>
</html>"#,
        escape_html(hostname),
        escape_html(public_ip),
        escape_html(local_ip),
    )
}

/// Escape text for inclusion in HTML element content or attributes
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
