//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, dispatch, and access logging.

use crate::config::AppState;
use crate::handler::{assets, pages};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed by file handlers
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Recognized routes
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    /// `GET /` - the viewer landing page
    Index,
    /// `GET /protein/<filename>` - structure file by name
    Protein(&'a str),
    /// `GET /static/<path>` - viewer asset
    StaticAsset(&'a str),
    /// Favicon, served as a static asset
    Favicon(&'a str),
    /// Liveness/readiness probes
    Health,
    NotFound,
}

/// Match a request path against the route table
///
/// Returned segments are still percent-encoded; decoding and validation
/// belong to the file handlers.
fn match_route(path: &str) -> Route<'_> {
    match path {
        "/" => Route::Index,
        "/healthz" | "/readyz" => Route::Health,
        "/favicon.ico" | "/favicon.svg" => Route::Favicon(&path[1..]),
        _ => {
            if let Some(rest) = path.strip_prefix("/protein/") {
                if rest.is_empty() {
                    Route::NotFound
                } else {
                    Route::Protein(rest)
                }
            } else if let Some(rest) = path.strip_prefix("/static/") {
                if rest.is_empty() {
                    Route::NotFound
                } else {
                    Route::StaticAsset(rest)
                }
            } else {
                Route::NotFound
            }
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let start = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let http_version = version_str(req.version());
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    let response = dispatch(&req, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = http_version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response_body_bytes(&response, method == Method::HEAD);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Validate the request and dispatch to the matched route
async fn dispatch(
    req: &Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    // 2. Check declared body size
    if let Some(resp) = check_body_size(req, state.config.http.max_body_size) {
        return resp;
    }

    let ctx = RequestContext {
        path,
        is_head,
        if_none_match: header_string(req, "if-none-match"),
    };

    let files = &state.config.files;
    match match_route(path) {
        Route::Index => http::response::build_html_response(pages::INDEX_HTML, ctx.is_head),
        Route::Protein(raw_name) => assets::serve_protein(&ctx, &files.data_dir, raw_name).await,
        Route::StaticAsset(raw_path) | Route::Favicon(raw_path) => {
            assets::serve_asset(&ctx, &files.static_dir, raw_path).await
        }
        Route::Health => http::build_health_response("ok"),
        Route::NotFound => http::build_404_response(),
    }
}

/// Check HTTP method and return a response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate the Content-Length header and return 413 if exceeded
///
/// Requests to this server never carry a payload, so the limit is tight.
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let size_str = req.headers().get("content-length")?.to_str().ok()?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::response::build_413_response())
        }
        _ => None,
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

/// Body bytes for the access log, taken from the Content-Length header
fn response_body_bytes(response: &Response<Full<Bytes>>, is_head: bool) -> usize {
    if is_head {
        return 0;
    }
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_route_basics() {
        assert_eq!(match_route("/"), Route::Index);
        assert_eq!(match_route("/healthz"), Route::Health);
        assert_eq!(match_route("/readyz"), Route::Health);
        assert_eq!(match_route("/favicon.svg"), Route::Favicon("favicon.svg"));
        assert_eq!(match_route("/protein/6lcw.pdb"), Route::Protein("6lcw.pdb"));
        assert_eq!(match_route("/static/js/main.js"), Route::StaticAsset("js/main.js"));
    }

    #[test]
    fn test_match_route_misses() {
        assert_eq!(match_route("/protein"), Route::NotFound);
        assert_eq!(match_route("/protein/"), Route::NotFound);
        assert_eq!(match_route("/static/"), Route::NotFound);
        assert_eq!(match_route("/proteins/6lcw.pdb"), Route::NotFound);
        assert_eq!(match_route("/anything"), Route::NotFound);
    }

    #[test]
    fn test_traversal_segment_stays_encoded() {
        // match_route must not decode; the handler validates the raw segment
        assert_eq!(
            match_route("/protein/..%2f..%2fetc%2fpasswd"),
            Route::Protein("..%2f..%2fetc%2fpasswd")
        );
    }

    #[test]
    fn test_method_check() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());

        let resp = check_http_method(&Method::OPTIONS, false).unwrap();
        assert_eq!(resp.status(), 204);

        let resp = check_http_method(&Method::POST, false).unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[test]
    fn test_version_str() {
        assert_eq!(version_str(Version::HTTP_10), "1.0");
        assert_eq!(version_str(Version::HTTP_11), "1.1");
        assert_eq!(version_str(Version::HTTP_2), "2");
    }
}
