//! HTTP response building module
//!
//! Provides builders for the status codes this server emits, decoupled from
//! route logic. Builders never fail outward; a malformed header would be a
//! programming error, logged and papered over with an empty response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 403 Forbidden response
///
/// Used when a requested name fails validation or resolves outside the base
/// directory.
pub fn build_403_response() -> Response<Full<Bytes>> {
    build_error_response(403, "403 Forbidden")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_error_response(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Content-Length", "405 Method Not Allowed".len())
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_error_response(413, "413 Payload Too Large")
}

/// Build a plain-text error response
///
/// Content-Length is set explicitly so access-log byte counts stay accurate.
fn build_error_response(status: u16, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(body, &e);
            Response::new(Full::new(Bytes::from_static(body.as_bytes())))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health check response
pub fn build_health_response(status: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Content-Length", status.len())
        .body(Full::new(Bytes::from(status)))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(content.as_bytes())
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build success response for a file body, with `ETag` for conditional GET
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_response_headers() {
        let resp = build_file_response(
            Bytes::from_static(b"ATOM"),
            "chemical/x-pdb",
            "\"abc\"",
            false,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "chemical/x-pdb");
        assert_eq!(resp.headers()["Content-Length"], "4");
        assert_eq!(resp.headers()["ETag"], "\"abc\"");
    }

    #[test]
    fn test_head_response_keeps_length() {
        let resp = build_file_response(
            Bytes::from_static(b"ATOM"),
            "chemical/x-pdb",
            "\"abc\"",
            true,
        );
        assert_eq!(resp.headers()["Content-Length"], "4");
    }

    #[test]
    fn test_html_response() {
        let resp = build_html_response("<html>viewer</html>", false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(resp.headers()["Content-Length"], "19");
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(build_403_response().status(), 403);
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_405_response().status(), 405);
        assert_eq!(build_405_response().headers()["Allow"], "GET, HEAD, OPTIONS");
        assert_eq!(build_413_response().status(), 413);
        assert_eq!(build_options_response(false).status(), 204);
    }

    #[test]
    fn test_error_responses_declare_body_length() {
        assert_eq!(build_403_response().headers()["Content-Length"], "13");
        assert_eq!(build_404_response().headers()["Content-Length"], "13");
        assert_eq!(build_405_response().headers()["Content-Length"], "22");
        assert_eq!(build_413_response().headers()["Content-Length"], "21");
    }

    #[test]
    fn test_cors_preflight() {
        let resp = build_options_response(true);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    }
}
