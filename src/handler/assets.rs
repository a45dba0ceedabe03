//! File serving module
//!
//! Loads protein structure files and viewer assets from their base
//! directories and builds the responses, including conditional GET.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of resolving a validated relative path against a base directory
#[derive(Debug)]
enum Resolution {
    /// Canonical path of an existing file inside the base directory
    Found(PathBuf),
    /// Nothing at that name
    NotFound,
    /// Resolves outside the base directory (symlink pointing out)
    Outside,
}

/// Serve a protein structure file from the data directory
///
/// `raw_name` is the undecoded path segment after `/protein/`. It must
/// decode to a single plain filename; anything else is refused before the
/// filesystem is consulted.
pub async fn serve_protein(
    ctx: &RequestContext<'_>,
    data_dir: &str,
    raw_name: &str,
) -> Response<Full<Bytes>> {
    let Some(name) = path::sanitize_filename(raw_name) else {
        logger::log_traversal_blocked(ctx.path);
        return http::build_403_response();
    };

    serve_resolved(ctx, data_dir, Path::new(&name)).await
}

/// Serve a viewer asset from the static directory
///
/// `raw_path` is the undecoded remainder after `/static/` (or a favicon
/// filename). Subdirectories are allowed; every component must be normal.
pub async fn serve_asset(
    ctx: &RequestContext<'_>,
    static_dir: &str,
    raw_path: &str,
) -> Response<Full<Bytes>> {
    let Some(relative) = path::sanitize_relative_path(raw_path) else {
        logger::log_traversal_blocked(ctx.path);
        return http::build_403_response();
    };

    serve_resolved(ctx, static_dir, &relative).await
}

/// Resolve, load, and respond for an already-validated relative path
async fn serve_resolved(
    ctx: &RequestContext<'_>,
    base_dir: &str,
    relative: &Path,
) -> Response<Full<Bytes>> {
    match resolve_in_dir(base_dir, relative) {
        Resolution::Found(file_path) => match fs::read(&file_path).await {
            Ok(content) => {
                let content_type =
                    mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
                build_file_response(&content, content_type, ctx)
            }
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read file '{}': {}",
                    file_path.display(),
                    e
                ));
                http::build_404_response()
            }
        },
        Resolution::NotFound => http::build_404_response(),
        Resolution::Outside => {
            logger::log_traversal_blocked(ctx.path);
            http::build_403_response()
        }
    }
}

/// Canonicalize `base_dir`/`relative` and check containment
///
/// `relative` has already passed component validation, so the only way the
/// canonical result can leave the base directory is a symlink inside it.
fn resolve_in_dir(base_dir: &str, relative: &Path) -> Resolution {
    let base_canonical = match Path::new(base_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Base directory not found or inaccessible '{base_dir}': {e}"
            ));
            return Resolution::NotFound;
        }
    };

    let candidate = base_canonical.join(relative);

    // Missing files are common (404), not worth a warning
    let Ok(resolved) = candidate.canonicalize() else {
        return Resolution::NotFound;
    };

    if !resolved.starts_with(&base_canonical) {
        return Resolution::Outside;
    }

    if !resolved.is_file() {
        return Resolution::NotFound;
    }

    Resolution::Found(resolved)
}

/// Build the file response with `ETag` and conditional GET support
fn build_file_response(
    data: &[u8],
    content_type: &str,
    ctx: &RequestContext<'_>,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_file_response(
        Bytes::from(data.to_owned()),
        content_type,
        &etag,
        ctx.is_head,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
        }
    }

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("6lcw.pdb"), b"ATOM      1  N   MET A   1").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_serve_existing_protein_file() {
        let dir = data_dir();
        let resp = serve_protein(
            &ctx("/protein/6lcw.pdb"),
            dir.path().to_str().unwrap(),
            "6lcw.pdb",
        )
        .await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "chemical/x-pdb");
        assert_eq!(resp.headers()["Content-Length"], "26");
        assert!(resp.headers().contains_key("ETag"));

        // The body must be the file's bytes, unmodified
        assert_eq!(
            body_bytes(resp).await.as_ref(),
            b"ATOM      1  N   MET A   1"
        );
    }

    #[tokio::test]
    async fn test_serve_missing_protein_file() {
        let dir = data_dir();
        let resp = serve_protein(
            &ctx("/protein/nope.pdb"),
            dir.path().to_str().unwrap(),
            "nope.pdb",
        )
        .await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let dir = data_dir();
        for raw in ["..", "..%2f..%2fetc%2fpasswd", "a%2Fb.pdb", "%2e%2e"] {
            let resp = serve_protein(&ctx("/protein/x"), dir.path().to_str().unwrap(), raw).await;
            assert_eq!(resp.status(), 403, "raw name {raw} must be refused");
        }
    }

    #[tokio::test]
    async fn test_missing_base_dir_is_404() {
        let resp = serve_protein(&ctx("/protein/a.pdb"), "no-such-dir", "a.pdb").await;
        assert_eq!(resp.status(), 404);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_is_forbidden() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.pdb"), b"HETATM").unwrap();

        let dir = data_dir();
        std::os::unix::fs::symlink(
            outside.path().join("secret.pdb"),
            dir.path().join("link.pdb"),
        )
        .unwrap();

        let resp = serve_protein(
            &ctx("/protein/link.pdb"),
            dir.path().to_str().unwrap(),
            "link.pdb",
        )
        .await;
        assert_eq!(resp.status(), 403);
    }

    #[tokio::test]
    async fn test_conditional_get_returns_304() {
        let dir = data_dir();
        let first = serve_protein(
            &ctx("/protein/6lcw.pdb"),
            dir.path().to_str().unwrap(),
            "6lcw.pdb",
        )
        .await;
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let second = serve_protein(
            &RequestContext {
                path: "/protein/6lcw.pdb",
                is_head: false,
                if_none_match: Some(etag),
            },
            dir.path().to_str().unwrap(),
            "6lcw.pdb",
        )
        .await;
        assert_eq!(second.status(), 304);
    }

    #[tokio::test]
    async fn test_serve_asset_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js/main.js"), b"// viewer").unwrap();

        let resp = serve_asset(
            &ctx("/static/js/main.js"),
            dir.path().to_str().unwrap(),
            "js/main.js",
        )
        .await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/javascript");
        assert_eq!(body_bytes(resp).await.as_ref(), b"// viewer");

        let resp = serve_asset(
            &ctx("/static/js/../../x"),
            dir.path().to_str().unwrap(),
            "js/../../x",
        )
        .await;
        assert_eq!(resp.status(), 403);
    }
}
