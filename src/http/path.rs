//! URL path safety module
//!
//! Percent-decoding and filename validation for file-serving routes.
//!
//! Safety is by construction: a requested name is only ever joined onto a
//! base directory after it has been decoded and shown to consist purely of
//! normal path components. There is no blacklist to sidestep. Resolution is
//! still double-checked against the canonicalized base directory afterwards
//! (symlinks inside the tree can point anywhere).

use std::path::{Component, Path, PathBuf};

/// Decode percent-escapes in a URL path segment
///
/// Returns `None` for truncated or non-hex escapes and for sequences that do
/// not decode to valid UTF-8. `+` stays literal; that convention belongs to
/// query strings, not paths.
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_val(*bytes.get(i + 1)?)?;
            let lo = hex_val(*bytes.get(i + 2)?)?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

const fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Validate a protein file name: one plain filename, nothing else
///
/// Decodes percent-escapes, then requires the result to be a single normal
/// path component. Separators (either flavor), `.`, `..`, NUL bytes, empty
/// names, and absolute paths all fail.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let decoded = percent_decode(raw)?;

    if decoded.is_empty() || decoded.contains(['/', '\\', '\0']) {
        return None;
    }

    // Path::components normalizes; exactly one Normal component means the
    // name cannot address anything but a direct child of the base directory.
    let mut components = Path::new(&decoded).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(decoded),
        _ => None,
    }
}

/// Validate a relative asset path: normal components only
///
/// Used for the static asset route where subdirectories are legitimate.
/// Empty segments (from `//`) are tolerated and skipped; any `.`/`..`/root
/// component fails.
pub fn sanitize_relative_path(raw: &str) -> Option<PathBuf> {
    let decoded = percent_decode(raw)?;

    if decoded.contains(['\\', '\0']) {
        return None;
    }

    let mut out = PathBuf::new();
    for component in Path::new(&decoded).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if out.as_os_str().is_empty() {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode_plain() {
        assert_eq!(percent_decode("6lcw.pdb").as_deref(), Some("6lcw.pdb"));
        assert_eq!(percent_decode("a%20b").as_deref(), Some("a b"));
        assert_eq!(percent_decode("%2e%2e").as_deref(), Some(".."));
    }

    #[test]
    fn test_percent_decode_rejects_bad_escapes() {
        assert!(percent_decode("%").is_none());
        assert!(percent_decode("%2").is_none());
        assert!(percent_decode("%zz").is_none());
        assert!(percent_decode("%ff").is_none()); // invalid UTF-8
    }

    #[test]
    fn test_percent_decode_keeps_plus() {
        assert_eq!(percent_decode("a+b.pdb").as_deref(), Some("a+b.pdb"));
    }

    #[test]
    fn test_sanitize_filename_accepts_plain_names() {
        assert_eq!(sanitize_filename("6lcw.pdb").as_deref(), Some("6lcw.pdb"));
        assert_eq!(sanitize_filename("model_1.cif").as_deref(), Some("model_1.cif"));
        assert_eq!(sanitize_filename("with space.pdb").as_deref(), Some("with space.pdb"));
    }

    #[test]
    fn test_sanitize_filename_rejects_traversal() {
        assert!(sanitize_filename("..").is_none());
        assert!(sanitize_filename("../secret.pdb").is_none());
        assert!(sanitize_filename("..%2f..%2fetc%2fpasswd").is_none());
        assert!(sanitize_filename("%2e%2e%2fetc%2fpasswd").is_none());
        assert!(sanitize_filename("a/b.pdb").is_none());
        assert!(sanitize_filename("a%2Fb.pdb").is_none());
        assert!(sanitize_filename("a\\b.pdb").is_none());
        assert!(sanitize_filename("/etc/passwd").is_none());
    }

    #[test]
    fn test_sanitize_filename_rejects_degenerate_names() {
        assert!(sanitize_filename("").is_none());
        assert!(sanitize_filename(".").is_none());
        assert!(sanitize_filename("a%00.pdb").is_none());
    }

    #[test]
    fn test_sanitize_relative_path() {
        assert_eq!(
            sanitize_relative_path("js/main.js"),
            Some(PathBuf::from("js/main.js"))
        );
        assert_eq!(
            sanitize_relative_path("./js//main.js"),
            Some(PathBuf::from("js/main.js"))
        );
        assert!(sanitize_relative_path("../main.js").is_none());
        assert!(sanitize_relative_path("js/../../main.js").is_none());
        assert!(sanitize_relative_path("js%2f..%2f..%2fmain.js").is_none());
        assert!(sanitize_relative_path("/abs/main.js").is_none());
        assert!(sanitize_relative_path("").is_none());
    }
}
