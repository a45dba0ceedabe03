//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.
//! Molecular structure formats come first; the viewer fetches them as text
//! but downloads should carry an honest type.

/// Get MIME Content-Type based on file extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Molecular structure formats
        Some("pdb" | "ent") => "chemical/x-pdb",
        Some("cif" | "mmcif") => "chemical/x-mmcif",
        Some("xyz") => "chemical/x-xyz",
        Some("sdf" | "mol") => "chemical/x-mdl-sdfile",

        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // JavaScript/WASM
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Archives
        Some("gz" | "gzip") => "application/gzip",
        Some("zip") => "application/zip",

        // Default
        _ => "application/octet-stream",
    }
}
