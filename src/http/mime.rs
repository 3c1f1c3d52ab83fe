//! MIME type lookup
//!
//! Maps a file path's extension to a Content-Type. Unknown or missing
//! extensions map to [`UNKNOWN_TYPE`], so a file response always has a type.

use std::path::Path;

/// Type reported for extensions outside the table
pub const UNKNOWN_TYPE: &str = "application/octet-stream";

/// Content-Type for a path, based on its extension (case-insensitive)
pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(UNKNOWN_TYPE, |ext| lookup(&ext.to_ascii_lowercase()))
}

fn lookup(extension: &str) -> &'static str {
    match extension {
        // Text
        "html" | "htm" | "shtml" => "text/html",
        "css" => "text/css",
        "txt" | "text" | "conf" | "log" | "ini" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "xml" => "application/xml",
        "yaml" | "yml" => "text/yaml",

        // Scripts and data
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",
        "toml" => "application/toml",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "svg" | "svgz" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "webp" => "image/webp",
        "bmp" => "image/bmp",

        // Audio / video
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/x-flac",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Archives and documents
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",

        _ => UNKNOWN_TYPE,
    }
}
