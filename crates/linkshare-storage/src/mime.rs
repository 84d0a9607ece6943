//! File type detection by extension or by leading bytes.

/// Number of leading bytes inspected by [`sniff`].
pub const SNIFF_LEN: usize = 512;

/// Guess MIME type from a file path extension.
pub fn mime_from_path(path: &str) -> Option<String> {
    let name = path.rsplit('/').next()?;
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_lowercase().as_str() {
        "txt" | "md" | "log" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "csv" => "text/csv",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Detect a MIME type from the first bytes of a file.
///
/// Recognizes a handful of binary signatures and otherwise classifies the
/// sample as text when it is valid UTF-8 without control characters.
pub fn sniff(head: &[u8]) -> Option<String> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1f\x8b", "application/gzip"),
    ];

    if head.is_empty() {
        return None;
    }
    for (magic, mime) in SIGNATURES {
        if head.starts_with(magic) {
            return Some((*mime).to_string());
        }
    }

    // A multi-byte character may be cut at the sample boundary.
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(e) if e.error_len().is_none() => {
            std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default()
        }
        Err(_) => return Some("application/octet-stream".to_string()),
    };
    let binary = text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\x0c'));
    if binary {
        Some("application/octet-stream".to_string())
    } else {
        Some("text/plain; charset=utf-8".to_string())
    }
}
