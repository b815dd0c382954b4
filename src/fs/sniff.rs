//! Content type sniffing for uploads.
//!
//! The stored content type is always derived from the bytes themselves,
//! never from the client-declared filename or Content-Type header. A file
//! named `notes.txt` that contains a PNG is stored as `image/png`.

use crate::{Result, VdriveError};

/// How many leading bytes the HTML heuristic inspects.
const HTML_PROBE_LEN: usize = 1024;

/// Sniff the content type of uploaded bytes.
///
/// Recognizes a handful of magic numbers, then falls back to an HTML
/// heuristic, then to `text/plain` for valid UTF-8, and finally to
/// `application/octet-stream`. Empty content is rejected.
pub fn sniff_content_type(content: &[u8]) -> Result<String> {
    if content.is_empty() {
        return Err(VdriveError::Validation("empty content".into()));
    }

    if let Some(ty) = sniff_magic(content) {
        return Ok(ty.to_string());
    }

    if looks_like_html(content) {
        return Ok("text/html".to_string());
    }

    if std::str::from_utf8(content).is_ok() {
        return Ok("text/plain".to_string());
    }

    Ok("application/octet-stream".to_string())
}

/// Match well-known magic numbers.
fn sniff_magic(content: &[u8]) -> Option<&'static str> {
    if content.starts_with(b"%PDF") {
        return Some("application/pdf");
    }
    if content.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some("image/png");
    }
    if content.starts_with(b"\xFF\xD8\xFF") {
        return Some("image/jpeg");
    }
    if content.starts_with(b"GIF87a") || content.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if content.starts_with(b"PK\x03\x04") {
        return Some("application/zip");
    }
    None
}

/// Heuristic HTML detection on the leading bytes.
fn looks_like_html(content: &[u8]) -> bool {
    let probe = &content[..content.len().min(HTML_PROBE_LEN)];
    let Ok(text) = std::str::from_utf8(probe) else {
        return false;
    };
    let lower = text.trim_start().to_lowercase();
    lower.starts_with("<!doctype html") || lower.starts_with("<html") || lower.contains("<html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_rejected() {
        assert!(matches!(
            sniff_content_type(b""),
            Err(VdriveError::Validation(_))
        ));
    }

    #[test]
    fn test_magic_numbers() {
        assert_eq!(sniff_content_type(b"%PDF-1.7 ...").unwrap(), "application/pdf");
        assert_eq!(
            sniff_content_type(b"\x89PNG\r\n\x1a\n rest").unwrap(),
            "image/png"
        );
        assert_eq!(
            sniff_content_type(b"\xFF\xD8\xFF\xE0 jfif").unwrap(),
            "image/jpeg"
        );
        assert_eq!(sniff_content_type(b"GIF89a.......").unwrap(), "image/gif");
        assert_eq!(
            sniff_content_type(b"PK\x03\x04 zipfile").unwrap(),
            "application/zip"
        );
    }

    #[test]
    fn test_html_detection() {
        assert_eq!(
            sniff_content_type(b"<!DOCTYPE html><html><body>hi</body></html>").unwrap(),
            "text/html"
        );
        assert_eq!(
            sniff_content_type(b"  <html lang=\"en\"><head></head></html>").unwrap(),
            "text/html"
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            sniff_content_type(b"just some plain notes\n").unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn test_sniff_ignores_declared_appearance() {
        // PNG bytes stay image/png no matter what the file is called
        let png = b"\x89PNG\r\n\x1a\n fake .txt content";
        assert_eq!(sniff_content_type(png).unwrap(), "image/png");
    }

    #[test]
    fn test_binary_fallback() {
        let bytes = [0x00u8, 0xFF, 0xFE, 0x01, 0x80];
        assert_eq!(
            sniff_content_type(&bytes).unwrap(),
            "application/octet-stream"
        );
    }
}
