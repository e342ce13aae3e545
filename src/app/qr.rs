//! QR code rendering boundary.
//!
//! The configured website URL is rendered to a scannable PNG by an external
//! service; the result is shown inline in the Share tab and saved to disk on
//! request. The service takes the payload percent-encoded in a query string.

use super::error::{AppError, Result};

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Pixel edge of the inline Share-tab preview.
pub const QR_PREVIEW_SIZE: u32 = 150;
/// Pixel edge of the downloaded PNG.
pub const QR_DOWNLOAD_SIZE: u32 = 300;

/// Percent-encode a query value (RFC 3986: unreserved characters pass
/// through, everything else becomes %XX byte escapes).
pub fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Build the service URL rendering `data` as a `size`×`size` QR code.
pub fn qr_code_url(data: &str, size: u32) -> String {
    format!(
        "{}?size={}x{}&data={}",
        QR_ENDPOINT,
        size,
        size,
        percent_encode(data)
    )
}

/// Fetch the rendered PNG. Errors carry the service status or transport
/// failure; callers surface them as a notification without touching state.
pub fn fetch_qr_png(data: &str, size: u32) -> Result<Vec<u8>> {
    let response = minreq::get(qr_code_url(data, size))
        .with_timeout(10)
        .send()?;

    if !(200..300).contains(&response.status_code) {
        return Err(AppError::Qr(format!(
            "service returned status {}",
            response.status_code
        )));
    }
    Ok(response.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode_passes_unreserved() {
        assert_eq!(percent_encode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
    }

    #[test]
    fn test_percent_encode_escapes_reserved() {
        assert_eq!(
            percent_encode("https://example.com/menu?a=1&b=2"),
            "https%3A%2F%2Fexample.com%2Fmenu%3Fa%3D1%26b%3D2"
        );
        assert_eq!(percent_encode("a b"), "a%20b");
    }

    #[test]
    fn test_percent_encode_multibyte() {
        assert_eq!(percent_encode("café"), "caf%C3%A9");
    }

    #[test]
    fn test_qr_code_url() {
        assert_eq!(
            qr_code_url("https://menu.example", 300),
            "https://api.qrserver.com/v1/create-qr-code/?size=300x300&data=https%3A%2F%2Fmenu.example"
        );
    }

    #[test]
    fn test_qr_code_url_preview_size() {
        let url = qr_code_url("x", QR_PREVIEW_SIZE);
        assert!(url.contains("size=150x150"));
    }
}
