//! Photo ingestion and temp-file plumbing for the inline preview.
//!
//! Uploaded photos are stored on the dish as self-contained data URLs, never
//! as file references. The embedded HelpView pane cannot render data URLs,
//! so images are materialized into a temp directory under names derived by
//! hashing the data URL; path computation is deterministic and side-effect
//! free, writing happens separately.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::error::{AppError, Result};

/// Sniff the image type from magic bytes. Returns `None` for anything that
/// is not a format the preview can display.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

/// Read a photo file and convert it to an embeddable data URL.
pub fn data_url_from_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mime = sniff_mime(&bytes).ok_or_else(|| {
        AppError::Image(format!(
            "{} is not a supported image (PNG, JPEG, GIF or WebP)",
            path.display()
        ))
    })?;
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(&bytes)))
}

/// Split a data URL back into its MIME type and raw bytes.
pub fn decode_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = BASE64.decode(payload).ok()?;
    Some((mime.to_string(), bytes))
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "png",
    }
}

/// Get the temp directory for materialized preview images.
pub fn temp_image_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("menucraft-images");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Remove the entire temp image directory.
pub fn cleanup_temp_images() {
    let dir = std::env::temp_dir().join("menucraft-images");
    let _ = fs::remove_dir_all(dir);
}

/// Compute the temp path a data URL materializes to. Stable for the same
/// input, distinct for different content.
pub fn cached_image_path(data_url: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    data_url.hash(&mut hasher);
    let hash = hasher.finish();

    let ext = decode_data_url(data_url)
        .map(|(mime, _)| extension_for_mime(&mime))
        .unwrap_or("png");

    temp_image_dir().join(format!("{:016x}.{}", hash, ext))
}

/// Write the decoded image to its cached path if it is not there yet.
/// Returns the path, or `None` when the data URL does not decode.
pub fn materialize(data_url: &str) -> Option<PathBuf> {
    let (_, bytes) = decode_data_url(data_url)?;
    let path = cached_image_path(data_url);
    if !path.exists() {
        fs::write(&path, &bytes).ok()?;
    }
    Some(path)
}
