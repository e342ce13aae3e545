/// Filter for dish photo uploads.
///
/// FLTK accepts these filter formats:
/// - Simple wildcard: "*.png"
/// - Multiple wildcards: "*.{png,jpg}"
/// - With description: "Image Files\t*.{png,jpg}"
pub fn image_open_filter() -> String {
    "Image Files\t*.{png,jpg,jpeg,gif,webp}".to_string()
}

/// Filter for the exported QR code.
pub fn png_save_filter() -> String {
    "PNG Images\t*.png".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_filter_covers_supported_formats() {
        let filter = image_open_filter();
        for ext in ["png", "jpg", "jpeg", "gif", "webp"] {
            assert!(filter.contains(ext), "missing {}", ext);
        }
        assert!(filter.contains('\t'));
    }

    #[test]
    fn test_png_save_filter() {
        assert_eq!(png_save_filter(), "PNG Images\t*.png");
    }
}
