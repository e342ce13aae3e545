use std::path::Path;

use fltk::dialog::{FileDialogType, NativeFileChooser};

use crate::app::file_filters::{image_open_filter, png_save_filter};

/// Pick a dish photo. Returns the chosen path, or `None` when cancelled.
pub fn native_image_dialog() -> Option<String> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseFile);
    nfc.set_filter(&image_open_filter());
    nfc.show(); // blocks until close
    let filename = nfc.filename();
    let s = filename.to_string_lossy();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Pick a destination for a PNG export, preset to `preset_name`.
pub fn native_png_save_dialog(preset_name: &str, start_dir: Option<&str>) -> Option<String> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    nfc.set_filter(&png_save_filter());
    if let Some(dir) = start_dir {
        let _ = nfc.set_directory(&Path::new(dir));
    }
    nfc.set_preset_file(preset_name);
    nfc.show();
    let filename = nfc.filename();
    let s = filename.to_string_lossy();
    if s.is_empty() { None } else { Some(s.to_string()) }
}
