use fltk::dialog;

/// Show the About dialog.
pub fn show_about_dialog() {
    dialog::message_default(&format!(
        "\u{1f374} MenuCraft {}\n\n\
         Design print-ready restaurant menus with preset or\n\
         AI-generated themes, dish photos and QR code sharing.\n\n\
         Generative features are powered by the Google Gemini API\n\
         and require an API key (File > Set API Key...).",
        env!("CARGO_PKG_VERSION")
    ));
}
