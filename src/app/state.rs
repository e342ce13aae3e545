use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use std::thread;

use fltk::{app::Sender, dialog};

use super::credentials;
use super::error::AppError;
use super::gemini;
use super::images;
use super::messages::Message;
use super::model::{DishId, SectionId};
use super::qr;
use super::render;
use super::settings::AppSettings;
use super::store::{DishField, MenuStore};
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::dialogs::api_key::DialogKeyProvider;
use crate::ui::file_dialogs::{native_image_dialog, native_png_save_dialog};
use crate::ui::main_window::MainWidgets;

/// The three generative action families. One request may be in flight at a
/// time across all of them; triggers are disabled while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Enhance,
    Menu,
    Theme,
}

pub struct EditorState {
    pub store: MenuStore,
    pub widgets: MainWidgets,
    pub sender: Sender<Message>,
    pub settings: Rc<RefCell<AppSettings>>,
    busy: Option<GenerationKind>,
    qr_busy: bool,
}

impl EditorState {
    pub fn new(
        widgets: MainWidgets,
        sender: Sender<Message>,
        settings: Rc<RefCell<AppSettings>>,
    ) -> Self {
        let mut state = Self {
            store: MenuStore::new(),
            widgets,
            sender,
            settings,
            busy: None,
            qr_busy: false,
        };
        state.sync_items();
        state.refresh_preview();
        state
    }

    /// Handle one message. Returns `true` when the app should exit.
    pub fn handle(&mut self, message: Message) -> bool {
        match message {
            // --- Restaurant info ---
            Message::InfoChanged(field, value) => {
                self.store.set_info_field(field, &value);
                self.refresh_if_live();
            }

            // --- Sections ---
            Message::SectionAdd => {
                self.store.add_section();
                self.sync_items();
                self.refresh_if_live();
            }
            Message::SectionRemove(id) => {
                self.store.remove_section(id);
                self.sync_items();
                self.refresh_if_live();
            }
            Message::SectionRename(id, title) => {
                self.store.rename_section(id, &title);
                self.refresh_if_live();
            }

            // --- Dishes ---
            Message::DishAdd(section) => {
                self.store.add_dish(section);
                self.sync_items();
                self.refresh_if_live();
            }
            Message::DishRemove(section, dish) => {
                self.store.remove_dish(section, dish);
                self.sync_items();
                self.refresh_if_live();
            }
            Message::DishFieldChanged(section, dish, field, value) => {
                self.store.set_dish_field(section, dish, field, &value);
                self.refresh_if_live();
            }
            Message::DishHighlightSet(section, dish, highlight) => {
                self.store.set_dish_highlight(section, dish, highlight);
                self.refresh_if_live();
            }
            Message::DishTagToggled(section, dish, tag) => {
                self.store.toggle_dietary_tag(section, dish, &tag);
                self.refresh_if_live();
            }
            Message::DishPhotoPick(section, dish) => self.pick_dish_photo(section, dish),
            Message::DishPhotoClear(section, dish) => {
                self.store.set_dish_image(section, dish, None);
                self.sync_items();
                self.refresh_if_live();
            }

            // --- Theme ---
            Message::PresetApplied(kind) => {
                self.store.apply_preset(kind);
                self.widgets.design.sync(&self.store.state().theme);
                self.refresh_if_live();
            }
            Message::TextColorAdjusted(color) => {
                self.store.set_text_color(&color);
                self.refresh_if_live();
            }

            // --- Generative triggers ---
            Message::GenerateMenu => self.start_generate_menu(),
            Message::EnhanceDish(section, dish) => self.start_enhance_dish(section, dish),
            Message::GenerateTheme { prompt, colors, fonts } => {
                self.start_generate_theme(prompt, colors, fonts)
            }

            // --- Generative completions ---
            Message::MenuGenerated(result) => {
                self.finish_generation();
                match result {
                    Ok(outline) => {
                        self.store.replace_sections(&outline);
                        self.sync_items();
                        self.refresh_preview();
                    }
                    Err(e) => {
                        eprintln!("Menu generation failed: {}", e);
                        dialog::alert_default("Failed to generate menu. Please try again.");
                    }
                }
            }
            Message::DescriptionEnhanced(section, dish, text) => {
                self.finish_generation();
                self.store
                    .set_dish_field(section, dish, DishField::Description, &text);
                self.sync_items();
                self.refresh_preview();
            }
            Message::ThemeGenerated { prompt, theme } => {
                self.finish_generation();
                let image_missing = theme.background_image.is_none();
                self.store.apply_generated_theme(&theme, &prompt);
                self.widgets.design.sync(&self.store.state().theme);
                self.refresh_preview();
                if image_missing {
                    dialog::message_default(
                        "Theme colors and fonts were applied, but the background \
                         image could not be generated.",
                    );
                }
            }

            // --- Share & export ---
            Message::QrRefresh => self.start_qr_fetch(qr::QR_PREVIEW_SIZE, false),
            Message::QrPreviewFetched(result) => {
                self.qr_busy = false;
                match result {
                    Ok(bytes) => self.widgets.share.set_qr_image(&bytes),
                    Err(e) => {
                        eprintln!("QR preview fetch failed: {}", e);
                        self.widgets.share.show_qr_placeholder("QR preview unavailable");
                    }
                }
            }
            Message::QrDownload => self.start_qr_fetch(qr::QR_DOWNLOAD_SIZE, true),
            Message::QrDownloadFetched(result) => {
                self.qr_busy = false;
                match result {
                    Ok(bytes) => self.save_qr_png(&bytes),
                    Err(e) => {
                        dialog::alert_default(&format!("Could not download QR code: {}", e));
                    }
                }
            }
            Message::ExportPrintPreview => self.open_print_preview(),

            // --- View & app ---
            Message::RefreshPreview => self.refresh_preview(),
            Message::ToggleLivePreview => {
                let live = {
                    let mut s = self.settings.borrow_mut();
                    s.live_preview = !s.live_preview;
                    let _ = s.save();
                    s.live_preview
                };
                if live {
                    self.refresh_preview();
                }
            }
            Message::SetApiKey => {
                crate::ui::dialogs::api_key::prompt_for_key(&self.settings);
            }
            Message::ShowAbout => show_about_dialog(),
            Message::Quit => {
                images::cleanup_temp_images();
                return true;
            }
        }
        false
    }

    // --- Preview plumbing ---

    fn refresh_if_live(&mut self) {
        if self.settings.borrow().live_preview {
            self.refresh_preview();
        }
    }

    fn refresh_preview(&mut self) {
        self.widgets.preview.refresh(self.store.state());
    }

    fn sync_items(&mut self) {
        self.widgets
            .items
            .rebuild(self.store.state(), self.busy.is_some());
    }

    // --- Generation plumbing ---

    /// Resolve an API key, prompting the user when none is selected.
    /// Returns `None` when the user declines; the action is then cancelled
    /// without an error dialog.
    fn ensure_key(&self) -> Option<String> {
        let provider = DialogKeyProvider::new(self.settings.clone());
        match credentials::ensure_key(&provider) {
            Ok(key) => Some(key),
            Err(AppError::MissingKey) => None,
            Err(e) => {
                dialog::alert_default(&format!("API key unavailable: {}", e));
                None
            }
        }
    }

    fn begin_generation(&mut self, kind: GenerationKind) {
        self.busy = Some(kind);
        self.apply_busy_state();
    }

    fn finish_generation(&mut self) {
        self.busy = None;
        self.apply_busy_state();
    }

    fn apply_busy_state(&mut self) {
        let busy = self.busy.is_some();
        self.widgets.details.set_busy(busy);
        self.widgets.design.set_busy(busy);
        self.sync_items();
    }

    fn start_generate_menu(&mut self) {
        if self.busy.is_some() {
            return;
        }
        let Some(key) = self.ensure_key() else { return };

        let info = &self.store.state().info;
        let name = info.name.clone();
        let cuisine = if info.tagline.trim().is_empty() {
            "General".to_string()
        } else {
            info.tagline.clone()
        };

        self.begin_generation(GenerationKind::Menu);
        let sender = self.sender;
        thread::spawn(move || {
            let result = gemini::generate_menu(&key, &name, &cuisine).map_err(|e| e.to_string());
            sender.send(Message::MenuGenerated(result));
        });
    }

    fn start_enhance_dish(&mut self, section: SectionId, dish: DishId) {
        if self.busy.is_some() {
            return;
        }
        let Some((name, description, ingredients)) = self
            .store
            .state()
            .sections
            .iter()
            .find(|s| s.id == section)
            .and_then(|s| s.items.iter().find(|d| d.id == dish))
            .map(|d| (d.name.clone(), d.description.clone(), d.ingredients.clone()))
        else {
            return;
        };
        let Some(key) = self.ensure_key() else { return };

        self.begin_generation(GenerationKind::Enhance);
        let sender = self.sender;
        thread::spawn(move || {
            let text = gemini::enhance_description(&key, &name, &description, &ingredients);
            sender.send(Message::DescriptionEnhanced(section, dish, text));
        });
    }

    fn start_generate_theme(&mut self, prompt: String, colors: String, fonts: String) {
        if self.busy.is_some() || prompt.trim().is_empty() {
            return;
        }
        let Some(key) = self.ensure_key() else { return };

        self.begin_generation(GenerationKind::Theme);
        let sender = self.sender;
        thread::spawn(move || {
            let theme = gemini::generate_theme(&key, &prompt, &colors, &fonts);
            sender.send(Message::ThemeGenerated { prompt, theme });
        });
    }

    // --- Share & export plumbing ---

    fn start_qr_fetch(&mut self, size: u32, for_download: bool) {
        let Some(url) = self.store.state().info.website_url.clone() else {
            if for_download {
                dialog::alert_default("Enter a website URL first.");
            } else {
                self.widgets.share.show_qr_placeholder("Enter a website URL");
            }
            return;
        };
        if self.qr_busy {
            return;
        }
        self.qr_busy = true;

        let sender = self.sender;
        thread::spawn(move || {
            let result = qr::fetch_qr_png(&url, size).map_err(|e| e.to_string());
            sender.send(if for_download {
                Message::QrDownloadFetched(result)
            } else {
                Message::QrPreviewFetched(result)
            });
        });
    }

    fn save_qr_png(&mut self, bytes: &[u8]) {
        let start_dir = self.settings.borrow().last_save_directory.clone();
        let Some(path) = native_png_save_dialog("menu-qr.png", start_dir.as_deref()) else {
            return;
        };
        if let Some(parent) = std::path::Path::new(&path).parent() {
            let mut s = self.settings.borrow_mut();
            s.last_save_directory = Some(parent.to_string_lossy().to_string());
            let _ = s.save();
        }
        if let Err(e) = fs::write(&path, bytes) {
            dialog::alert_default(&format!("Error saving QR code: {}", e));
        }
    }

    fn pick_dish_photo(&mut self, section: SectionId, dish: DishId) {
        let Some(path) = native_image_dialog() else {
            return;
        };
        match images::data_url_from_file(std::path::Path::new(&path)) {
            Ok(data_url) => {
                self.store.set_dish_image(section, dish, Some(data_url));
                self.sync_items();
                self.refresh_if_live();
            }
            Err(e) => dialog::alert_default(&format!("Could not load photo: {}", e)),
        }
    }

    fn open_print_preview(&mut self) {
        let html = render::print_document(self.store.state());
        let path = std::env::temp_dir().join("menucraft-preview.html");
        if let Err(e) = fs::write(&path, html) {
            dialog::alert_default(&format!("Error writing print preview: {}", e));
            return;
        }
        if let Err(e) = open::that(&path) {
            dialog::alert_default(&format!("Error opening print preview: {}", e));
        }
    }
}
