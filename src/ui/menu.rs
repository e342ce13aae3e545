use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::messages::Message;
use crate::app::settings::AppSettings;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, settings: &AppSettings) {
    let s = sender;

    // File
    menu.add("File/Export Print Preview...", Shortcut::Ctrl | 'p', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ExportPrintPreview) });
    menu.add("File/Download QR Code...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::QrDownload) });
    menu.add("File/Set API Key...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetApiKey) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Quit) });

    // View
    menu.add("View/Refresh Preview", Shortcut::Ctrl | 'r', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RefreshPreview) });
    let live_flag = if settings.live_preview { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Live Preview", Shortcut::None, live_flag, { let s = *s; move |_| s.send(Message::ToggleLivePreview) });

    // Help
    menu.add("Help/About MenuCraft", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}
