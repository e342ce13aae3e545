use fltk::{
    app::Sender,
    enums::Event,
    group::Tabs,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::messages::Message;
use crate::app::model::AppState;

use super::design_tab::DesignTab;
use super::details_tab::DetailsTab;
use super::items_tab::ItemsTab;
use super::preview_pane::PreviewPane;
use super::share_tab::ShareTab;

pub const WINDOW_W: i32 = 1100;
pub const WINDOW_H: i32 = 720;
const MENU_H: i32 = 30;
const EDITOR_W: i32 = 450;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub tabs: Tabs,
    pub details: DetailsTab,
    pub items: ItemsTab,
    pub design: DesignTab,
    pub share: ShareTab,
    pub preview: PreviewPane,
}

/// Build the main window: menu bar, the four editor tabs on the left and
/// the live preview pane on the right.
pub fn build_main_window(sender: &Sender<Message>, state: &AppState) -> MainWidgets {
    let mut wind = Window::new(100, 100, WINDOW_W, WINDOW_H, "\u{1f374} MenuCraft");
    wind.set_xclass("MenuCraft");

    let menu = MenuBar::new(0, 0, WINDOW_W, MENU_H, "");

    let mut tabs = Tabs::new(10, MENU_H + 10, EDITOR_W, WINDOW_H - MENU_H - 20, None);
    let (cx, cy, cw, ch) = tabs.client_area();
    let details = DetailsTab::new(cx, cy, cw, ch, sender, &state.info);
    let items = ItemsTab::new(cx, cy, cw, ch, sender);
    let design = DesignTab::new(cx, cy, cw, ch, sender, &state.theme, &state.info.accent_color);
    let share = ShareTab::new(cx, cy, cw, ch, sender, &state.info);
    tabs.end();

    // Fetch the QR preview lazily, when the Share tab is shown.
    tabs.set_callback({
        let s = *sender;
        move |t| {
            if let Some(tab) = t.value() {
                if tab.label() == "Share" {
                    s.send(Message::QrRefresh);
                }
            }
        }
    });

    let preview = PreviewPane::new(
        EDITOR_W + 20,
        MENU_H + 10,
        WINDOW_W - EDITOR_W - 30,
        WINDOW_H - MENU_H - 20,
    );

    wind.end();
    wind.resizable(preview.widget());

    // The window close button routes through the same quit path as File/Quit.
    wind.set_callback({
        let s = *sender;
        move |_| {
            if fltk::app::event() == Event::Close {
                s.send(Message::Quit);
            }
        }
    });

    MainWidgets {
        wind,
        menu,
        tabs,
        details,
        items,
        design,
        share,
        preview,
    }
}
