use std::cell::RefCell;
use std::rc::Rc;

use fltk::{app, prelude::*};

use menu_craft::app::messages::Message;
use menu_craft::app::model::initial_state;
use menu_craft::app::settings::AppSettings;
use menu_craft::app::state::EditorState;
use menu_craft::ui::main_window::build_main_window;
use menu_craft::ui::menu::build_menu;

fn main() {
    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings = Rc::new(RefCell::new(AppSettings::load()));
    let document = initial_state();

    let mut widgets = build_main_window(&sender, &document);
    build_menu(&mut widgets.menu, &sender, &settings.borrow());
    widgets.wind.show();

    let mut editor = EditorState::new(widgets, sender, settings);

    while app.wait() {
        if let Some(message) = receiver.recv() {
            if editor.handle(message) {
                break;
            }
        }
    }
}
