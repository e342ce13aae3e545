pub mod design_tab;
pub mod details_tab;
pub mod dialogs;
pub mod file_dialogs;
pub mod items_tab;
pub mod main_window;
pub mod menu;
pub mod preview_pane;
pub mod share_tab;
