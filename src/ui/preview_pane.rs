use fltk::{enums::Color, misc::HelpView, prelude::*};

use crate::app::images;
use crate::app::model::AppState;
use crate::app::render;

/// The embedded live preview: a HelpView rendering the reduced projection
/// of the current state. Dish photos are materialized to their cached temp
/// paths before the markup referencing them is loaded.
pub struct PreviewPane {
    view: HelpView,
}

impl PreviewPane {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        let mut view = HelpView::new(x, y, w, h, "");
        view.set_color(Color::White);
        view.set_text_size(14);
        Self { view }
    }

    /// Re-project the state into the pane.
    pub fn refresh(&mut self, state: &AppState) {
        for section in &state.sections {
            for dish in &section.items {
                if let Some(image) = &dish.image {
                    if images::materialize(image).is_none() {
                        eprintln!("Failed to materialize preview image for {}", dish.name);
                    }
                }
            }
        }
        self.view.set_value(&render::helpview_document(state));
        self.view.redraw();
    }

    /// Handle used by the window to make the pane the resizable child.
    pub fn widget(&self) -> &HelpView {
        &self.view
    }
}
