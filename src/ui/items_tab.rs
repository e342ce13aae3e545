//! The Items view: one block per section, one card per dish, rebuilt from
//! scratch whenever the section/dish structure changes. Field edits fire
//! through `CallbackTrigger::Changed` without a rebuild so typing never
//! loses focus.

use fltk::{
    app::Sender,
    button::{Button, CheckButton},
    enums::{Align, CallbackTrigger, FrameType},
    frame::Frame,
    group::{Group, Pack, PackType, Scroll, ScrollType},
    input::{Input, MultilineInput},
    prelude::*,
};

use crate::app::messages::Message;
use crate::app::model::{AppState, Dish, DishId, MenuSection, SectionId, DIETARY_TAGS};
use crate::app::store::DishField;

const ROW_H: i32 = 26;
const SPACING: i32 = 6;
// Four plain rows, the taller description row, the trailing spacer and the
// inter-row gaps.
const DISH_CARD_H: i32 = 4 * ROW_H + 48 + 4 + 6 * 3;

pub struct ItemsTab {
    pub group: Group,
    scroll: Scroll,
    pack: Pack,
    sender: Sender<Message>,
    content_w: i32,
}

impl ItemsTab {
    pub fn new(x: i32, y: i32, w: i32, h: i32, sender: &Sender<Message>) -> Self {
        let mut group = Group::new(x, y, w, h, "Items");

        let mut scroll = Scroll::new(x, y, w, h, None);
        scroll.set_type(ScrollType::Vertical);

        let content_w = w - 20;
        let mut pack = Pack::new(x + 2, y + 2, content_w, h - 4, None);
        pack.set_type(PackType::Vertical);
        pack.set_spacing(SPACING);
        pack.end();

        scroll.end();
        group.end();

        Self {
            group,
            scroll,
            pack,
            sender: *sender,
            content_w,
        }
    }

    /// Rebuild the widget tree from the current state. `busy` deactivates
    /// every generative trigger while a request is in flight.
    pub fn rebuild(&mut self, state: &AppState, busy: bool) {
        self.pack.clear();
        self.pack.begin();

        for section in &state.sections {
            self.build_section(section, busy);
        }

        let mut add_section = Button::default()
            .with_size(self.content_w, 30)
            .with_label("Add New Section");
        add_section.set_callback({
            let s = self.sender;
            move |_| s.send(Message::SectionAdd)
        });

        self.pack.end();
        self.pack.auto_layout();
        self.scroll.redraw();
    }

    fn build_section(&self, section: &MenuSection, busy: bool) {
        let section_id = section.id;
        let w = self.content_w;

        let mut header = Pack::default().with_size(w, 30);
        header.set_type(PackType::Horizontal);
        header.set_spacing(SPACING);

        let mut title = Input::default().with_size(w - 90, 30);
        title.set_value(&section.title);
        title.set_trigger(CallbackTrigger::Changed);
        title.set_callback({
            let s = self.sender;
            move |i| s.send(Message::SectionRename(section_id, i.value()))
        });

        let mut remove = Button::default().with_size(84, 30).with_label("Remove");
        remove.set_callback({
            let s = self.sender;
            move |_| s.send(Message::SectionRemove(section_id))
        });
        header.end();

        for dish in &section.items {
            self.build_dish(section_id, dish, busy);
        }

        let mut add_dish = Button::default()
            .with_size(w, ROW_H)
            .with_label("+ Add Dish");
        add_dish.set_frame(FrameType::BorderBox);
        add_dish.set_callback({
            let s = self.sender;
            move |_| s.send(Message::DishAdd(section_id))
        });

        Frame::default().with_size(w, 4);
    }

    fn build_dish(&self, section_id: SectionId, dish: &Dish, busy: bool) {
        let dish_id = dish.id;
        let w = self.content_w;
        let indent = 12;
        let inner_w = w - indent;

        let mut card = Pack::default().with_size(w, DISH_CARD_H);
        card.set_type(PackType::Vertical);
        card.set_spacing(3);

        // Name and price
        let mut head = Pack::default().with_size(inner_w, ROW_H);
        head.set_type(PackType::Horizontal);
        head.set_spacing(SPACING);
        name_input(&self.sender, section_id, dish_id, &dish.name, inner_w - 90);
        price_input(&self.sender, section_id, dish_id, &dish.price, 84);
        head.end();

        // Ingredients
        let mut ingredients = Input::default().with_size(inner_w, ROW_H);
        ingredients.set_value(&dish.ingredients);
        ingredients.set_tooltip("Ingredients (e.g., Tomato, Basil, Garlic)");
        ingredients.set_trigger(CallbackTrigger::Changed);
        ingredients.set_callback({
            let s = self.sender;
            move |i| {
                s.send(Message::DishFieldChanged(
                    section_id,
                    dish_id,
                    DishField::Ingredients,
                    i.value(),
                ))
            }
        });

        // Description with the enhance trigger beside it
        let mut desc_row = Pack::default().with_size(inner_w, 48);
        desc_row.set_type(PackType::Horizontal);
        desc_row.set_spacing(SPACING);
        let mut description = MultilineInput::default().with_size(inner_w - 42, 48);
        description.set_value(&dish.description);
        description.set_trigger(CallbackTrigger::Changed);
        description.set_callback({
            let s = self.sender;
            move |i| {
                s.send(Message::DishFieldChanged(
                    section_id,
                    dish_id,
                    DishField::Description,
                    i.value(),
                ))
            }
        });
        let mut enhance = Button::default().with_size(36, 48).with_label("\u{2728}");
        enhance.set_tooltip("Enhance description with AI (uses Ingredients)");
        enhance.set_callback({
            let s = self.sender;
            move |_| s.send(Message::EnhanceDish(section_id, dish_id))
        });
        if busy {
            enhance.deactivate();
        }
        desc_row.end();

        // Photo and highlight
        let mut photo_row = Pack::default().with_size(inner_w, ROW_H);
        photo_row.set_type(PackType::Horizontal);
        photo_row.set_spacing(SPACING);
        if dish.image.is_some() {
            Frame::default()
                .with_size(120, ROW_H)
                .with_label("\u{1f4f7} Photo attached")
                .set_align(Align::Left | Align::Inside);
            let mut clear = Button::default().with_size(110, ROW_H).with_label("Remove Photo");
            clear.set_callback({
                let s = self.sender;
                move |_| s.send(Message::DishPhotoClear(section_id, dish_id))
            });
        } else {
            let mut upload = Button::default().with_size(120, ROW_H).with_label("Upload Photo...");
            upload.set_callback({
                let s = self.sender;
                move |_| s.send(Message::DishPhotoPick(section_id, dish_id))
            });
        }
        let mut highlight = CheckButton::default().with_size(100, ROW_H).with_label("Highlight");
        highlight.set_checked(dish.highlight);
        highlight.set_callback({
            let s = self.sender;
            move |b| s.send(Message::DishHighlightSet(section_id, dish_id, b.is_checked()))
        });
        photo_row.end();

        // Dietary tags
        let mut tag_row = Pack::default().with_size(inner_w, ROW_H);
        tag_row.set_type(PackType::Horizontal);
        tag_row.set_spacing(4);
        for tag in &DIETARY_TAGS {
            let mut check = CheckButton::default().with_size(52, ROW_H).with_label(tag.id);
            check.set_tooltip(tag.label);
            check.set_checked(dish.dietary_tags.contains(tag.id));
            check.set_callback({
                let s = self.sender;
                let tag_id = tag.id.to_string();
                move |_| s.send(Message::DishTagToggled(section_id, dish_id, tag_id.clone()))
            });
        }
        tag_row.end();

        // Dietary note and removal
        let mut note_row = Pack::default().with_size(inner_w, ROW_H);
        note_row.set_type(PackType::Horizontal);
        note_row.set_spacing(SPACING);
        let mut note = Input::default().with_size(inner_w - 110, ROW_H);
        note.set_value(&dish.dietary_note);
        note.set_tooltip("Dietary Note (e.g. Contains nuts)");
        note.set_trigger(CallbackTrigger::Changed);
        note.set_callback({
            let s = self.sender;
            move |i| {
                s.send(Message::DishFieldChanged(
                    section_id,
                    dish_id,
                    DishField::DietaryNote,
                    i.value(),
                ))
            }
        });
        let mut delete = Button::default().with_size(104, ROW_H).with_label("Delete Dish");
        delete.set_callback({
            let s = self.sender;
            move |_| s.send(Message::DishRemove(section_id, dish_id))
        });
        note_row.end();

        Frame::default().with_size(inner_w, 4);
        card.end();
        card.auto_layout();
    }
}

fn name_input(sender: &Sender<Message>, section_id: SectionId, dish_id: DishId, value: &str, w: i32) {
    let mut input = Input::default().with_size(w, ROW_H);
    input.set_value(value);
    input.set_tooltip("Dish Name");
    input.set_trigger(CallbackTrigger::Changed);
    input.set_callback({
        let s = *sender;
        move |i| {
            s.send(Message::DishFieldChanged(
                section_id,
                dish_id,
                DishField::Name,
                i.value(),
            ))
        }
    });
}

fn price_input(sender: &Sender<Message>, section_id: SectionId, dish_id: DishId, value: &str, w: i32) {
    let mut input = Input::default().with_size(w, ROW_H);
    input.set_value(value);
    input.set_tooltip("Price");
    input.set_trigger(CallbackTrigger::Changed);
    input.set_callback({
        let s = *sender;
        move |i| {
            s.send(Message::DishFieldChanged(
                section_id,
                dish_id,
                DishField::Price,
                i.value(),
            ))
        }
    });
}
