use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, CallbackTrigger},
    frame::Frame,
    group::Group,
    input::Input,
    prelude::*,
};

use crate::app::messages::Message;
use crate::app::model::RestaurantInfo;
use crate::app::store::InfoField;

const LABEL_H: i32 = 22;
const INPUT_H: i32 = 28;
const GAP: i32 = 8;

/// Build a label-above-input pair wired to an info field. Returns the y
/// coordinate below the pair.
fn labeled_input(
    x: i32,
    y: i32,
    w: i32,
    label: &str,
    value: &str,
    sender: &Sender<Message>,
    field: InfoField,
) -> i32 {
    Frame::new(x, y, w, LABEL_H, None)
        .with_label(label)
        .set_align(Align::Left | Align::Inside);
    let mut input = Input::new(x, y + LABEL_H, w, INPUT_H, None);
    input.set_value(value);
    input.set_trigger(CallbackTrigger::Changed);
    input.set_callback({
        let s = *sender;
        move |i| s.send(Message::InfoChanged(field, i.value()))
    });
    y + LABEL_H + INPUT_H + GAP
}

/// The Details view: restaurant metadata plus the full-menu generation
/// trigger (it feeds on the current name and tagline).
pub struct DetailsTab {
    pub group: Group,
    generate_button: Button,
}

impl DetailsTab {
    pub fn new(
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        sender: &Sender<Message>,
        info: &RestaurantInfo,
    ) -> Self {
        let mut group = Group::new(x, y, w, h, "Details");

        let inner_x = x + 10;
        let inner_w = w - 20;
        let mut cursor = y + 10;

        cursor = labeled_input(
            inner_x, cursor, inner_w, "Restaurant Name", &info.name, sender, InfoField::Name,
        );
        cursor = labeled_input(
            inner_x, cursor, inner_w, "Tagline / Cuisine", &info.tagline, sender, InfoField::Tagline,
        );
        cursor = labeled_input(
            inner_x, cursor, inner_w, "Contact Info", &info.contact, sender, InfoField::Contact,
        );
        cursor += GAP;

        let mut generate_button =
            Button::new(inner_x, cursor, inner_w, 34, "\u{2728} Auto-Generate Menu");
        generate_button.set_callback({
            let s = *sender;
            move |_| s.send(Message::GenerateMenu)
        });
        cursor += 34 + 4;

        Frame::new(inner_x, cursor, inner_w, LABEL_H, None)
            .with_label("Uses current name & tagline to suggest dishes.")
            .set_align(Align::Center | Align::Inside);

        group.end();

        Self {
            group,
            generate_button,
        }
    }

    pub fn set_busy(&mut self, busy: bool) {
        if busy {
            self.generate_button.set_label("Thinking...");
            self.generate_button.deactivate();
        } else {
            self.generate_button.set_label("\u{2728} Auto-Generate Menu");
            self.generate_button.activate();
        }
    }
}
