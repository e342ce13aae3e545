use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, CallbackTrigger},
    frame::Frame,
    group::Group,
    input::{Input, MultilineInput},
    prelude::*,
};

use crate::app::messages::Message;
use crate::app::model::{MenuTheme, ThemeKind};
use crate::app::store::InfoField;

const LABEL_H: i32 = 22;
const INPUT_H: i32 = 28;

/// The Design view: preset themes, the accent color, the AI theme prompt
/// and the manual text-color adjustment for generated backgrounds.
pub struct DesignTab {
    pub group: Group,
    generate_button: Button,
    prompt_input: MultilineInput,
    text_color_group: Group,
}

impl DesignTab {
    pub fn new(
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        sender: &Sender<Message>,
        theme: &MenuTheme,
        accent_color: &str,
    ) -> Self {
        let mut group = Group::new(x, y, w, h, "Design");

        let inner_x = x + 10;
        let inner_w = w - 20;
        let mut cursor = y + 10;

        Frame::new(inner_x, cursor, inner_w, LABEL_H, None)
            .with_label("Preset Themes")
            .set_align(Align::Left | Align::Inside);
        cursor += LABEL_H + 4;

        let button_w = (inner_w - 12) / 3;
        for (index, kind) in ThemeKind::PRESETS.iter().enumerate() {
            let col = (index % 3) as i32;
            let row = (index / 3) as i32;
            let mut button = Button::new(
                inner_x + col * (button_w + 6),
                cursor + row * 36,
                button_w,
                30,
                None,
            )
            .with_label(kind.display_name());
            button.set_callback({
                let s = *sender;
                let kind = *kind;
                move |_| s.send(Message::PresetApplied(kind))
            });
        }
        cursor += 2 * 36 + 8;

        Frame::new(inner_x, cursor, inner_w, LABEL_H, None)
            .with_label("Accent Color (hex)")
            .set_align(Align::Left | Align::Inside);
        let mut accent = Input::new(inner_x, cursor + LABEL_H, inner_w, INPUT_H, None);
        accent.set_value(accent_color);
        accent.set_trigger(CallbackTrigger::Changed);
        accent.set_callback({
            let s = *sender;
            move |i| s.send(Message::InfoChanged(InfoField::AccentColor, i.value()))
        });
        cursor += LABEL_H + INPUT_H + 12;

        Frame::new(inner_x, cursor, inner_w, LABEL_H, None)
            .with_label("\u{2728} AI Custom Theme")
            .set_align(Align::Left | Align::Inside);
        cursor += LABEL_H + 2;

        let mut prompt_input = MultilineInput::new(inner_x, cursor, inner_w, 60, None);
        prompt_input
            .set_tooltip("Describe your theme (e.g., 'Dark moody jazz bar with soft lighting')");
        cursor += 60 + 6;

        let half_w = (inner_w - 6) / 2;
        let mut colors_input = Input::new(inner_x, cursor, half_w, INPUT_H, None);
        colors_input.set_tooltip("Preferred Colors (e.g. Gold & Black)");
        let mut fonts_input = Input::new(inner_x + half_w + 6, cursor, half_w, INPUT_H, None);
        fonts_input.set_tooltip("Font Style (e.g. Elegant Serif)");
        cursor += INPUT_H + 8;

        let mut generate_button =
            Button::new(inner_x, cursor, inner_w, 34, "\u{2728} Generate Full Theme");
        generate_button.set_callback({
            let s = *sender;
            let prompt = prompt_input.clone();
            let colors = colors_input.clone();
            let fonts = fonts_input.clone();
            move |_| {
                s.send(Message::GenerateTheme {
                    prompt: prompt.value(),
                    colors: colors.value(),
                    fonts: fonts.value(),
                })
            }
        });
        cursor += 34 + 12;

        // Readability controls, only relevant over a generated background.
        let mut text_color_group = Group::new(inner_x, cursor, inner_w, LABEL_H + 34, None);
        Frame::new(inner_x, cursor, inner_w, LABEL_H, None)
            .with_label("Manual Text Color Adjustment")
            .set_align(Align::Left | Align::Inside);
        let mut white = Button::new(inner_x, cursor + LABEL_H, 100, 28, "White Text");
        white.set_callback({
            let s = *sender;
            move |_| s.send(Message::TextColorAdjusted("#ffffff".to_string()))
        });
        let mut black = Button::new(inner_x + 106, cursor + LABEL_H, 100, 28, "Black Text");
        black.set_callback({
            let s = *sender;
            move |_| s.send(Message::TextColorAdjusted("#000000".to_string()))
        });
        text_color_group.end();
        if theme.background_image.is_none() {
            text_color_group.hide();
        }

        group.end();

        Self {
            group,
            generate_button,
            prompt_input,
            text_color_group,
        }
    }

    /// Reflect a theme change that did not originate here.
    pub fn sync(&mut self, theme: &MenuTheme) {
        if theme.background_image.is_some() {
            self.text_color_group.show();
        } else {
            self.text_color_group.hide();
        }
        if let Some(prompt) = &theme.generated_prompt {
            self.prompt_input.set_value(prompt);
        }
    }

    pub fn set_busy(&mut self, busy: bool) {
        if busy {
            self.generate_button.set_label("Generating...");
            self.generate_button.deactivate();
        } else {
            self.generate_button.set_label("\u{2728} Generate Full Theme");
            self.generate_button.activate();
        }
    }
}
