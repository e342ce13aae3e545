use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, CallbackTrigger, FrameType},
    frame::Frame,
    group::Group,
    image::PngImage,
    input::Input,
    prelude::*,
};

use crate::app::messages::Message;
use crate::app::model::RestaurantInfo;
use crate::app::store::InfoField;

const QR_EDGE: i32 = 150;

/// The Share view: website URL, inline QR preview and PNG export.
pub struct ShareTab {
    pub group: Group,
    qr_frame: Frame,
}

impl ShareTab {
    pub fn new(
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        sender: &Sender<Message>,
        info: &RestaurantInfo,
    ) -> Self {
        let mut group = Group::new(x, y, w, h, "Share");

        let inner_x = x + 10;
        let inner_w = w - 20;
        let mut cursor = y + 10;

        Frame::new(inner_x, cursor, inner_w, 22, None)
            .with_label("Share Your Menu")
            .set_align(Align::Left | Align::Inside);
        cursor += 26;

        Frame::new(inner_x, cursor, inner_w, 40, None)
            .with_label(
                "Enter the URL where your menu will be hosted\nto generate a QR code for tables.",
            )
            .set_align(Align::Left | Align::Inside);
        cursor += 44;

        let mut url_input = Input::new(inner_x, cursor, inner_w, 28, None);
        url_input.set_value(info.website_url.as_deref().unwrap_or(""));
        url_input.set_tooltip("https://your-restaurant.com/menu");
        url_input.set_trigger(CallbackTrigger::Changed);
        url_input.set_callback({
            let s = *sender;
            move |i| s.send(Message::InfoChanged(InfoField::Website, i.value()))
        });
        cursor += 28 + 12;

        let mut qr_frame = Frame::new(
            inner_x + (inner_w - QR_EDGE) / 2,
            cursor,
            QR_EDGE,
            QR_EDGE,
            None,
        );
        qr_frame.set_frame(FrameType::BorderBox);
        qr_frame.set_label("QR preview");
        cursor += QR_EDGE + 12;

        let mut refresh = Button::new(inner_x, cursor, (inner_w - 6) / 2, 30, "Refresh QR");
        refresh.set_callback({
            let s = *sender;
            move |_| s.send(Message::QrRefresh)
        });
        let mut download = Button::new(
            inner_x + (inner_w - 6) / 2 + 6,
            cursor,
            (inner_w - 6) / 2,
            30,
            "Download QR Code",
        );
        download.set_callback({
            let s = *sender;
            move |_| s.send(Message::QrDownload)
        });

        group.end();

        Self { group, qr_frame }
    }

    /// Show fetched QR bytes in the inline preview.
    pub fn set_qr_image(&mut self, bytes: &[u8]) {
        match PngImage::from_data(bytes) {
            Ok(mut image) => {
                image.scale(QR_EDGE - 10, QR_EDGE - 10, true, true);
                self.qr_frame.set_label("");
                self.qr_frame.set_image(Some(image));
                self.qr_frame.redraw();
            }
            Err(e) => {
                eprintln!("QR preview decode failed: {}", e);
                self.show_qr_placeholder("QR preview unavailable");
            }
        }
    }

    pub fn show_qr_placeholder(&mut self, text: &str) {
        self.qr_frame.set_image(None::<PngImage>);
        self.qr_frame.set_label(text);
        self.qr_frame.redraw();
    }
}
