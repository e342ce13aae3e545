//! Pure projections from the application state to document markup.
//!
//! Two projections share one set of layout rules: `print_document` produces
//! the full print-ready page (fixed A4, opened in the browser for printing),
//! `helpview_document` produces the reduced HTML subset the embedded FLTK
//! HelpView pane understands. Both are deterministic: identical state yields
//! byte-identical output, and neither touches anything outside its input.
//!
//! Layout rules:
//! - Modern-style themes (Modern, Midnight, Ocean) use dotted leaders
//!   between dish name and price and filled tag chips.
//! - Rustic uses ruled section headings (border above and below).
//! - A background image switches the page to an overlay card layout;
//!   otherwise content sits full-bleed on the fallback color.
//! - A dish image adds a thumbnail; an empty tag set with an empty note
//!   suppresses the tag/note row entirely.

use super::images;
use super::model::{tag_label, AppState, Dish, FontFamily, MenuSection, MenuTheme, ThemeKind, DIETARY_TAGS};

/// Fixed dotted leader used where the HelpView subset has no CSS.
const LEADER_DOTS: &str = " . . . . . . ";

/// Escape text for embedding in HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// The footer shows the website without its scheme.
fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Tag ids in display order: catalog order first, unknown ids after in the
/// set's own (sorted) order.
fn tags_in_display_order(dish: &Dish) -> Vec<&str> {
    let mut ordered: Vec<&str> = DIETARY_TAGS
        .iter()
        .filter(|t| dish.dietary_tags.contains(t.id))
        .map(|t| t.id)
        .collect();
    for id in &dish.dietary_tags {
        if !DIETARY_TAGS.iter().any(|t| t.id == id.as_str()) {
            ordered.push(id.as_str());
        }
    }
    ordered
}

fn has_tag_row(dish: &Dish) -> bool {
    !dish.dietary_tags.is_empty() || !dish.dietary_note.is_empty()
}

// --- Print document ---

fn print_styles(state: &AppState) -> String {
    let theme = &state.theme;
    let accent = escape_html(&state.info.accent_color);
    let text = escape_html(&theme.text_color);
    let background = escape_html(&theme.background_color);

    let background_image = match &theme.background_image {
        Some(url) => format!(
            "background-image: url(\"{}\"); background-size: cover; \
             background-position: center; background-repeat: no-repeat;",
            escape_html(url)
        ),
        None => String::new(),
    };

    format!(
        r#"@page {{ size: A4; margin: 0; }}
* {{ box-sizing: border-box; }}
body {{ margin: 0; background: #e2e8f0; font-family: {body_font}; }}
.page {{ width: 210mm; min-height: 297mm; margin: 0 auto; color: {text};
  background-color: {background}; {background_image} }}
@media print {{ body {{ background: none; }} }}
.sheet {{ padding: 14mm; min-height: 297mm; display: flex; flex-direction: column; }}
.sheet-overlay {{ background: rgba(255, 255, 255, 0.9); width: 170mm; min-height: 260mm;
  margin: 14mm auto; padding: 12mm; box-shadow: 0 4px 24px rgba(0, 0, 0, 0.35);
  display: flex; flex-direction: column; }}
header {{ text-align: center; padding-bottom: 8mm; margin-bottom: 10mm;
  border-bottom: 2px solid {header_rule}; }}
h1 {{ font-family: {heading_font}; font-size: 42pt; margin: 0 0 2mm; letter-spacing: -0.01em; }}
.tagline {{ text-transform: uppercase; letter-spacing: 0.3em; font-size: 12pt;
  opacity: 0.75; margin: 0; }}
h2 {{ font-family: {heading_font}; text-align: center; text-transform: uppercase;
  letter-spacing: 0.15em; font-size: 18pt; margin: 8mm 0 5mm; }}
h2.accent {{ color: {accent}; }}
h2.ruled {{ border-top: 1px solid currentColor; border-bottom: 1px solid currentColor;
  padding: 2mm 0; }}
.menu-body {{ flex: 1 0 auto; }}
.dish {{ display: flex; gap: 5mm; margin-bottom: 6mm; }}
.dish-body {{ flex: 1; }}
.dish-head {{ display: flex; align-items: baseline; }}
.dish-name {{ font-weight: bold; font-size: 13pt; }}
.dish-name.highlight {{ color: {accent}; }}
.leader {{ flex: 1; border-bottom: 1.5pt dotted currentColor; opacity: 0.4; margin: 0 3mm; }}
.spacer {{ flex: 1; }}
.dish-price {{ font-weight: bold; font-size: 13pt; white-space: nowrap; }}
.dish-desc {{ font-size: 10.5pt; opacity: 0.9; line-height: 1.5; margin: 1mm 0 0; }}
.tags {{ margin-top: 1.5mm; }}
.chip {{ display: inline-block; font-size: 7pt; text-transform: uppercase; font-weight: bold;
  padding: 0.5mm 1.5mm; border-radius: 1mm; margin-right: 1.5mm; }}
.chip-filled {{ background: #1e293b; color: #ffffff; border: 1px solid #1e293b; }}
.chip-outline {{ background: transparent; border: 1px solid currentColor; opacity: 0.7; }}
.note {{ font-size: 9pt; font-style: italic; opacity: 0.7; }}
.thumb {{ width: 22mm; height: 22mm; object-fit: cover; border-radius: 1.5mm;
  align-self: flex-start; }}
footer {{ margin-top: auto; border-top: 1px solid currentColor; padding-top: 6mm;
  text-align: center; font-size: 10pt; opacity: 0.6; }}
footer .site {{ font-size: 8.5pt; margin-top: 1mm; }}
"#,
        body_font = theme.body_font.css_stack(),
        heading_font = theme.heading_font.css_stack(),
        text = text,
        background = background,
        background_image = background_image,
        header_rule = if theme.kind.is_modern_style() {
            accent.clone()
        } else {
            "currentColor".to_string()
        },
        accent = accent,
    )
}

fn print_dish(out: &mut String, dish: &Dish, theme: &MenuTheme) {
    out.push_str("<div class=\"dish\">\n<div class=\"dish-body\">\n");

    let name_class = if dish.highlight {
        "dish-name highlight"
    } else {
        "dish-name"
    };
    let divider = if theme.kind.is_modern_style() {
        "<span class=\"leader\"></span>"
    } else {
        "<span class=\"spacer\"></span>"
    };
    out.push_str(&format!(
        "<div class=\"dish-head\"><span class=\"{}\">{}</span>{}<span class=\"dish-price\">{}</span></div>\n",
        name_class,
        escape_html(&dish.name),
        divider,
        escape_html(&dish.price),
    ));

    out.push_str(&format!(
        "<p class=\"dish-desc\">{}</p>\n",
        escape_html(&dish.description)
    ));

    if has_tag_row(dish) {
        let chip_class = if theme.kind.is_modern_style() {
            "chip chip-filled"
        } else {
            "chip chip-outline"
        };
        out.push_str("<div class=\"tags\">");
        for id in tags_in_display_order(dish) {
            out.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                chip_class,
                escape_html(tag_label(id))
            ));
        }
        if !dish.dietary_note.is_empty() {
            out.push_str(&format!(
                "<span class=\"note\">* {}</span>",
                escape_html(&dish.dietary_note)
            ));
        }
        out.push_str("</div>\n");
    }

    out.push_str("</div>\n");
    if let Some(image) = &dish.image {
        out.push_str(&format!(
            "<img class=\"thumb\" src=\"{}\" alt=\"{}\">\n",
            escape_html(image),
            escape_html(&dish.name)
        ));
    }
    out.push_str("</div>\n");
}

fn print_section(out: &mut String, section: &MenuSection, theme: &MenuTheme) {
    let heading_class = if theme.kind == ThemeKind::Rustic {
        "ruled"
    } else {
        "accent"
    };
    out.push_str(&format!(
        "<h2 class=\"{}\">{}</h2>\n",
        heading_class,
        escape_html(&section.title)
    ));
    for dish in &section.items {
        print_dish(out, dish, theme);
    }
}

/// Render the full print-ready page: one fixed A4 sheet, independent of the
/// interactive viewport.
pub fn print_document(state: &AppState) -> String {
    let info = &state.info;
    let theme = &state.theme;

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{} - Menu</title>\n", escape_html(&info.name)));
    out.push_str("<style>\n");
    out.push_str(&print_styles(state));
    out.push_str("</style>\n</head>\n<body>\n<div class=\"page\">\n");

    let sheet_class = if theme.background_image.is_some() {
        "sheet-overlay"
    } else {
        "sheet"
    };
    out.push_str(&format!("<div class=\"{}\">\n", sheet_class));

    out.push_str(&format!(
        "<header>\n<h1>{}</h1>\n<p class=\"tagline\">{}</p>\n</header>\n",
        escape_html(&info.name),
        escape_html(&info.tagline),
    ));

    out.push_str("<div class=\"menu-body\">\n");
    for section in &state.sections {
        print_section(&mut out, section, theme);
    }
    out.push_str("</div>\n");

    out.push_str(&format!("<footer>\n<div>{}</div>\n", escape_html(&info.contact)));
    if let Some(url) = &info.website_url {
        out.push_str(&format!(
            "<div class=\"site\">{}</div>\n",
            escape_html(strip_scheme(url))
        ));
    }
    out.push_str("</footer>\n</div>\n</div>\n</body>\n</html>\n");
    out
}

// --- HelpView document ---

fn helpview_face(font: FontFamily) -> &'static str {
    match font {
        FontFamily::Serif => "times",
        FontFamily::Sans => "helvetica",
    }
}

fn helpview_dish(out: &mut String, dish: &Dish, state: &AppState) {
    let theme = &state.theme;
    let name = if dish.highlight {
        format!(
            "<font color=\"{}\"><b>{}</b></font>",
            escape_html(&state.info.accent_color),
            escape_html(&dish.name)
        )
    } else {
        format!("<b>{}</b>", escape_html(&dish.name))
    };
    let leader = if theme.kind.is_modern_style() {
        LEADER_DOTS
    } else {
        ""
    };
    out.push_str(&format!(
        "<table width=\"100%\"><tr><td align=\"left\">{}{}</td><td align=\"right\"><b>{}</b></td></tr></table>\n",
        name,
        leader,
        escape_html(&dish.price),
    ));
    out.push_str(&format!(
        "<font size=\"2\">{}</font><br>\n",
        escape_html(&dish.description)
    ));

    if has_tag_row(dish) {
        out.push_str("<font size=\"1\">");
        for id in tags_in_display_order(dish) {
            out.push_str(&format!("[{}] ", escape_html(&tag_label(id).to_uppercase())));
        }
        if !dish.dietary_note.is_empty() {
            out.push_str(&format!("<i>* {}</i>", escape_html(&dish.dietary_note)));
        }
        out.push_str("</font><br>\n");
    }

    if let Some(image) = &dish.image {
        let path = images::cached_image_path(image);
        out.push_str(&format!(
            "<img src=\"{}\" width=\"80\" height=\"80\"><br>\n",
            escape_html(&path.to_string_lossy())
        ));
    }
    out.push_str("<br>\n");
}

/// Render the reduced projection for the embedded HelpView pane. Dish
/// images are referenced by their deterministic cached paths; writing those
/// files is the preview pane's job, not the renderer's.
pub fn helpview_document(state: &AppState) -> String {
    let info = &state.info;
    let theme = &state.theme;
    let heading_face = helpview_face(theme.heading_font);

    let mut out = String::new();
    out.push_str(&format!(
        "<html><body bgcolor=\"{}\" text=\"{}\">\n",
        escape_html(&theme.background_color),
        escape_html(&theme.text_color),
    ));

    out.push_str(&format!(
        "<center><font size=\"7\" face=\"{}\"><b>{}</b></font><br>\n",
        heading_face,
        escape_html(&info.name),
    ));
    out.push_str(&format!(
        "<font size=\"3\">{}</font></center>\n<hr>\n",
        escape_html(&info.tagline.to_uppercase()),
    ));

    if theme.background_image.is_some() {
        out.push_str(
            "<center><font size=\"2\"><i>Background image active. \
             Open the print preview for full fidelity.</i></font></center><br>\n",
        );
    }

    for section in &state.sections {
        if theme.kind == ThemeKind::Rustic {
            out.push_str(&format!(
                "<hr><center><font size=\"5\" face=\"{}\"><b>{}</b></font></center><hr>\n",
                heading_face,
                escape_html(&section.title.to_uppercase()),
            ));
        } else {
            out.push_str(&format!(
                "<center><font size=\"5\" color=\"{}\" face=\"{}\"><b>{}</b></font></center>\n",
                escape_html(&info.accent_color),
                heading_face,
                escape_html(&section.title.to_uppercase()),
            ));
        }
        for dish in &section.items {
            helpview_dish(&mut out, dish, state);
        }
    }

    out.push_str("<hr>\n");
    out.push_str(&format!(
        "<center><font size=\"2\">{}</font>",
        escape_html(&info.contact)
    ));
    if let Some(url) = &info.website_url {
        out.push_str(&format!(
            "<br><font size=\"1\">{}</font>",
            escape_html(strip_scheme(url))
        ));
    }
    out.push_str("</center>\n</body></html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::model::{initial_state, ThemeKind};
    use crate::app::store::{DishField, MenuStore};

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_print_document_is_deterministic() {
        let state = initial_state();
        assert_eq!(print_document(&state), print_document(&state));
        assert_eq!(helpview_document(&state), helpview_document(&state));
    }

    #[test]
    fn test_print_document_contains_a4_page() {
        let doc = print_document(&initial_state());
        assert!(doc.contains("size: A4"));
        assert!(doc.contains("width: 210mm"));
        assert!(doc.contains("min-height: 297mm"));
    }

    #[test]
    fn test_print_document_has_header_and_footer() {
        let doc = print_document(&initial_state());
        assert!(doc.contains("<h1>La Dolce Vita</h1>"));
        assert!(doc.contains("Authentic Italian Cuisine"));
        // Scheme is stripped in the footer.
        assert!(doc.contains("example.com/menu"));
        assert!(!doc.contains(">https://example.com/menu<"));
    }

    #[test]
    fn test_modern_set_gets_dotted_leaders_and_filled_chips() {
        let mut store = MenuStore::new();
        for kind in [ThemeKind::Modern, ThemeKind::Midnight, ThemeKind::Ocean] {
            store.apply_preset(kind);
            let doc = print_document(store.state());
            assert!(doc.contains("class=\"leader\""), "{:?}", kind);
            assert!(doc.contains("chip chip-filled"), "{:?}", kind);
            assert!(!doc.contains("chip chip-outline"), "{:?}", kind);
        }
        for kind in [ThemeKind::Classic, ThemeKind::Rustic, ThemeKind::Jazz] {
            store.apply_preset(kind);
            let doc = print_document(store.state());
            assert!(!doc.contains("class=\"leader\""), "{:?}", kind);
            assert!(doc.contains("chip chip-outline"), "{:?}", kind);
        }
    }

    #[test]
    fn test_rustic_headings_are_ruled() {
        let mut store = MenuStore::new();
        store.apply_preset(ThemeKind::Rustic);
        let doc = print_document(store.state());
        assert!(doc.contains("<h2 class=\"ruled\">Starters</h2>"));

        store.apply_preset(ThemeKind::Classic);
        let doc = print_document(store.state());
        assert!(doc.contains("<h2 class=\"accent\">Starters</h2>"));
    }

    #[test]
    fn test_background_image_switches_to_overlay_layout() {
        let mut store = MenuStore::new();
        let doc = print_document(store.state());
        assert!(doc.contains("class=\"sheet\""));
        assert!(!doc.contains("class=\"sheet-overlay\""));

        let mut theme = store.state().theme.clone();
        theme.background_image = Some("data:image/png;base64,AAAA".to_string());
        store.set_theme(theme);
        let doc = print_document(store.state());
        assert!(doc.contains("class=\"sheet-overlay\""));
        assert!(doc.contains("background-image: url("));
    }

    #[test]
    fn test_tag_row_suppressed_when_empty() {
        let mut store = MenuStore::new();
        let section = store.add_section();
        store.add_dish(section).unwrap();
        // The fresh placeholder dish has no tags and no note.
        let doc = print_document(store.state());
        let placeholder_block = doc.split("New Dish").nth(1).unwrap();
        let next_dish = placeholder_block.find("class=\"dish\"").unwrap_or(placeholder_block.len());
        assert!(!placeholder_block[..next_dish].contains("class=\"tags\""));
    }

    #[test]
    fn test_tag_row_present_with_note_only() {
        let mut store = MenuStore::new();
        let section = store.state().sections[0].id;
        let dish = store.add_dish(section).unwrap();
        store.set_dish_field(section, dish, DishField::DietaryNote, "Contains nuts");
        let doc = print_document(store.state());
        assert!(doc.contains("<span class=\"note\">* Contains nuts</span>"));
    }

    #[test]
    fn test_dish_image_adds_thumbnail() {
        let mut store = MenuStore::new();
        let section = store.state().sections[0].id;
        let dish = store.state().sections[0].items[0].id;
        let doc = print_document(store.state());
        assert!(!doc.contains("class=\"thumb\""));

        store.set_dish_image(section, dish, Some("data:image/png;base64,AAAA".to_string()));
        let doc = print_document(store.state());
        assert!(doc.contains("class=\"thumb\""));
    }

    #[test]
    fn test_highlight_marks_dish_name() {
        let doc = print_document(&initial_state());
        // Calamari and Truffle Pasta are highlighted in the sample document.
        assert!(doc.contains("<span class=\"dish-name highlight\">Calamari</span>"));
        assert!(doc.contains("<span class=\"dish-name\">Bruschetta</span>"));
    }

    #[test]
    fn test_tags_render_in_catalog_order() {
        let doc = print_document(&initial_state());
        // Bruschetta carries V and VG; catalog order puts Vegetarian first.
        let veg = doc.find("Vegetarian").unwrap();
        let vegan = doc.find("Vegan").unwrap();
        assert!(veg < vegan);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut store = MenuStore::new();
        store.set_info_field(crate::app::store::InfoField::Name, "Fish & Chips <Bar>");
        let doc = print_document(store.state());
        assert!(doc.contains("Fish &amp; Chips &lt;Bar&gt;"));
        assert!(!doc.contains("<Bar>"));
    }

    #[test]
    fn test_helpview_document_layout_rules() {
        let mut store = MenuStore::new();
        store.apply_preset(ThemeKind::Modern);
        let doc = helpview_document(store.state());
        assert!(doc.contains(LEADER_DOTS));
        assert!(doc.contains("bgcolor=\"#f8fafc\""));

        store.apply_preset(ThemeKind::Classic);
        let doc = helpview_document(store.state());
        assert!(!doc.contains(LEADER_DOTS));
    }

    #[test]
    fn test_helpview_tag_labels_uppercase() {
        let doc = helpview_document(&initial_state());
        assert!(doc.contains("[GLUTEN-FREE]"));
        assert!(doc.contains("<i>* Contains shellfish</i>"));
    }
}
