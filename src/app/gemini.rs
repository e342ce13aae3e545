//! Gemini generative service adapter.
//!
//! Stateless blocking functions over the `generateContent` endpoint. Each
//! takes a resolved API key plus primitive arguments and returns typed
//! results; they run on worker threads and never touch application state.
//!
//! Contracts:
//! - `enhance_description` resolves to the original description on any
//!   failure.
//! - `generate_menu` fails loudly when the service is unreachable or the
//!   payload is malformed.
//! - `generate_theme` is a two-stage pipeline (design brief, then background
//!   image) where each stage has a fallback; it always yields colors and
//!   fonts, and omits the image when the second stage fails.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::{AppError, Result};
use super::model::{DishOutline, FontFamily, GeneratedTheme, MenuOutline, SectionOutline};

pub const MODEL_TEXT: &str = "gemini-2.5-flash";
pub const MODEL_IMAGE: &str = "gemini-3-pro-image-preview";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TIMEOUT_SECS: u64 = 60;

// --- Wire types (camelCase on the wire) ---

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
    image_size: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    fn text_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
            generation_config: None,
        }
    }

    fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }

    /// First inline image across all parts, as a self-contained data URL.
    fn first_inline_image(&self) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| format!("data:{};base64,{}", d.mime_type, d.data))
    }
}

fn generate(key: &str, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
    let url = format!("{}/{}:generateContent", API_BASE, model);
    let response = minreq::post(url)
        .with_header("x-goog-api-key", key)
        .with_header("Content-Type", "application/json")
        .with_timeout(TIMEOUT_SECS)
        .with_json(request)?
        .send()?;

    if !(200..300).contains(&response.status_code) {
        return Err(AppError::Generation(format!(
            "model endpoint returned status {}",
            response.status_code
        )));
    }
    Ok(response.json()?)
}

// --- Dish description enhancement ---

/// Rewrite a dish description. Resolves to the original description on any
/// failure; the caller applies the result as an ordinary field update.
pub fn enhance_description(key: &str, dish_name: &str, current: &str, ingredients: &str) -> String {
    let ingredient_context = if ingredients.trim().is_empty() {
        String::new()
    } else {
        format!("Key ingredients are: {}. ", ingredients)
    };
    let prompt = format!(
        "Write a mouth-watering, appetizing, short description (max 25 words) \
         for a restaurant dish named \"{}\". {}Current draft: \"{}\". \
         Make it sound expensive and delicious. Focus on flavor and texture.",
        dish_name, ingredient_context, current
    );

    match generate(key, MODEL_TEXT, &GenerateRequest::text_prompt(&prompt)) {
        Ok(response) => response
            .first_text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| current.to_string()),
        Err(e) => {
            eprintln!("Description enhancement failed: {}", e);
            current.to_string()
        }
    }
}

// --- Full menu suggestion ---

fn menu_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "description": { "type": "STRING" },
                                    "price": { "type": "STRING" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct WireMenu {
    #[serde(default)]
    sections: Vec<WireMenuSection>,
}

#[derive(Debug, Deserialize)]
struct WireMenuSection {
    #[serde(default)]
    title: String,
    #[serde(default)]
    items: Vec<WireMenuDish>,
}

#[derive(Debug, Deserialize)]
struct WireMenuDish {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: String,
}

fn parse_menu_outline(text: &str) -> Result<MenuOutline> {
    let wire: WireMenu = serde_json::from_str(text)?;
    if wire.sections.is_empty() {
        return Err(AppError::Generation(
            "menu response contained no sections".to_string(),
        ));
    }
    Ok(MenuOutline {
        sections: wire
            .sections
            .into_iter()
            .map(|s| SectionOutline {
                title: s.title,
                items: s
                    .items
                    .into_iter()
                    .map(|d| DishOutline {
                        name: d.name,
                        description: d.description,
                        price: d.price,
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Suggest a complete menu for the restaurant. Unreachable service or a
/// malformed payload propagates as an error; nothing is applied on failure.
pub fn generate_menu(key: &str, restaurant_name: &str, cuisine: &str) -> Result<MenuOutline> {
    let prompt = format!(
        "Generate a menu for a restaurant named \"{}\" serving {} cuisine. \
         Create 2 sections (e.g., Starters, Mains) with 2 dishes each. \
         Return JSON only.",
        restaurant_name, cuisine
    );
    let request = GenerateRequest::text_prompt(&prompt).with_config(GenerationConfig {
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(menu_schema()),
        image_config: None,
    });

    let response = generate(key, MODEL_TEXT, &request)?;
    let text = response
        .first_text()
        .ok_or_else(|| AppError::Generation("empty menu response".to_string()))?;
    parse_menu_outline(text)
}

// --- Theme generation (two-stage pipeline) ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireBrief {
    #[serde(default)]
    visual_description: String,
    #[serde(default)]
    text_color: String,
    #[serde(default)]
    background_color: String,
    #[serde(default)]
    heading_font: String,
    #[serde(default)]
    body_font: String,
}

#[derive(Debug, PartialEq)]
struct DesignBrief {
    visual_description: String,
    text_color: String,
    background_color: String,
    heading_font: FontFamily,
    body_font: FontFamily,
}

fn fallback_brief(mood: &str, colors: &str) -> DesignBrief {
    DesignBrief {
        visual_description: format!("{} {}", mood, colors).trim().to_string(),
        text_color: "#1e293b".to_string(),
        background_color: "#ffffff".to_string(),
        heading_font: FontFamily::Serif,
        body_font: FontFamily::Sans,
    }
}

fn is_hex_color(value: &str) -> bool {
    Regex::new(r"^#[0-9a-fA-F]{6}$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// Merge a wire brief with the fallback: every malformed field falls back
/// individually instead of discarding the whole brief.
fn brief_from_wire(wire: WireBrief, mood: &str, colors: &str) -> DesignBrief {
    let fallback = fallback_brief(mood, colors);
    DesignBrief {
        visual_description: if wire.visual_description.trim().is_empty() {
            fallback.visual_description
        } else {
            wire.visual_description
        },
        text_color: if is_hex_color(&wire.text_color) {
            wire.text_color
        } else {
            fallback.text_color
        },
        background_color: if is_hex_color(&wire.background_color) {
            wire.background_color
        } else {
            fallback.background_color
        },
        heading_font: FontFamily::parse(&wire.heading_font, fallback.heading_font),
        body_font: FontFamily::parse(&wire.body_font, fallback.body_font),
    }
}

fn brief_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "visualDescription": { "type": "STRING" },
            "textColor": { "type": "STRING" },
            "backgroundColor": { "type": "STRING" },
            "headingFont": { "type": "STRING" },
            "bodyFont": { "type": "STRING" }
        }
    })
}

/// Stage 1: ask the text model for a structured design brief. Falls back to
/// the hard-coded brief when the call or the payload fails.
fn design_brief(key: &str, mood: &str, colors: &str, fonts: &str) -> DesignBrief {
    let prompt = format!(
        "You are a professional menu designer.\n\
         User Preferences:\n\
         - Theme/Vibe: \"{}\"\n\
         - Preferred Colors: \"{}\"\n\
         - Preferred Fonts: \"{}\"\n\n\
         Task:\n\
         1. Create a visual description for a background image that matches \
         these preferences. This description will be passed to an image \
         generation model. Include color palette details in the description.\n\
         2. Select the best matching text color (hex code) that ensures high \
         readability on the described background.\n\
         3. Select a fallback background color (hex code).\n\
         4. Select the best font pairing from the available options: \
         'font-serif' (Classic/Elegant) or 'font-sans' (Modern/Clean) for \
         both headingFont and bodyFont.",
        mood, colors, fonts
    );
    let request = GenerateRequest::text_prompt(&prompt).with_config(GenerationConfig {
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(brief_schema()),
        image_config: None,
    });

    let parsed = generate(key, MODEL_TEXT, &request).and_then(|response| {
        let text = response
            .first_text()
            .ok_or_else(|| AppError::Generation("empty brief response".to_string()))?;
        Ok(serde_json::from_str::<WireBrief>(text)?)
    });

    match parsed {
        Ok(wire) => brief_from_wire(wire, mood, colors),
        Err(e) => {
            eprintln!("Theme analysis failed: {}", e);
            fallback_brief(mood, colors)
        }
    }
}

/// Stage 2: generate a portrait background texture from the brief's visual
/// description. Returns a data URL.
pub fn generate_background(key: &str, description: &str) -> Result<String> {
    let prompt = format!(
        "A high quality, professional, artistic background texture for a \
         restaurant menu. Theme: {}. Soft lighting, suitable for overlaying \
         text. No text in the image itself. High resolution, elegant.",
        description
    );
    let request = GenerateRequest::text_prompt(&prompt).with_config(GenerationConfig {
        response_mime_type: None,
        response_schema: None,
        image_config: Some(ImageConfig {
            aspect_ratio: "3:4".to_string(),
            image_size: "1K".to_string(),
        }),
    });

    let response = generate(key, MODEL_IMAGE, &request)?;
    response
        .first_inline_image()
        .ok_or_else(|| AppError::Generation("no image generated".to_string()))
}

/// Generate a full visual theme. Never fails once a key is in hand: stage 1
/// falls back to the hard-coded brief, stage 2 falls back to no image.
pub fn generate_theme(key: &str, mood: &str, colors: &str, fonts: &str) -> GeneratedTheme {
    let brief = design_brief(key, mood, colors, fonts);

    let background_image = match generate_background(key, &brief.visual_description) {
        Ok(data_url) => Some(data_url),
        Err(e) => {
            eprintln!("Background generation failed: {}", e);
            None
        }
    };

    GeneratedTheme {
        background_image,
        text_color: brief.text_color,
        background_color: brief.background_color,
        heading_font: brief.heading_font,
        body_font: brief.body_font,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateRequest::text_prompt("hi").with_config(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(json!({"type": "OBJECT"})),
            image_config: None,
        });
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(value["generationConfig"].get("imageConfig").is_none());
    }

    #[test]
    fn test_image_config_serializes_camel_case() {
        let request = GenerateRequest::text_prompt("x").with_config(GenerationConfig {
            response_mime_type: None,
            response_schema: None,
            image_config: Some(ImageConfig {
                aspect_ratio: "3:4".to_string(),
                image_size: "1K".to_string(),
            }),
        });
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["generationConfig"]["imageConfig"]["aspectRatio"], "3:4");
        assert_eq!(value["generationConfig"]["imageConfig"]["imageSize"], "1K");
    }

    #[test]
    fn test_response_first_text() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "hello"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text(), Some("hello"));
    }

    #[test]
    fn test_response_first_inline_image() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [
                {"text": "here you go"},
                {"inlineData": {"mimeType": "image/png", "data": "QUJD"}}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.first_inline_image().as_deref(),
            Some("data:image/png;base64,QUJD")
        );
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_text(), None);
        assert_eq!(response.first_inline_image(), None);
    }

    #[test]
    fn test_parse_menu_outline() {
        let outline = parse_menu_outline(
            r#"{"sections": [
                {"title": "Starters", "items": [
                    {"name": "Soup", "description": "Hot.", "price": "$8"}
                ]},
                {"title": "Mains", "items": [
                    {"name": "Steak", "description": "Rare.", "price": "$30"}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(outline.sections.len(), 2);
        assert_eq!(outline.sections[0].title, "Starters");
        assert_eq!(outline.sections[1].items[0].name, "Steak");
    }

    #[test]
    fn test_parse_menu_outline_rejects_malformed() {
        assert!(parse_menu_outline("not json").is_err());
        assert!(parse_menu_outline(r#"{"sections": []}"#).is_err());
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#1e293b"));
        assert!(is_hex_color("#FFFFFF"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("1e293b"));
        assert!(!is_hex_color("#1e293g"));
        assert!(!is_hex_color("white"));
    }

    #[test]
    fn test_fallback_brief() {
        let brief = fallback_brief("dark jazz bar", "gold & black");
        assert_eq!(brief.visual_description, "dark jazz bar gold & black");
        assert_eq!(brief.text_color, "#1e293b");
        assert_eq!(brief.background_color, "#ffffff");
        assert_eq!(brief.heading_font, FontFamily::Serif);
        assert_eq!(brief.body_font, FontFamily::Sans);
    }

    #[test]
    fn test_brief_from_wire_keeps_valid_fields() {
        let wire: WireBrief = serde_json::from_str(
            r##"{"visualDescription": "velvet curtains", "textColor": "#fbbf24",
                "backgroundColor": "#1c1917", "headingFont": "font-serif",
                "bodyFont": "font-sans"}"##,
        )
        .unwrap();
        let brief = brief_from_wire(wire, "jazz", "");
        assert_eq!(brief.visual_description, "velvet curtains");
        assert_eq!(brief.text_color, "#fbbf24");
        assert_eq!(brief.background_color, "#1c1917");
        assert_eq!(brief.heading_font, FontFamily::Serif);
        assert_eq!(brief.body_font, FontFamily::Sans);
    }

    #[test]
    fn test_brief_from_wire_falls_back_per_field() {
        let wire: WireBrief = serde_json::from_str(
            r##"{"visualDescription": "", "textColor": "tomato",
                "backgroundColor": "#1c1917", "headingFont": "wingdings",
                "bodyFont": "font-serif"}"##,
        )
        .unwrap();
        let brief = brief_from_wire(wire, "jazz bar", "gold");
        assert_eq!(brief.visual_description, "jazz bar gold");
        assert_eq!(brief.text_color, "#1e293b"); // fallback
        assert_eq!(brief.background_color, "#1c1917"); // kept
        assert_eq!(brief.heading_font, FontFamily::Serif); // fallback default
        assert_eq!(brief.body_font, FontFamily::Serif); // parsed
    }
}
