use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DishId(pub u64);

/// One orderable item within a menu section.
#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub description: String,
    /// Free text so prices like "$12" or "market price" work unchanged.
    pub price: String,
    pub highlight: bool,
    pub ingredients: String,
    pub dietary_tags: BTreeSet<String>,
    pub dietary_note: String,
    /// Self-contained data URL, never a file reference.
    pub image: Option<String>,
}

impl Dish {
    pub fn new(id: DishId) -> Self {
        Self {
            id,
            name: "New Dish".to_string(),
            description: "Description...".to_string(),
            price: "$0".to_string(),
            highlight: false,
            ingredients: String::new(),
            dietary_tags: BTreeSet::new(),
            dietary_note: String::new(),
            image: None,
        }
    }
}

/// A named, ordered grouping of dishes. Item order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub id: SectionId,
    pub title: String,
    pub items: Vec<Dish>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantInfo {
    pub name: String,
    pub tagline: String,
    pub contact: String,
    pub accent_color: String,
    pub website_url: Option<String>,
}

/// The closed set of menu themes. `CustomAi` is the only variant expected to
/// carry a background image and the prompt that generated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Classic,
    Modern,
    Rustic,
    Midnight,
    Jazz,
    Ocean,
    CustomAi,
}

impl ThemeKind {
    pub const PRESETS: [ThemeKind; 6] = [
        ThemeKind::Classic,
        ThemeKind::Modern,
        ThemeKind::Rustic,
        ThemeKind::Midnight,
        ThemeKind::Jazz,
        ThemeKind::Ocean,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ThemeKind::Classic => "Classic",
            ThemeKind::Modern => "Modern",
            ThemeKind::Rustic => "Rustic",
            ThemeKind::Midnight => "Midnight",
            ThemeKind::Jazz => "Jazz",
            ThemeKind::Ocean => "Ocean",
            ThemeKind::CustomAi => "AI Custom",
        }
    }

    /// Modern-style variants share dotted price leaders and filled tag chips.
    pub fn is_modern_style(self) -> bool {
        matches!(
            self,
            ThemeKind::Modern | ThemeKind::Midnight | ThemeKind::Ocean
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Serif,
    Sans,
}

impl FontFamily {
    /// Lenient parse of the "font-serif"/"font-sans" vocabulary the design
    /// model answers with. Anything unrecognized falls back to `default`.
    pub fn parse(value: &str, default: FontFamily) -> FontFamily {
        let v = value.trim().to_lowercase();
        if v.contains("serif") && !v.contains("sans") {
            FontFamily::Serif
        } else if v.contains("sans") {
            FontFamily::Sans
        } else {
            default
        }
    }

    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Serif => "Georgia, 'Times New Roman', serif",
            FontFamily::Sans => "'Helvetica Neue', Arial, sans-serif",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuTheme {
    pub kind: ThemeKind,
    /// URL or data URL. Presence switches the preview to the overlay layout.
    pub background_image: Option<String>,
    pub text_color: String,
    pub background_color: String,
    pub heading_font: FontFamily,
    pub body_font: FontFamily,
    pub generated_prompt: Option<String>,
}

impl MenuTheme {
    /// The fixed parameter bundle for a preset. `CustomAi` has no preset
    /// values; asking for it returns the `Classic` bundle.
    pub fn preset(kind: ThemeKind) -> MenuTheme {
        let (text, background, heading, body) = match kind {
            ThemeKind::Modern => ("#0f172a", "#f8fafc", FontFamily::Sans, FontFamily::Sans),
            ThemeKind::Rustic => ("#422006", "#fef3c7", FontFamily::Serif, FontFamily::Serif),
            ThemeKind::Midnight => ("#f1f5f9", "#0f172a", FontFamily::Sans, FontFamily::Sans),
            ThemeKind::Jazz => ("#fbbf24", "#1c1917", FontFamily::Serif, FontFamily::Serif),
            ThemeKind::Ocean => ("#164e63", "#ecfeff", FontFamily::Sans, FontFamily::Serif),
            ThemeKind::Classic | ThemeKind::CustomAi => {
                ("#1e293b", "#ffffff", FontFamily::Serif, FontFamily::Sans)
            }
        };
        MenuTheme {
            kind,
            background_image: None,
            text_color: text.to_string(),
            background_color: background.to_string(),
            heading_font: heading,
            body_font: body,
            generated_prompt: None,
        }
    }
}

/// The whole document. Owned exclusively by the store; every mutation
/// replaces the full value, nested structures are never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub info: RestaurantInfo,
    pub sections: Vec<MenuSection>,
    pub theme: MenuTheme,
}

/// A menu suggestion returned by the generative service, before the store
/// assigns identifiers to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOutline {
    pub sections: Vec<SectionOutline>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutline {
    pub title: String,
    pub items: Vec<DishOutline>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DishOutline {
    pub name: String,
    pub description: String,
    pub price: String,
}

/// A generated visual theme. `background_image` is `None` when the image
/// stage of the pipeline failed; colors and fonts are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTheme {
    pub background_image: Option<String>,
    pub text_color: String,
    pub background_color: String,
    pub heading_font: FontFamily,
    pub body_font: FontFamily,
}

/// A dietary tag from the fixed catalog.
pub struct DietaryTag {
    pub id: &'static str,
    pub label: &'static str,
}

pub const DIETARY_TAGS: [DietaryTag; 6] = [
    DietaryTag { id: "GF", label: "Gluten-Free" },
    DietaryTag { id: "V", label: "Vegetarian" },
    DietaryTag { id: "VG", label: "Vegan" },
    DietaryTag { id: "DF", label: "Dairy-Free" },
    DietaryTag { id: "NF", label: "Nut-Free" },
    DietaryTag { id: "SP", label: "Spicy" },
];

/// Human label for a tag id; unknown ids render verbatim.
pub fn tag_label(id: &str) -> &str {
    DIETARY_TAGS
        .iter()
        .find(|t| t.id == id)
        .map_or(id, |t| t.label)
}

fn sample_dish(
    id: u64,
    name: &str,
    description: &str,
    price: &str,
    highlight: bool,
    ingredients: &str,
    tags: &[&str],
    note: &str,
) -> Dish {
    Dish {
        id: DishId(id),
        name: name.to_string(),
        description: description.to_string(),
        price: price.to_string(),
        highlight,
        ingredients: ingredients.to_string(),
        dietary_tags: tags.iter().map(|t| t.to_string()).collect(),
        dietary_note: note.to_string(),
        image: None,
    }
}

/// The fixed sample document shown on startup. Ids 1..=6 are reserved for it;
/// the store hands out fresh ids strictly above this range.
pub const INITIAL_ID_CEILING: u64 = 7;

pub fn initial_state() -> AppState {
    AppState {
        info: RestaurantInfo {
            name: "La Dolce Vita".to_string(),
            tagline: "Authentic Italian Cuisine".to_string(),
            contact: "123 Flavor St, Foodville \u{2022} (555) 123-4567".to_string(),
            accent_color: "#d97706".to_string(),
            website_url: Some("https://example.com/menu".to_string()),
        },
        sections: vec![
            MenuSection {
                id: SectionId(1),
                title: "Starters".to_string(),
                items: vec![
                    sample_dish(
                        2,
                        "Bruschetta",
                        "Grilled bread rubbed with garlic and topped with olive oil and salt.",
                        "$12",
                        false,
                        "Bread, Garlic, Olive Oil, Salt, Tomatoes, Basil",
                        &["V", "VG"],
                        "",
                    ),
                    sample_dish(
                        3,
                        "Calamari",
                        "Fried squid served with lemon and marinara sauce.",
                        "$16",
                        true,
                        "Squid, Flour, Lemon, Marinara",
                        &["DF"],
                        "Contains shellfish",
                    ),
                ],
            },
            MenuSection {
                id: SectionId(4),
                title: "Mains".to_string(),
                items: vec![
                    sample_dish(
                        5,
                        "Truffle Pasta",
                        "Fresh tagliatelle with black truffle cream sauce.",
                        "$28",
                        true,
                        "Pasta, Cream, Black Truffle, Parmesan",
                        &["V"],
                        "",
                    ),
                    sample_dish(
                        6,
                        "Grilled Salmon",
                        "Atlantic salmon served with asparagus and quinoa.",
                        "$32",
                        false,
                        "Salmon, Asparagus, Quinoa, Lemon Butter",
                        &["GF"],
                        "",
                    ),
                ],
            },
        ],
        theme: MenuTheme::preset(ThemeKind::Classic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_label_known() {
        assert_eq!(tag_label("GF"), "Gluten-Free");
        assert_eq!(tag_label("SP"), "Spicy");
    }

    #[test]
    fn test_tag_label_unknown_passes_through() {
        assert_eq!(tag_label("XX"), "XX");
    }

    #[test]
    fn test_preset_values_are_fixed() {
        let rustic = MenuTheme::preset(ThemeKind::Rustic);
        assert_eq!(rustic.text_color, "#422006");
        assert_eq!(rustic.background_color, "#fef3c7");
        assert_eq!(rustic.heading_font, FontFamily::Serif);
        assert_eq!(rustic.body_font, FontFamily::Serif);
        assert_eq!(rustic.background_image, None);
        assert_eq!(rustic.generated_prompt, None);
    }

    #[test]
    fn test_modern_style_set() {
        assert!(ThemeKind::Modern.is_modern_style());
        assert!(ThemeKind::Midnight.is_modern_style());
        assert!(ThemeKind::Ocean.is_modern_style());
        assert!(!ThemeKind::Classic.is_modern_style());
        assert!(!ThemeKind::Rustic.is_modern_style());
        assert!(!ThemeKind::Jazz.is_modern_style());
        assert!(!ThemeKind::CustomAi.is_modern_style());
    }

    #[test]
    fn test_font_family_parse() {
        assert_eq!(FontFamily::parse("font-serif", FontFamily::Sans), FontFamily::Serif);
        assert_eq!(FontFamily::parse("font-sans", FontFamily::Serif), FontFamily::Sans);
        assert_eq!(FontFamily::parse("Serif", FontFamily::Sans), FontFamily::Serif);
        assert_eq!(FontFamily::parse("sans-serif", FontFamily::Serif), FontFamily::Sans);
        assert_eq!(FontFamily::parse("comic", FontFamily::Serif), FontFamily::Serif);
    }

    #[test]
    fn test_initial_state_ids_below_ceiling() {
        let state = initial_state();
        for section in &state.sections {
            assert!(section.id.0 < INITIAL_ID_CEILING);
            for dish in &section.items {
                assert!(dish.id.0 < INITIAL_ID_CEILING);
            }
        }
    }

    #[test]
    fn test_initial_state_shape() {
        let state = initial_state();
        assert_eq!(state.sections.len(), 2);
        assert_eq!(state.sections[0].title, "Starters");
        assert_eq!(state.sections[1].title, "Mains");
        assert_eq!(state.sections[0].items.len(), 2);
        assert_eq!(state.theme.kind, ThemeKind::Classic);
    }
}
