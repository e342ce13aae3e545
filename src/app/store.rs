//! The single application-state store.
//!
//! `MenuStore` owns the one `AppState` value. Every update operation builds
//! a complete new state and swaps it in; callers never reach into nested
//! collections. Operations addressed at identifiers the state does not
//! contain are no-ops, and no operation touches anything but its target.

use super::model::{
    AppState, Dish, DishId, GeneratedTheme, MenuOutline, MenuSection, MenuTheme, SectionId,
    ThemeKind, INITIAL_ID_CEILING,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    Name,
    Tagline,
    Contact,
    AccentColor,
    Website,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishField {
    Name,
    Description,
    Price,
    Ingredients,
    DietaryNote,
}

pub struct MenuStore {
    state: AppState,
    next_id: u64,
}

impl MenuStore {
    pub fn new() -> Self {
        Self::with_state(super::model::initial_state())
    }

    /// Start from an arbitrary document. The id counter resumes above every
    /// identifier already present, so fresh ids never collide with it.
    pub fn with_state(state: AppState) -> Self {
        let max_seen = state
            .sections
            .iter()
            .flat_map(|s| std::iter::once(s.id.0).chain(s.items.iter().map(|d| d.id.0)))
            .max()
            .unwrap_or(0);
        Self {
            state,
            next_id: max_seen.max(INITIAL_ID_CEILING - 1) + 1,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build a new state where the matching section is replaced by `f`'s
    /// result and everything else is carried over unchanged.
    fn map_section(&mut self, id: SectionId, f: impl Fn(&MenuSection) -> MenuSection) {
        let sections = self
            .state
            .sections
            .iter()
            .map(|s| if s.id == id { f(s) } else { s.clone() })
            .collect();
        self.state = AppState {
            info: self.state.info.clone(),
            sections,
            theme: self.state.theme.clone(),
        };
    }

    fn map_dish(&mut self, section: SectionId, dish: DishId, f: impl Fn(&Dish) -> Dish) {
        self.map_section(section, |s| MenuSection {
            id: s.id,
            title: s.title.clone(),
            items: s
                .items
                .iter()
                .map(|d| if d.id == dish { f(d) } else { d.clone() })
                .collect(),
        });
    }

    // --- Restaurant info ---

    pub fn set_info_field(&mut self, field: InfoField, value: &str) {
        let mut info = self.state.info.clone();
        match field {
            InfoField::Name => info.name = value.to_string(),
            InfoField::Tagline => info.tagline = value.to_string(),
            InfoField::Contact => info.contact = value.to_string(),
            InfoField::AccentColor => info.accent_color = value.to_string(),
            InfoField::Website => {
                info.website_url = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
        }
        self.state = AppState {
            info,
            sections: self.state.sections.clone(),
            theme: self.state.theme.clone(),
        };
    }

    // --- Sections ---

    pub fn add_section(&mut self) -> SectionId {
        let id = SectionId(self.fresh_id());
        let mut sections = self.state.sections.clone();
        sections.push(MenuSection {
            id,
            title: "New Section".to_string(),
            items: Vec::new(),
        });
        self.state = AppState {
            info: self.state.info.clone(),
            sections,
            theme: self.state.theme.clone(),
        };
        id
    }

    pub fn remove_section(&mut self, id: SectionId) {
        let sections = self
            .state
            .sections
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        self.state = AppState {
            info: self.state.info.clone(),
            sections,
            theme: self.state.theme.clone(),
        };
    }

    pub fn rename_section(&mut self, id: SectionId, title: &str) {
        self.map_section(id, |s| MenuSection {
            id: s.id,
            title: title.to_string(),
            items: s.items.clone(),
        });
    }

    // --- Dishes ---

    /// Add a placeholder dish to a section. Returns `None` (and changes
    /// nothing) when the section does not exist.
    pub fn add_dish(&mut self, section: SectionId) -> Option<DishId> {
        if !self.state.sections.iter().any(|s| s.id == section) {
            return None;
        }
        let id = DishId(self.fresh_id());
        self.map_section(section, |s| {
            let mut items = s.items.clone();
            items.push(Dish::new(id));
            MenuSection {
                id: s.id,
                title: s.title.clone(),
                items,
            }
        });
        Some(id)
    }

    pub fn remove_dish(&mut self, section: SectionId, dish: DishId) {
        self.map_section(section, |s| MenuSection {
            id: s.id,
            title: s.title.clone(),
            items: s.items.iter().filter(|d| d.id != dish).cloned().collect(),
        });
    }

    pub fn set_dish_field(&mut self, section: SectionId, dish: DishId, field: DishField, value: &str) {
        self.map_dish(section, dish, |d| {
            let mut d = d.clone();
            match field {
                DishField::Name => d.name = value.to_string(),
                DishField::Description => d.description = value.to_string(),
                DishField::Price => d.price = value.to_string(),
                DishField::Ingredients => d.ingredients = value.to_string(),
                DishField::DietaryNote => d.dietary_note = value.to_string(),
            }
            d
        });
    }

    pub fn set_dish_highlight(&mut self, section: SectionId, dish: DishId, highlight: bool) {
        self.map_dish(section, dish, |d| {
            let mut d = d.clone();
            d.highlight = highlight;
            d
        });
    }

    /// Set semantics: add the tag if absent, remove it if present.
    pub fn toggle_dietary_tag(&mut self, section: SectionId, dish: DishId, tag: &str) {
        self.map_dish(section, dish, |d| {
            let mut d = d.clone();
            if !d.dietary_tags.remove(tag) {
                d.dietary_tags.insert(tag.to_string());
            }
            d
        });
    }

    pub fn set_dish_image(&mut self, section: SectionId, dish: DishId, image: Option<String>) {
        self.map_dish(section, dish, |d| {
            let mut d = d.clone();
            d.image = image.clone();
            d
        });
    }

    // --- Theme ---

    pub fn set_theme(&mut self, theme: MenuTheme) {
        self.state = AppState {
            info: self.state.info.clone(),
            sections: self.state.sections.clone(),
            theme,
        };
    }

    /// Apply a fixed preset. The resulting colors and fonts depend only on
    /// the preset, never on the prior theme; any background image and
    /// generation prompt are cleared.
    pub fn apply_preset(&mut self, kind: ThemeKind) {
        self.set_theme(MenuTheme::preset(kind));
    }

    /// Manual readability adjustment for text over AI backgrounds.
    pub fn set_text_color(&mut self, color: &str) {
        let mut theme = self.state.theme.clone();
        theme.text_color = color.to_string();
        self.set_theme(theme);
    }

    pub fn apply_generated_theme(&mut self, generated: &GeneratedTheme, prompt: &str) {
        self.set_theme(MenuTheme {
            kind: ThemeKind::CustomAi,
            background_image: generated.background_image.clone(),
            text_color: generated.text_color.clone(),
            background_color: generated.background_color.clone(),
            heading_font: generated.heading_font,
            body_font: generated.body_font,
            generated_prompt: Some(prompt.to_string()),
        });
    }

    // --- Bulk replacement (accepted menu suggestions) ---

    /// Replace the whole section list with a generated outline. Every
    /// section and dish receives a fresh identifier from the store counter,
    /// so ids are distinct within the batch and from everything created
    /// before it.
    pub fn replace_sections(&mut self, outline: &MenuOutline) {
        let mut sections = Vec::with_capacity(outline.sections.len());
        for section in &outline.sections {
            let section_id = SectionId(self.fresh_id());
            let mut items = Vec::with_capacity(section.items.len());
            for dish in &section.items {
                let mut d = Dish::new(DishId(self.fresh_id()));
                d.name = dish.name.clone();
                d.description = dish.description.clone();
                d.price = dish.price.clone();
                items.push(d);
            }
            sections.push(MenuSection {
                id: section_id,
                title: section.title.clone(),
                items,
            });
        }
        self.state = AppState {
            info: self.state.info.clone(),
            sections,
            theme: self.state.theme.clone(),
        };
    }
}

impl Default for MenuStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::model::{initial_state, DishOutline, FontFamily, SectionOutline};

    fn starters_id(store: &MenuStore) -> SectionId {
        store.state().sections[0].id
    }

    #[test]
    fn test_set_info_field_targets_only_that_field() {
        let mut store = MenuStore::new();
        let before = store.state().clone();

        store.set_info_field(InfoField::Name, "Trattoria Nuova");

        assert_eq!(store.state().info.name, "Trattoria Nuova");
        assert_eq!(store.state().info.tagline, before.info.tagline);
        assert_eq!(store.state().info.contact, before.info.contact);
        assert_eq!(store.state().sections, before.sections);
        assert_eq!(store.state().theme, before.theme);
    }

    #[test]
    fn test_empty_website_clears_url() {
        let mut store = MenuStore::new();
        store.set_info_field(InfoField::Website, "  ");
        assert_eq!(store.state().info.website_url, None);

        store.set_info_field(InfoField::Website, "https://menu.example");
        assert_eq!(
            store.state().info.website_url.as_deref(),
            Some("https://menu.example")
        );
    }

    #[test]
    fn test_add_section_appends_empty_section() {
        let mut store = MenuStore::new();
        let id = store.add_section();

        let last = store.state().sections.last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.title, "New Section");
        assert!(last.items.is_empty());
        assert_eq!(store.state().sections.len(), 3);
    }

    #[test]
    fn test_remove_section_removes_its_dishes() {
        let mut store = MenuStore::new();
        let before = store.state().clone();
        let starters = starters_id(&store);
        let removed_dishes: Vec<DishId> =
            before.sections[0].items.iter().map(|d| d.id).collect();

        store.remove_section(starters);

        assert_eq!(store.state().sections.len(), 1);
        assert_eq!(store.state().sections[0].title, "Mains");
        for section in &store.state().sections {
            for dish in &section.items {
                assert!(!removed_dishes.contains(&dish.id));
            }
        }
        // Everything unrelated survives untouched.
        assert_eq!(store.state().info, before.info);
        assert_eq!(store.state().theme, before.theme);
    }

    #[test]
    fn test_remove_unknown_section_is_noop() {
        let mut store = MenuStore::new();
        let before = store.state().clone();
        store.remove_section(SectionId(9999));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_rename_section() {
        let mut store = MenuStore::new();
        let starters = starters_id(&store);
        store.rename_section(starters, "Antipasti");
        assert_eq!(store.state().sections[0].title, "Antipasti");
        assert_eq!(store.state().sections[1].title, "Mains");
    }

    #[test]
    fn test_add_dish_placeholder() {
        let mut store = MenuStore::new();
        let section = store.add_section();
        let dish = store.add_dish(section).unwrap();

        let items = &store.state().sections.last().unwrap().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, dish);
        assert_eq!(items[0].name, "New Dish");
        assert_eq!(items[0].price, "$0");
        assert!(items[0].dietary_tags.is_empty());
        assert!(!items[0].highlight);
        assert_eq!(items[0].image, None);
    }

    #[test]
    fn test_add_dish_unknown_section_is_noop() {
        let mut store = MenuStore::new();
        let before = store.state().clone();
        assert_eq!(store.add_dish(SectionId(9999)), None);
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_set_dish_field_leaves_siblings_alone() {
        let mut store = MenuStore::new();
        let starters = starters_id(&store);
        let bruschetta = store.state().sections[0].items[0].id;
        let calamari_before = store.state().sections[0].items[1].clone();

        store.set_dish_field(starters, bruschetta, DishField::Price, "$14");

        assert_eq!(store.state().sections[0].items[0].price, "$14");
        assert_eq!(store.state().sections[0].items[1], calamari_before);
    }

    #[test]
    fn test_set_dish_field_unknown_dish_is_noop() {
        let mut store = MenuStore::new();
        let before = store.state().clone();
        let starters = starters_id(&store);
        store.set_dish_field(starters, DishId(9999), DishField::Name, "Ghost");
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_identity_description_update_preserves_state() {
        // A failed enhancement resolves to the unchanged description;
        // applying it must leave the document exactly as it was.
        let mut store = MenuStore::new();
        let before = store.state().clone();
        let starters = starters_id(&store);
        let dish = before.sections[0].items[0].clone();

        store.set_dish_field(starters, dish.id, DishField::Description, &dish.description);

        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_toggle_tag_twice_restores_original_set() {
        let mut store = MenuStore::new();
        let starters = starters_id(&store);
        let dish = store.state().sections[0].items[0].id;
        let original = store.state().sections[0].items[0].dietary_tags.clone();

        store.toggle_dietary_tag(starters, dish, "GF");
        assert!(store.state().sections[0].items[0].dietary_tags.contains("GF"));

        store.toggle_dietary_tag(starters, dish, "GF");
        assert_eq!(store.state().sections[0].items[0].dietary_tags, original);
    }

    #[test]
    fn test_toggle_tag_removes_present_tag() {
        let mut store = MenuStore::new();
        let starters = starters_id(&store);
        let dish = store.state().sections[0].items[0].id;
        assert!(store.state().sections[0].items[0].dietary_tags.contains("V"));

        store.toggle_dietary_tag(starters, dish, "V");
        assert!(!store.state().sections[0].items[0].dietary_tags.contains("V"));
    }

    #[test]
    fn test_set_and_clear_dish_image() {
        let mut store = MenuStore::new();
        let starters = starters_id(&store);
        let dish = store.state().sections[0].items[0].id;

        store.set_dish_image(starters, dish, Some("data:image/png;base64,AAAA".to_string()));
        assert!(store.state().sections[0].items[0].image.is_some());

        store.set_dish_image(starters, dish, None);
        assert_eq!(store.state().sections[0].items[0].image, None);
    }

    #[test]
    fn test_set_dish_highlight() {
        let mut store = MenuStore::new();
        let starters = starters_id(&store);
        let dish = store.state().sections[0].items[0].id;

        store.set_dish_highlight(starters, dish, true);
        assert!(store.state().sections[0].items[0].highlight);
    }

    #[test]
    fn test_apply_preset_is_deterministic() {
        let mut store = MenuStore::new();
        store.apply_preset(ThemeKind::Jazz);
        let first = store.state().theme.clone();

        // A different starting point must not leak into the result.
        store.apply_preset(ThemeKind::Midnight);
        store.set_text_color("#ff00ff");
        store.apply_preset(ThemeKind::Jazz);

        assert_eq!(store.state().theme, first);
        assert_eq!(first.text_color, "#fbbf24");
        assert_eq!(first.background_color, "#1c1917");
        assert_eq!(first.heading_font, FontFamily::Serif);
        assert_eq!(first.body_font, FontFamily::Serif);
    }

    #[test]
    fn test_preset_clears_generated_background() {
        let mut store = MenuStore::new();
        let generated = GeneratedTheme {
            background_image: Some("data:image/png;base64,AAAA".to_string()),
            text_color: "#ffffff".to_string(),
            background_color: "#101010".to_string(),
            heading_font: FontFamily::Serif,
            body_font: FontFamily::Sans,
        };
        store.apply_generated_theme(&generated, "dark moody jazz bar");
        assert_eq!(store.state().theme.kind, ThemeKind::CustomAi);
        assert!(store.state().theme.background_image.is_some());
        assert_eq!(
            store.state().theme.generated_prompt.as_deref(),
            Some("dark moody jazz bar")
        );

        store.apply_preset(ThemeKind::Classic);
        assert_eq!(store.state().theme.background_image, None);
        assert_eq!(store.state().theme.generated_prompt, None);
    }

    #[test]
    fn test_replace_sections_assigns_fresh_distinct_ids() {
        let mut store = MenuStore::new();
        let manual_section = store.add_section();
        let manual_dish = store.add_dish(manual_section).unwrap();

        let outline = MenuOutline {
            sections: vec![
                SectionOutline {
                    title: "Starters".to_string(),
                    items: vec![
                        DishOutline {
                            name: "Soup".to_string(),
                            description: "Hot.".to_string(),
                            price: "$8".to_string(),
                        },
                        DishOutline {
                            name: "Salad".to_string(),
                            description: "Cold.".to_string(),
                            price: "$9".to_string(),
                        },
                    ],
                },
                SectionOutline {
                    title: "Mains".to_string(),
                    items: vec![
                        DishOutline {
                            name: "Steak".to_string(),
                            description: "Rare.".to_string(),
                            price: "$30".to_string(),
                        },
                        DishOutline {
                            name: "Pasta".to_string(),
                            description: "Fresh.".to_string(),
                            price: "$22".to_string(),
                        },
                    ],
                },
            ],
        };
        store.replace_sections(&outline);

        let state = store.state();
        assert_eq!(state.sections.len(), 2);
        let dishes: Vec<&Dish> = state.sections.iter().flat_map(|s| s.items.iter()).collect();
        assert_eq!(dishes.len(), 4);

        let mut ids: Vec<u64> = state
            .sections
            .iter()
            .flat_map(|s| std::iter::once(s.id.0).chain(s.items.iter().map(|d| d.id.0)))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6, "section and dish ids must be mutually distinct");
        assert!(!ids.contains(&manual_section.0));
        assert!(!ids.contains(&manual_dish.0));
    }

    #[test]
    fn test_with_state_resumes_counter_above_existing_ids() {
        let mut store = MenuStore::with_state(initial_state());
        let id = store.add_section();
        assert!(id.0 >= INITIAL_ID_CEILING);
    }

    #[test]
    fn test_operations_never_mutate_shared_history() {
        // Snapshots taken before an operation must not observe it.
        let mut store = MenuStore::new();
        let snapshot = store.state().clone();
        let starters = starters_id(&store);
        store.rename_section(starters, "Changed");
        assert_eq!(snapshot.sections[0].title, "Starters");
    }
}
