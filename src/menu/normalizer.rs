//! Flattening of raw upstream menus into [`MenuResponse`]

use crate::config::MenuConfig;
use crate::core::menu::{MenuCategory, MenuItem, MenuResponse, UNKNOWN_RESTAURANT};
use crate::menu::card::{self, MenuCard, non_empty_str};
use crate::menu::dish::{ImageUrlTemplate, extract_dish};
use indexmap::IndexMap;
use serde_json::Value;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const UNCATEGORIZED: &str = "Uncategorized";
const RECOMMENDED: &str = "Recommended";

/// Turns upstream menu payloads into the canonical menu model
///
/// Normalization is pure: it never fails and holds no state between calls,
/// so one normalizer can be shared across requests.
///
/// # Example
///
/// ```rust,ignore
/// let normalizer = MenuNormalizer::default();
/// let menu = normalizer.normalize(&raw, "588181", 12.9, 77.6);
/// for (name, category) in &menu.menu {
///     println!("{}: {} items", name, category.items.len());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MenuNormalizer {
    images: ImageUrlTemplate,
}

impl MenuNormalizer {
    pub fn new(images: ImageUrlTemplate) -> Self {
        Self { images }
    }

    pub fn from_config(config: &MenuConfig) -> Self {
        Self::new(ImageUrlTemplate::new(config.image_url_template.clone()))
    }

    /// Normalize a raw payload of shape `{ data: { cards: [...] } }`
    ///
    /// The identifiers only tag log output; the payload is the single input.
    pub fn normalize(&self, raw: &Value, restaurant_id: &str, lat: f64, lng: f64) -> MenuResponse {
        let cards = card::top_level_cards(raw);
        let restaurant_name =
            card::restaurant_name(cards).unwrap_or_else(|| UNKNOWN_RESTAURANT.to_string());

        let mut menu: IndexMap<String, MenuCategory> = IndexMap::new();
        for entry in card::regular_menu_cards(cards) {
            let Some(card_data) = entry.pointer("/card/card") else {
                continue;
            };
            let category = match MenuCard::classify(card_data) {
                MenuCard::FlatCategory(data) => self.flat_category(data),
                MenuCard::NestedCategory(data) => self.nested_category(data),
                MenuCard::Carousel(data) => self.carousel(data),
                MenuCard::Unknown(tag) => {
                    tracing::debug!(card_type = %tag, "ignoring menu card");
                    continue;
                }
            };
            menu.insert(category.name.clone(), category);
        }

        finalize(&mut menu);

        tracing::debug!(
            restaurant_id = %restaurant_id,
            lat,
            lng,
            restaurant = %restaurant_name,
            categories = menu.len(),
            "menu normalized"
        );

        MenuResponse {
            restaurant_name,
            menu,
        }
    }

    fn flat_category(&self, data: &Value) -> MenuCategory {
        let mut category = self.category_shell(data, UNCATEGORIZED);
        category.items = self.item_cards(data.get("itemCards"));
        category
    }

    fn nested_category(&self, data: &Value) -> MenuCategory {
        let mut category = self.flat_category(data);

        let Some(blocks) = data.get("categories").and_then(Value::as_array) else {
            return category;
        };
        let mut subcategories: IndexMap<String, Vec<MenuItem>> = IndexMap::new();
        for block in blocks {
            let Some(title) = non_empty_str(block.get("title")) else {
                continue;
            };
            let items = self.item_cards(block.get("itemCards"));
            if items.is_empty() {
                subcategories.shift_remove(&title);
            } else {
                subcategories.insert(title, items);
            }
        }
        if !subcategories.is_empty() {
            category.subcategories = Some(subcategories);
        }
        category
    }

    fn carousel(&self, data: &Value) -> MenuCategory {
        let mut category = self.category_shell(data, RECOMMENDED);
        category.items = data
            .get("carousel")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.pointer("/dish/info"))
                    .filter_map(|info| extract_dish(info, &self.images))
                    .collect()
            })
            .unwrap_or_default();
        category
    }

    fn category_shell(&self, data: &Value, fallback_name: &str) -> MenuCategory {
        let name = non_empty_str(data.get("title")).unwrap_or_else(|| fallback_name.to_string());
        MenuCategory::new(name, self.images.render(data.get("imageId")))
    }

    // Wrappers are `{ card: { info } }` or, in older payloads, `{ info }`
    fn item_cards(&self, wrappers: Option<&Value>) -> Vec<MenuItem> {
        let Some(wrappers) = wrappers.and_then(Value::as_array) else {
            return Vec::new();
        };
        wrappers
            .iter()
            .filter_map(|wrapper| {
                wrapper
                    .pointer("/card/info")
                    .filter(|info| !info.is_null())
                    .or_else(|| wrapper.get("info"))
            })
            .filter_map(|info| extract_dish(info, &self.images))
            .collect()
    }
}

/// Sort every item list and prune empty subcategories and categories
fn finalize(menu: &mut IndexMap<String, MenuCategory>) {
    for category in menu.values_mut() {
        category.items.sort_by(|a, b| collate(&a.name, &b.name));
        if let Some(subcategories) = category.subcategories.as_mut() {
            for items in subcategories.values_mut() {
                items.sort_by(|a, b| collate(&a.name, &b.name));
            }
            subcategories.retain(|_, items| !items.is_empty());
            if subcategories.is_empty() {
                category.subcategories = None;
            }
        }
    }
    menu.retain(|_, category| !category.is_empty());
}

/// Locale-style name ordering
///
/// Names compare on their base letters first, ignoring accents and case.
/// Ties fall back to accents (unaccented first) and then case (lowercase first).
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| b.cmp(a))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
