//! Upstream card shapes
//!
//! The upstream payload is a list of loosely typed "cards" distinguished by an
//! `@type` tag. Only the tag decides how a card is read; field probing happens
//! after classification.

use serde_json::Value;

/// Type tag of the card carrying restaurant metadata
pub const RESTAURANT_CARD_TYPE: &str = "type.googleapis.com/swiggy.presentation.food.v2.Restaurant";

const TEXT_BOX_MARKER: &str = "TextBoxV2";
const NESTED_CATEGORY_MARKER: &str = "NestedItemCategory";
const ITEM_CATEGORY_MARKER: &str = "ItemCategory";
const MENU_CATEGORY_MARKER: &str = "MenuCategory";
const CAROUSEL_MARKER: &str = "MenuCarousel";

/// A menu card of the regular card group, classified by its type tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuCard<'a> {
    /// `itemCards[].card.info`
    FlatCategory(&'a Value),
    /// `categories[].itemCards[]` plus optional direct `itemCards`
    NestedCategory(&'a Value),
    /// `carousel[].dish.info`
    Carousel(&'a Value),
    /// Anything else, skipped
    Unknown(&'a str),
}

impl<'a> MenuCard<'a> {
    /// Classify the inner `card.card` object of a regular-group entry
    pub fn classify(card_data: &'a Value) -> Self {
        let tag = type_tag(card_data);
        if tag.contains(NESTED_CATEGORY_MARKER) {
            MenuCard::NestedCategory(card_data)
        } else if tag.contains(ITEM_CATEGORY_MARKER) || tag.contains(MENU_CATEGORY_MARKER) {
            MenuCard::FlatCategory(card_data)
        } else if tag.contains(CAROUSEL_MARKER) {
            MenuCard::Carousel(card_data)
        } else {
            MenuCard::Unknown(tag)
        }
    }
}

/// The `@type` tag of a card body, empty when absent
pub fn type_tag(card_data: &Value) -> &str {
    card_data
        .get("@type")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Top-level cards of a raw payload (`data.cards`)
pub fn top_level_cards(raw: &Value) -> &[Value] {
    raw.pointer("/data/cards")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Cards of the regular menu group, in upstream order
///
/// Missing group means an empty menu, not an error.
pub fn regular_menu_cards(cards: &[Value]) -> &[Value] {
    cards
        .iter()
        .find_map(|card| card.pointer("/groupedCard/cardGroupMap/REGULAR"))
        .and_then(|group| group.get("cards"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Resolve the restaurant name from the metadata card, then a text banner
pub fn restaurant_name(cards: &[Value]) -> Option<String> {
    let from_metadata = cards.iter().find_map(|card| {
        let body = card.pointer("/card/card")?;
        if type_tag(body) == RESTAURANT_CARD_TYPE {
            non_empty_str(body.pointer("/info/name"))
        } else {
            None
        }
    });
    if from_metadata.is_some() {
        return from_metadata;
    }

    cards
        .iter()
        .filter_map(|card| card.pointer("/card/card"))
        .find(|body| type_tag(body).contains(TEXT_BOX_MARKER))
        .and_then(|body| non_empty_str(body.get("text")))
}

pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_by_type_tag() {
        let nested = json!({ "@type": "type.googleapis.com/swiggy.presentation.food.v2.NestedItemCategory" });
        let flat = json!({ "@type": "type.googleapis.com/swiggy.presentation.food.v2.ItemCategory" });
        let carousel = json!({ "@type": "type.googleapis.com/swiggy.presentation.food.v2.MenuCarousel" });
        let license = json!({ "@type": "type.googleapis.com/swiggy.presentation.food.v2.RestaurantLicenseInfo" });

        assert!(matches!(MenuCard::classify(&nested), MenuCard::NestedCategory(_)));
        assert!(matches!(MenuCard::classify(&flat), MenuCard::FlatCategory(_)));
        assert!(matches!(MenuCard::classify(&carousel), MenuCard::Carousel(_)));
        assert!(matches!(MenuCard::classify(&license), MenuCard::Unknown(_)));
        assert_eq!(MenuCard::classify(&json!({})), MenuCard::Unknown(""));
    }

    #[test]
    fn test_regular_cards_missing_group_is_empty() {
        let cards = vec![json!({ "card": {} })];
        assert!(regular_menu_cards(&cards).is_empty());
    }

    #[test]
    fn test_regular_cards_found_in_any_position() {
        let cards = vec![
            json!({ "card": { "card": {} } }),
            json!({ "groupedCard": { "cardGroupMap": { "REGULAR": { "cards": [ {}, {} ] } } } }),
        ];
        assert_eq!(regular_menu_cards(&cards).len(), 2);
    }

    #[test]
    fn test_restaurant_name_falls_back_to_text_box() {
        let cards = vec![json!({
            "card": { "card": {
                "@type": "type.googleapis.com/swiggy.gandalf.widgets.v2.TextBoxV2",
                "text": "Blue Tokai Coffee Roasters"
            } }
        })];
        assert_eq!(
            restaurant_name(&cards).as_deref(),
            Some("Blue Tokai Coffee Roasters")
        );
    }

    #[test]
    fn test_metadata_card_wins_over_text_box() {
        let cards = vec![
            json!({ "card": { "card": { "@type": "x.TextBoxV2", "text": "Banner" } } }),
            json!({ "card": { "card": { "@type": RESTAURANT_CARD_TYPE, "info": { "name": "Third Wave Coffee" } } } }),
        ];
        assert_eq!(restaurant_name(&cards).as_deref(), Some("Third Wave Coffee"));
    }

    #[test]
    fn test_no_name_anywhere() {
        assert_eq!(restaurant_name(&[]), None);
        assert!(top_level_cards(&json!({ "data": {} })).is_empty());
        assert!(top_level_cards(&json!("garbage")).is_empty());
    }
}
