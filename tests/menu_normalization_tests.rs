//! Integration tests for turning upstream payloads into the canonical menu
//!
//! These tests verify that:
//! - Restaurant names come from the metadata card with sensible fallbacks
//! - Prices resolve in priority order and stay in paise
//! - Flat, nested and carousel cards land in the right categories
//! - Items are sorted and empty containers are pruned
//! - Malformed payloads degrade to an empty menu instead of failing

use kapi::menu::card::RESTAURANT_CARD_TYPE;
use kapi::prelude::*;
use serde_json::{Value, json};

const ITEM_CATEGORY: &str = "type.googleapis.com/swiggy.presentation.food.v2.ItemCategory";
const NESTED_CATEGORY: &str = "type.googleapis.com/swiggy.presentation.food.v2.NestedItemCategory";
const CAROUSEL: &str = "type.googleapis.com/swiggy.presentation.food.v2.MenuCarousel";

// =============================================================================
// Payload builders
// =============================================================================

fn restaurant_card(name: &str) -> Value {
    json!({ "card": { "card": { "@type": RESTAURANT_CARD_TYPE, "info": { "name": name } } } })
}

fn regular(cards: Vec<Value>) -> Value {
    json!({ "groupedCard": { "cardGroupMap": { "REGULAR": { "cards": cards } } } })
}

fn payload(cards: Vec<Value>) -> Value {
    json!({ "data": { "cards": cards } })
}

fn dish(id: &str, name: &str, price: i64) -> Value {
    json!({ "card": { "info": { "id": id, "name": name, "price": price } } })
}

fn flat(title: &str, dishes: Vec<Value>) -> Value {
    json!({ "card": { "card": { "@type": ITEM_CATEGORY, "title": title, "itemCards": dishes } } })
}

fn normalize(raw: &Value) -> MenuResponse {
    MenuNormalizer::default().normalize(raw, "588181", 12.9716, 77.5946)
}

fn names(items: &[MenuItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

// =============================================================================
// Restaurant name
// =============================================================================

mod restaurant_name_tests {
    use super::*;

    #[test]
    fn test_name_from_metadata_card() {
        let raw = payload(vec![restaurant_card("Third Wave Coffee"), regular(vec![])]);
        assert_eq!(normalize(&raw).restaurant_name, "Third Wave Coffee");
    }

    #[test]
    fn test_missing_metadata_falls_back_to_unknown() {
        let raw = payload(vec![regular(vec![flat("Coffee", vec![dish("1", "Latte", 25000)])])]);
        assert_eq!(normalize(&raw).restaurant_name, "Unknown Restaurant");
    }
}

// =============================================================================
// Prices
// =============================================================================

mod price_tests {
    use super::*;

    fn info_price(info: Value) -> Option<i64> {
        let raw = payload(vec![regular(vec![flat(
            "Coffee",
            vec![json!({ "card": { "info": info } })],
        )])]);
        normalize(&raw)
            .menu
            .get("Coffee")
            .and_then(|c| c.items.first())
            .map(|i| i.base_price)
    }

    #[test]
    fn test_price_kept_in_paise() {
        let price = info_price(json!({ "id": "1", "name": "Classic Cold Coffee", "price": 260 }));
        assert_eq!(price, Some(260));
    }

    #[test]
    fn test_default_price_used_when_price_missing() {
        let price = info_price(json!({ "id": "1", "name": "Mocha", "defaultPrice": 28000 }));
        assert_eq!(price, Some(28000));
    }

    #[test]
    fn test_pricing_model_used_after_default_price() {
        let price = info_price(json!({
            "id": "1",
            "name": "Mocha",
            "variantsV2": { "pricingModels": [ { "price": 31000 } ] }
        }));
        assert_eq!(price, Some(31000));
    }

    #[test]
    fn test_legacy_variation_price_scaled_to_paise() {
        let price = info_price(json!({
            "id": "1",
            "name": "Mocha",
            "variants": { "variantGroups": [ { "variations": [ { "price": 190.5 } ] } ] }
        }));
        assert_eq!(price, Some(19050));
    }

    #[test]
    fn test_zero_price_falls_through_to_next_source() {
        let price = info_price(json!({ "id": "1", "name": "Mocha", "price": 0, "defaultPrice": 15000 }));
        assert_eq!(price, Some(15000));
    }

    #[test]
    fn test_fractional_price_floored() {
        let price = info_price(json!({ "id": "1", "name": "Mocha", "price": 1905.9 }));
        assert_eq!(price, Some(1905));
    }

    #[test]
    fn test_dish_without_any_price_dropped() {
        assert_eq!(info_price(json!({ "id": "1", "name": "Water" })), None);
    }
}

// =============================================================================
// Categories
// =============================================================================

mod category_tests {
    use super::*;

    #[test]
    fn test_flat_category_items_sorted() {
        let raw = payload(vec![
            restaurant_card("Blue Tokai"),
            regular(vec![flat(
                "Hot Coffee",
                vec![
                    dish("1", "Flat White", 24000),
                    dish("2", "americano", 18000),
                    dish("3", "Cappuccino", 22000),
                ],
            )]),
        ]);
        let menu = normalize(&raw);

        let category = &menu.menu["Hot Coffee"];
        assert_eq!(names(&category.items), vec!["americano", "Cappuccino", "Flat White"]);
        assert!(category.subcategories.is_none());
    }

    #[test]
    fn test_accented_names_sort_by_base_letter() {
        let raw = payload(vec![regular(vec![
            flat(
                "Desserts",
                vec![
                    dish("1", "Zebra Cake", 12000),
                    dish("2", "Éclair", 14000),
                    dish("3", "Fudge", 9000),
                ],
            ),
            flat(
                "Cafe",
                vec![
                    dish("4", "Cafe Mocha", 21000),
                    dish("5", "Café Latte", 19000),
                ],
            ),
        ])]);
        let menu = normalize(&raw);

        assert_eq!(
            names(&menu.menu["Desserts"].items),
            vec!["Éclair", "Fudge", "Zebra Cake"]
        );
        assert_eq!(names(&menu.menu["Cafe"].items), vec!["Café Latte", "Cafe Mocha"]);
    }

    #[test]
    fn test_categories_keep_payload_order() {
        let raw = payload(vec![regular(vec![
            flat("Desserts", vec![dish("1", "Brownie", 15000)]),
            flat("Beverages", vec![dish("2", "Latte", 25000)]),
        ])]);
        let menu = normalize(&raw);

        let order: Vec<&str> = menu.menu.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["Desserts", "Beverages"]);
    }

    #[test]
    fn test_nested_category_builds_subcategories() {
        let nested = json!({ "card": { "card": {
            "@type": NESTED_CATEGORY,
            "title": "Coffee",
            "categories": [
                { "title": "Hot", "itemCards": [ dish("1", "Latte", 25000), dish("2", "Espresso", 15000) ] },
                { "title": "Cold", "itemCards": [ dish("3", "Cold Brew", 27000) ] },
                { "title": "Seasonal", "itemCards": [] }
            ]
        } } });
        let menu = normalize(&payload(vec![regular(vec![nested])]));

        let coffee = &menu.menu["Coffee"];
        let subcategories = coffee.subcategories.as_ref().expect("subcategories");
        let titles: Vec<&str> = subcategories.keys().map(String::as_str).collect();
        assert_eq!(titles, vec!["Hot", "Cold"]);
        assert_eq!(names(&subcategories["Hot"]), vec!["Espresso", "Latte"]);
        assert_eq!(coffee.all_items().count(), 3);
    }

    #[test]
    fn test_carousel_becomes_category() {
        let carousel = json!({ "card": { "card": {
            "@type": CAROUSEL,
            "carousel": [
                { "dish": { "info": { "id": "9", "name": "Iced Mocha", "price": 29000 } } },
                { "dish": { "info": { "id": "10", "name": "Affogato", "price": 26000 } } }
            ]
        } } });
        let menu = normalize(&payload(vec![regular(vec![carousel])]));

        assert_eq!(names(&menu.menu["Recommended"].items), vec!["Affogato", "Iced Mocha"]);
    }

    #[test]
    fn test_empty_categories_removed() {
        let raw = payload(vec![regular(vec![
            flat("Empty", vec![]),
            flat("Broken", vec![json!({ "card": { "info": { "name": "No id", "price": 100 } } })]),
            flat("Tea", vec![dish("1", "Masala Chai", 9000)]),
        ])]);
        let menu = normalize(&raw);

        assert_eq!(menu.menu.len(), 1);
        assert!(menu.menu.contains_key("Tea"));
    }

    #[test]
    fn test_unknown_cards_ignored() {
        let raw = payload(vec![regular(vec![
            json!({ "card": { "card": { "@type": "type.googleapis.com/swiggy.presentation.food.v2.Dividers" } } }),
            flat("Tea", vec![dish("1", "Masala Chai", 9000)]),
        ])]);
        assert_eq!(normalize(&raw).menu.len(), 1);
    }
}

// =============================================================================
// Dish details
// =============================================================================

mod dish_tests {
    use super::*;

    #[test]
    fn test_dish_fields_mapped() {
        let info = json!({
            "id": 101,
            "name": "Cold Coffee",
            "description": "Slow steeped",
            "isVeg": 1,
            "imageId": "abc123",
            "price": 26000,
            "variantsV2": { "variantGroups": [ {
                "groupId": "size",
                "name": "Size",
                "defaultVariationId": "m",
                "variations": [
                    { "id": "s", "name": "Small", "price": 0, "inStock": 1 },
                    { "id": "m", "name": "Medium", "price": 40, "inStock": 1 }
                ]
            } ] },
            "addons": [ {
                "groupId": "milk",
                "name": "Milk",
                "maxAddons": 1,
                "choices": [ { "id": "oat", "name": "Oat Milk", "price": 1905, "inStock": 1 } ]
            } ]
        });
        let raw = payload(vec![regular(vec![flat(
            "Coffee",
            vec![json!({ "card": { "info": info } })],
        )])]);
        let menu = normalize(&raw);
        let item = menu.find_item("101").expect("item by id");

        assert_eq!(item.description.as_deref(), Some("Slow steeped"));
        assert_eq!(item.is_veg, TriState::True);
        assert!(item.image_url.as_deref().is_some_and(|u| u.ends_with("/abc123")));

        let sizes = &item.variants.as_ref().expect("variants")[0];
        assert_eq!(sizes.default_variant_id.as_deref(), Some("m"));
        assert_eq!(sizes.variants[1].price, 4000);

        let milk = &item.addons.as_ref().expect("addons")[0];
        assert_eq!(milk.choices[0].price, 1905);
        assert!(!milk.is_multi_select());
    }

    #[test]
    fn test_missing_veg_flag_is_unknown() {
        let raw = payload(vec![regular(vec![flat("Tea", vec![dish("1", "Chai", 9000)])])]);
        let menu = normalize(&raw);
        let item = &menu.menu["Tea"].items[0];

        assert!(item.is_veg.is_unknown());
        assert!(item.image_url.is_none());
        assert!(item.variants.is_none());
        assert!(item.addons.is_none());
    }

    #[test]
    fn test_menu_serializes_camel_case() {
        let raw = payload(vec![restaurant_card("Blue Tokai"), regular(vec![flat("Tea", vec![dish("1", "Chai", 9000)])])]);
        let body = serde_json::to_value(normalize(&raw)).unwrap();

        assert_eq!(body["restaurantName"], "Blue Tokai");
        assert_eq!(body["menu"]["Tea"]["items"][0]["basePrice"], 9000);
        assert!(body["menu"]["Tea"]["items"][0].get("isVeg").is_none());
    }
}

// =============================================================================
// Robustness
// =============================================================================

mod robustness_tests {
    use super::*;

    #[test]
    fn test_garbage_payloads_give_empty_menu() {
        for raw in [json!(null), json!([]), json!({ "data": 5 }), json!({ "data": { "cards": "x" } })] {
            let menu = normalize(&raw);
            assert_eq!(menu.restaurant_name, "Unknown Restaurant");
            assert!(menu.menu.is_empty());
        }
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let raw = payload(vec![
            restaurant_card("Blue Tokai"),
            regular(vec![
                flat("Hot", vec![dish("1", "Latte", 25000), dish("2", "Mocha", 28000)]),
                flat("Cold", vec![dish("3", "Cold Brew", 27000)]),
            ]),
        ]);
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn test_custom_image_template() {
        let normalizer = MenuNormalizer::new(kapi::menu::ImageUrlTemplate::new(
            "https://cdn.test/img/{image_id}.webp",
        ));
        let raw = payload(vec![regular(vec![json!({ "card": { "card": {
            "@type": ITEM_CATEGORY,
            "title": "Tea",
            "itemCards": [ { "card": { "info": { "id": "1", "name": "Chai", "price": 9000, "imageId": "xyz" } } } ]
        } } })])]);
        let menu = normalizer.normalize(&raw, "1", 0.0, 0.0);

        assert_eq!(
            menu.menu["Tea"].items[0].image_url.as_deref(),
            Some("https://cdn.test/img/xyz.webp")
        );
    }
}
