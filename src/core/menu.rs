//! Canonical menu model produced by normalization

use crate::core::tristate::TriState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Restaurant name used when the payload does not reveal one
pub const UNKNOWN_RESTAURANT: &str = "Unknown Restaurant";

/// Category name to category, in upstream card order
pub type Menu = IndexMap<String, MenuCategory>;

/// A purchasable dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "TriState::is_unknown")]
    pub is_veg: TriState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Price in paise, always > 0
    pub base_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Vec<AddonGroup>>,
}

/// One option of a variant group or an add-on group
///
/// Variants and add-ons share the same shape; [`Variant`] and [`Addon`] are
/// aliases kept for readability at call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,
    pub name: String,
    /// Price in paise, may be 0
    pub price: i64,
    #[serde(default, skip_serializing_if = "TriState::is_unknown")]
    pub in_stock: TriState,
    #[serde(default, skip_serializing_if = "TriState::is_unknown")]
    pub is_enabled: TriState,
    #[serde(default, skip_serializing_if = "TriState::is_unknown")]
    pub is_veg: TriState,
}

pub type Variant = Choice;
pub type Addon = Choice;

impl Choice {
    /// Unknown stock or enabled state counts as available
    pub fn is_available(&self) -> bool {
        self.in_stock.unwrap_or(true) && self.is_enabled.unwrap_or(true)
    }
}

/// Mutually exclusive configurations of a dish (e.g. size)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantGroup {
    pub group_id: String,
    pub group_name: String,
    pub variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_variant_id: Option<String>,
}

/// Optional extras for a dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonGroup {
    pub group_id: String,
    pub group_name: String,
    pub choices: Vec<Addon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_addons: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_addons: Option<u32>,
}

impl AddonGroup {
    /// `max_addons == 1` means radio semantics
    pub fn is_multi_select(&self) -> bool {
        self.max_addons != Some(1)
    }

    pub fn is_mandatory(&self) -> bool {
        self.min_addons.is_some_and(|min| min > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub items: Vec<MenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<IndexMap<String, Vec<MenuItem>>>,
}

impl MenuCategory {
    pub fn new(name: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            image_url,
            items: Vec::new(),
            subcategories: None,
        }
    }

    /// No direct items and no non-empty subcategory
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self
                .subcategories
                .as_ref()
                .is_none_or(|subs| subs.values().all(Vec::is_empty))
    }

    /// Every item of the category, direct items first
    pub fn all_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().chain(
            self.subcategories
                .iter()
                .flat_map(|subs| subs.values().flatten()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub restaurant_name: String,
    pub menu: Menu,
}

impl MenuResponse {
    /// Degraded output for payloads that yield nothing
    pub fn empty() -> Self {
        Self {
            restaurant_name: UNKNOWN_RESTAURANT.to_string(),
            menu: Menu::new(),
        }
    }

    /// Look up a dish by id anywhere in the menu
    pub fn find_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu
            .values()
            .flat_map(MenuCategory::all_items)
            .find(|item| item.id == id)
    }
}
