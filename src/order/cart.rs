//! A participant's cart before submission
//!
//! Customization follows the menu's own rules: unavailable choices are never
//! selected, variant groups start on their default (or cheapest) variant and
//! mandatory add-on groups start on their cheapest choice.

use crate::core::menu::{Addon, AddonGroup, MenuItem, Variant, VariantGroup};
use crate::core::order::{LineAddon, NewLineItem};
use serde::{Deserialize, Serialize};

impl VariantGroup {
    /// Default variant when available, otherwise the cheapest available one
    pub fn initial_selection(&self) -> Option<&Variant> {
        let available = || self.variants.iter().filter(|v| v.is_available());
        self.default_variant_id
            .as_ref()
            .and_then(|default_id| available().find(|v| &v.id == default_id))
            .or_else(|| available().min_by_key(|v| v.price))
    }
}

impl AddonGroup {
    /// Cheapest available choice for mandatory groups, nothing otherwise
    pub fn initial_selection(&self) -> Vec<&Addon> {
        if !self.is_mandatory() {
            return Vec::new();
        }
        self.choices
            .iter()
            .filter(|c| c.is_available())
            .min_by_key(|c| c.price)
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVariant {
    pub group_id: String,
    pub group_name: String,
    pub variant: Variant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAddons {
    pub group_id: String,
    pub group_name: String,
    pub addons: Vec<Addon>,
}

/// One customized dish in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item: MenuItem,
    pub quantity: u32,
    pub selected_variants: Vec<SelectedVariant>,
    pub selected_addons: Vec<SelectedAddons>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CartItem {
    /// Quantity 1 with the initial selections applied
    pub fn new(menu_item: MenuItem) -> Self {
        let selected_variants = menu_item
            .variants
            .iter()
            .flatten()
            .filter_map(|group| {
                group.initial_selection().map(|variant| SelectedVariant {
                    group_id: group.group_id.clone(),
                    group_name: group.group_name.clone(),
                    variant: variant.clone(),
                })
            })
            .collect();
        let selected_addons = menu_item
            .addons
            .iter()
            .flatten()
            .filter_map(|group| {
                let initial = group.initial_selection();
                (!initial.is_empty()).then(|| SelectedAddons {
                    group_id: group.group_id.clone(),
                    group_name: group.group_name.clone(),
                    addons: initial.into_iter().cloned().collect(),
                })
            })
            .collect();

        Self {
            menu_item,
            quantity: 1,
            selected_variants,
            selected_addons,
            note: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Pick a variant; unknown or unavailable variants are refused
    pub fn select_variant(&mut self, group_id: &str, variant_id: &str) -> bool {
        let Some(group) = self
            .menu_item
            .variants
            .iter()
            .flatten()
            .find(|g| g.group_id == group_id)
        else {
            return false;
        };
        let Some(variant) = group
            .variants
            .iter()
            .find(|v| v.id == variant_id && v.is_available())
        else {
            return false;
        };

        let selection = SelectedVariant {
            group_id: group.group_id.clone(),
            group_name: group.group_name.clone(),
            variant: variant.clone(),
        };
        match self
            .selected_variants
            .iter_mut()
            .find(|s| s.group_id == group_id)
        {
            Some(existing) => *existing = selection,
            None => self.selected_variants.push(selection),
        }
        true
    }

    /// Toggle an add-on; single-select groups replace the current choice
    pub fn toggle_addon(&mut self, group_id: &str, addon_id: &str) -> bool {
        let Some(group) = self
            .menu_item
            .addons
            .iter()
            .flatten()
            .find(|g| g.group_id == group_id)
        else {
            return false;
        };
        let Some(addon) = group
            .choices
            .iter()
            .find(|c| c.id == addon_id && c.is_available())
        else {
            return false;
        };

        let index = match self
            .selected_addons
            .iter()
            .position(|s| s.group_id == group_id)
        {
            Some(index) => index,
            None => {
                self.selected_addons.push(SelectedAddons {
                    group_id: group.group_id.clone(),
                    group_name: group.group_name.clone(),
                    addons: Vec::new(),
                });
                self.selected_addons.len() - 1
            }
        };
        let selected = &mut self.selected_addons[index].addons;

        if !group.is_multi_select() {
            *selected = vec![addon.clone()];
        } else if let Some(pos) = selected.iter().position(|a| a.id == addon.id) {
            selected.remove(pos);
        } else {
            selected.push(addon.clone());
        }
        true
    }

    /// (variant prices if any variant is selected, else base price, plus
    /// add-on prices) times quantity
    pub fn total(&self) -> i64 {
        let base = if self.selected_variants.is_empty() {
            self.menu_item.base_price
        } else {
            self.selected_variants.iter().map(|s| s.variant.price).sum()
        };
        let addons: i64 = self
            .selected_addons
            .iter()
            .flat_map(|s| &s.addons)
            .map(|a| a.price)
            .sum();
        (base + addons) * i64::from(self.quantity)
    }

    /// The line submitted to the session
    ///
    /// The menu item id is the grouping key, and selected variants are
    /// recorded ahead of add-ons so the final order can break them down.
    pub fn to_line(&self) -> NewLineItem {
        let variants = self.selected_variants.iter().map(|s| LineAddon {
            name: s.variant.name.clone(),
            price: s.variant.price,
            group_id: s.group_id.clone(),
        });
        let addons = self.selected_addons.iter().flat_map(|s| {
            s.addons.iter().map(|a| LineAddon {
                name: a.name.clone(),
                price: a.price,
                group_id: s.group_id.clone(),
            })
        });

        NewLineItem {
            order_id: self.menu_item.id.clone(),
            dish_name: self.menu_item.name.clone(),
            base_price: self.menu_item.base_price,
            quantity: self.quantity,
            addons: variants.chain(addons).collect(),
            note: self.note.clone(),
            image_url: self.menu_item.image_url.clone(),
            total: self.total(),
        }
    }
}

/// The items a participant has picked but not yet submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    pub fn remove_at(&mut self, index: usize) -> Option<CartItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(CartItem::total).sum()
    }

    /// Lines ready for `SessionStore::add_items`
    pub fn submission(&self) -> Vec<NewLineItem> {
        self.items.iter().map(CartItem::to_line).collect()
    }
}
