//! Dish extraction from one raw `info` object

use crate::config::IMAGE_ID_PLACEHOLDER;
use crate::core::menu::{AddonGroup, Choice, MenuItem, VariantGroup};
use crate::core::tristate::{TriState, truthy};
use crate::menu::card::non_empty_str;
use serde_json::Value;

/// CDN URL template for dish and category images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlTemplate {
    template: String,
}

impl ImageUrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute the image id, `None` when the payload has no usable id
    pub fn render(&self, image_id: Option<&Value>) -> Option<String> {
        let id = non_empty_str(image_id)?;
        Some(self.template.replace(IMAGE_ID_PLACEHOLDER, &id))
    }
}

impl Default for ImageUrlTemplate {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_IMAGE_URL_TEMPLATE)
    }
}

/// Where a base price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Price,
    DefaultPrice,
    PricingModel,
    /// Legacy variant groups quote rupees, not paise
    LegacyVariation,
}

impl PriceSource {
    const PRIORITY: [PriceSource; 4] = [
        PriceSource::Price,
        PriceSource::DefaultPrice,
        PriceSource::PricingModel,
        PriceSource::LegacyVariation,
    ];

    fn raw<'a>(&self, info: &'a Value) -> Option<&'a Value> {
        match self {
            PriceSource::Price => info.get("price"),
            PriceSource::DefaultPrice => info.get("defaultPrice"),
            PriceSource::PricingModel => info.pointer("/variantsV2/pricingModels/0/price"),
            PriceSource::LegacyVariation => {
                info.pointer("/variants/variantGroups/0/variations/0/price")
            }
        }
    }

    fn scale(&self) -> f64 {
        match self {
            PriceSource::LegacyVariation => 100.0,
            _ => 1.0,
        }
    }

    /// The price in paise from this source, if it is usable
    pub fn read(&self, info: &Value) -> Option<i64> {
        let price = paise(self.raw(info), self.scale());
        (price > 0).then_some(price)
    }
}

/// First usable base price in priority order, 0 when none is usable
pub fn base_price(info: &Value) -> i64 {
    PriceSource::PRIORITY
        .iter()
        .find_map(|source| source.read(info))
        .unwrap_or(0)
}

/// Turn one raw dish `info` object into a canonical item
///
/// Returns `None` when the dish has no name, no id or no usable price.
pub fn extract_dish(info: &Value, images: &ImageUrlTemplate) -> Option<MenuItem> {
    let Some(name) = non_empty_str(info.get("name")) else {
        tracing::debug!("skipping dish without name");
        return None;
    };
    let Some(id) = id_string(info.get("id")) else {
        tracing::debug!(dish = %name, "skipping dish without id");
        return None;
    };
    let base_price = base_price(info);
    if base_price == 0 {
        tracing::debug!(dish = %name, "skipping dish without price");
        return None;
    }

    Some(MenuItem {
        id,
        name,
        description: non_empty_str(info.get("description")),
        is_veg: TriState::from_json(info.get("isVeg")),
        image_url: images.render(info.get("imageId")),
        base_price,
        variants: variant_groups(info),
        addons: addon_groups(info),
    })
}

fn variant_groups(info: &Value) -> Option<Vec<VariantGroup>> {
    let groups = info.pointer("/variantsV2/variantGroups")?.as_array()?;
    let groups: Vec<VariantGroup> = groups
        .iter()
        .map(|group| VariantGroup {
            group_id: id_string(group.get("groupId")).unwrap_or_default(),
            group_name: non_empty_str(group.get("name")).unwrap_or_default(),
            variants: choices(group.get("variations"), 100.0),
            default_variant_id: id_string(group.get("defaultVariationId")),
        })
        .filter(|group| !group.variants.is_empty())
        .collect();
    (!groups.is_empty()).then_some(groups)
}

fn addon_groups(info: &Value) -> Option<Vec<AddonGroup>> {
    let groups = info.get("addons")?.as_array()?;
    let groups: Vec<AddonGroup> = groups
        .iter()
        .map(|group| AddonGroup {
            group_id: id_string(group.get("groupId")).unwrap_or_default(),
            group_name: non_empty_str(group.get("name")).unwrap_or_default(),
            choices: choices(group.get("choices"), 1.0),
            max_addons: count(group.get("maxAddons")),
            min_addons: count(group.get("minAddons")),
        })
        .collect();
    (!groups.is_empty()).then_some(groups)
}

fn choices(list: Option<&Value>, scale: f64) -> Vec<Choice> {
    list.and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|choice| Choice {
                    id: id_string(choice.get("id")).unwrap_or_default(),
                    name: non_empty_str(choice.get("name")).unwrap_or_default(),
                    price: paise(choice.get("price"), scale).max(0),
                    in_stock: TriState::from_json(choice.get("inStock")),
                    is_enabled: TriState::from_json(choice.get("isEnabled")),
                    is_veg: TriState::from_json(choice.get("isVeg")),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Numeric value (number or numeric string), scaled and floored
///
/// Falsy, non-numeric and non-finite values give 0.
fn paise(value: Option<&Value>, scale: f64) -> i64 {
    let Some(value) = value.filter(|v| truthy(v)) else {
        return 0;
    };
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .map(|n| (n * scale).floor())
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
        .unwrap_or(0)
}

/// Upstream ids arrive as strings or numbers
fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn count(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u32)
}
