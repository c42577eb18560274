//! Submitted cart lines and the aggregated final order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// An add-on as recorded on a submitted line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAddon {
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub group_id: String,
}

/// A cart line as submitted by a participant, before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    /// Client-chosen key grouping lines that are "the same dish"
    pub order_id: String,
    pub dish_name: String,
    pub base_price: i64,
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addons: Vec<LineAddon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub total: i64,
}

/// A stored cart line, tagged with the participant who submitted it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub order_id: String,
    pub participant_id: String,
    pub participant_name: String,
    pub dish_name: String,
    pub base_price: i64,
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addons: Vec<LineAddon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderLineItem {
    /// Attach a participant to a submitted line
    pub fn from_submission(line: NewLineItem, participant_id: Uuid, participant_name: &str) -> Self {
        Self {
            order_id: line.order_id,
            participant_id: participant_id.to_string(),
            participant_name: participant_name.to_string(),
            dish_name: line.dish_name,
            base_price: line.base_price,
            quantity: line.quantity,
            addons: line.addons,
            note: line.note,
            image_url: line.image_url,
            total: line.total,
            created_at: Some(Utc::now()),
        }
    }
}

/// One participant's share of a variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub participant_id: String,
    pub participant_name: String,
    pub quantity: u32,
}

/// Per-variant breakdown of an aggregated dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantBreakdown {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    pub contributors: Vec<Contributor>,
}

/// A dish of the final order with its per-variant, per-participant split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedOrderEntry {
    pub id: String,
    pub dish_name: String,
    pub price_each: i64,
    pub total_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub has_variant_breakdown: bool,
    pub variants: Vec<VariantBreakdown>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
