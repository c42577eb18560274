//! Regrouping of submitted lines into the final order view

use crate::core::order::{AggregatedOrderEntry, Contributor, OrderLineItem, VariantBreakdown};
use crate::core::session::Session;
use indexmap::IndexMap;
use serde::Serialize;

pub const REGULAR_VARIANT_ID: &str = "regular";
pub const REGULAR_VARIANT_NAME: &str = "Regular";

/// Group lines by `order_id` and break each dish down per variant and participant
///
/// Groups keep the order in which their `order_id` first appears. Add-ons are
/// merged by display name, so a line carrying several add-ons counts its full
/// quantity towards each of them.
pub fn aggregate(lines: &[OrderLineItem]) -> Vec<AggregatedOrderEntry> {
    let mut groups: IndexMap<&str, Vec<&OrderLineItem>> = IndexMap::new();
    for line in lines {
        groups.entry(line.order_id.as_str()).or_default().push(line);
    }
    groups.into_values().map(|group| aggregate_group(&group)).collect()
}

/// Sum of the precomputed line totals
pub fn order_total(lines: &[OrderLineItem]) -> i64 {
    lines.iter().map(|line| line.total).sum()
}

fn aggregate_group(group: &[&OrderLineItem]) -> AggregatedOrderEntry {
    let first = group[0];
    let total_quantity = group
        .iter()
        .fold(0u32, |acc, line| acc.saturating_add(line.quantity));
    let has_variant_breakdown = group.iter().any(|line| !line.addons.is_empty());

    let variants = if has_variant_breakdown {
        addon_variants(group)
    } else {
        let mut contributors = Contributors::default();
        group.iter().for_each(|line| contributors.add(line));
        vec![VariantBreakdown {
            id: REGULAR_VARIANT_ID.to_string(),
            name: REGULAR_VARIANT_NAME.to_string(),
            price: 0,
            quantity: total_quantity,
            contributors: contributors.into_vec(),
        }]
    };

    AggregatedOrderEntry {
        id: first.order_id.clone(),
        dish_name: first.dish_name.clone(),
        price_each: first.base_price,
        total_quantity,
        image_url: first.image_url.clone(),
        has_variant_breakdown,
        variants,
    }
}

struct AddonTally<'a> {
    price: i64,
    group_id: &'a str,
    quantity: u32,
    contributors: Contributors<'a>,
}

fn addon_variants(group: &[&OrderLineItem]) -> Vec<VariantBreakdown> {
    let mut by_name: IndexMap<&str, AddonTally> = IndexMap::new();
    for line in group {
        for addon in &line.addons {
            let tally = by_name.entry(addon.name.as_str()).or_insert_with(|| AddonTally {
                price: addon.price,
                group_id: addon.group_id.as_str(),
                quantity: 0,
                contributors: Contributors::default(),
            });
            tally.quantity = tally.quantity.saturating_add(line.quantity);
            tally.contributors.add(line);
        }
    }

    by_name
        .into_iter()
        .enumerate()
        .map(|(index, (name, tally))| VariantBreakdown {
            id: format!("{}{}", tally.group_id, index),
            name: name.to_string(),
            price: tally.price,
            quantity: tally.quantity,
            contributors: tally.contributors.into_vec(),
        })
        .collect()
}

/// Per-participant quantities in first-appearance order
#[derive(Default)]
struct Contributors<'a> {
    by_participant: IndexMap<&'a str, Contributor>,
}

impl<'a> Contributors<'a> {
    fn add(&mut self, line: &'a OrderLineItem) {
        self.by_participant
            .entry(line.participant_id.as_str())
            .and_modify(|c| c.quantity = c.quantity.saturating_add(line.quantity))
            .or_insert_with(|| Contributor {
                participant_id: line.participant_id.clone(),
                participant_name: line.participant_name.clone(),
                quantity: line.quantity,
            });
    }

    fn into_vec(self) -> Vec<Contributor> {
        self.by_participant.into_values().collect()
    }
}

/// The final order view of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalOrder {
    pub session: Session,
    pub entries: Vec<AggregatedOrderEntry>,
    /// Sum of line totals in paise
    pub total: i64,
}

impl FinalOrder {
    pub fn build(session: Session, lines: &[OrderLineItem]) -> Self {
        Self {
            session,
            entries: aggregate(lines),
            total: order_total(lines),
        }
    }
}
