//! # Kapi.run
//!
//! Group food ordering: one person opens a session against a restaurant with a
//! cutoff time, others join and submit cart lines, and the session produces a
//! single aggregated order.
//!
//! ## Features
//!
//! - **Menu Normalization**: Turns the upstream restaurant payload into an
//!   ordered, categorized menu with prices in paise
//! - **Variants and Add-ons**: Choice groups carried through to the cart
//! - **Order Aggregation**: Lines grouped per dish with a per-variant,
//!   per-participant breakdown
//! - **Configuration-Based**: Upstream, image CDN and catalogue via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kapi::prelude::*;
//!
//! let normalizer = MenuNormalizer::default();
//! let menu = normalizer.normalize(&raw, "966182", 12.93, 77.62);
//!
//! let entries = aggregate(&lines);
//! println!("{} dishes, {}", entries.len(), format_inr(order_total(&lines)));
//! ```

pub mod config;
pub mod core;
pub mod menu;
pub mod order;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        AddonGroup, AggregatedOrderEntry, Choice, Contributor, KapiError, KapiResult, LineAddon,
        Menu, MenuCategory, MenuItem, MenuResponse, NewLineItem, NewParticipant, NewSession,
        OrderLineItem, Participant, Provider, Restaurant, Session, SessionStore, TriState,
        VariantBreakdown, VariantGroup, format_inr,
    };

    // === Menu ===
    #[cfg(feature = "upstream")]
    pub use crate::menu::HttpMenuSource;
    pub use crate::menu::{FixtureMenuSource, MenuNormalizer, MenuSource, fetch_menu};

    // === Orders ===
    pub use crate::order::{Cart, CartItem, FinalOrder, aggregate, order_total};

    // === Storage ===
    pub use crate::storage::InMemorySessionStore;

    // === Config ===
    pub use crate::config::KapiConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
