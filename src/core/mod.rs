//! Core module containing the domain model and the store trait

pub mod currency;
pub mod error;
pub mod menu;
pub mod order;
pub mod restaurant;
pub mod service;
pub mod session;
pub mod tristate;

pub use currency::format_inr;
pub use error::{KapiError, KapiResult};
pub use menu::{
    Addon, AddonGroup, Choice, Menu, MenuCategory, MenuItem, MenuResponse, Variant, VariantGroup,
};
pub use order::{
    AggregatedOrderEntry, Contributor, LineAddon, NewLineItem, OrderLineItem, VariantBreakdown,
};
pub use restaurant::{Provider, Restaurant};
pub use service::SessionStore;
pub use session::{NewParticipant, NewSession, Participant, Session};
pub use tristate::TriState;
