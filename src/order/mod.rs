//! Participant carts and the aggregated final order

pub mod aggregate;
pub mod cart;

pub use aggregate::{FinalOrder, aggregate, order_total};
pub use cart::{Cart, CartItem, SelectedAddons, SelectedVariant};
