//! HTTP surface: restaurant catalogue, menus, sessions and the final order

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, MenuQuery, SubmitItemsRequest};
pub use router::build_routes;
