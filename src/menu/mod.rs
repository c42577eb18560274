//! Upstream menu ingestion
//!
//! - [`card`]: classification of upstream cards by type tag
//! - [`dish`]: extraction of a single dish
//! - [`normalizer`]: the full payload to [`MenuResponse`](crate::core::MenuResponse) pass
//! - [`source`]: where raw payloads come from

pub mod card;
pub mod dish;
pub mod normalizer;
pub mod source;

pub use card::MenuCard;
pub use dish::{ImageUrlTemplate, PriceSource, base_price, extract_dish};
pub use normalizer::{MenuNormalizer, collate};
#[cfg(feature = "upstream")]
pub use source::HttpMenuSource;
pub use source::{FixtureMenuSource, MenuSource, fetch_menu};
