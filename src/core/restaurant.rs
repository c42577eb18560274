//! Restaurant catalogue entries

use serde::{Deserialize, Serialize};

/// Menu data providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Swiggy,
    Zomato,
}

/// A restaurant that sessions can be created against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

impl Restaurant {
    /// The catalogue shipped with the default configuration
    pub fn defaults() -> Vec<Restaurant> {
        vec![
            Restaurant {
                id: 966182,
                name: "Blue Tokai Coffee Roasters".to_string(),
                rating: Some(4.8),
                provider: Some(Provider::Swiggy),
            },
            Restaurant {
                id: 588181,
                name: "Third Wave Coffee".to_string(),
                rating: Some(4.7),
                provider: Some(Provider::Swiggy),
            },
        ]
    }
}
