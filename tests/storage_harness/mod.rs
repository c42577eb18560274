//! Shared test harness for session store backends
//!
//! Provides builders for sessions and submitted lines plus the
//! `session_store_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

use chrono::{Duration, Utc};
use kapi::core::order::{LineAddon, NewLineItem};
use kapi::core::session::{NewSession, Session};

#[macro_use]
pub mod session_store_tests;

/// A session opened now by "Meera", closing after `cutoff_in`
pub fn create_test_session(cutoff_in: Duration) -> Session {
    let now = Utc::now();
    Session::from_request(
        NewSession {
            creator_name: "Meera".to_string(),
            restaurant_id: "966182".to_string(),
            restaurant_name: "Blue Tokai Coffee Roasters".to_string(),
            cutoff_time: now + cutoff_in,
        },
        now,
    )
}

/// A plain line for `order_id` priced at 250 rupees each
pub fn create_test_line(order_id: &str, quantity: u32) -> NewLineItem {
    NewLineItem {
        order_id: order_id.to_string(),
        dish_name: format!("Dish {}", order_id),
        base_price: 25000,
        quantity,
        addons: Vec::new(),
        note: None,
        image_url: None,
        total: 25000 * i64::from(quantity),
    }
}

/// A line carrying one add-on
pub fn create_test_line_with_addon(order_id: &str, quantity: u32, addon: &str, price: i64) -> NewLineItem {
    let mut line = create_test_line(order_id, quantity);
    line.addons.push(LineAddon {
        name: addon.to_string(),
        price,
        group_id: "extras".to_string(),
    });
    line.total = (line.base_price + price) * i64::from(quantity);
    line
}
