//! Property tests for Spartan.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/concat_order.rs"]
mod concat_order;
