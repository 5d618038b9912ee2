//! # Data Transfer Objects
//!
//! Records shared by the panel state layer and its chain collaborators.
//!
//! ## Module Organization
//!
//! - [`market`] - Addresses, prices, listings
//! - [`transaction`] - Submitted chain actions and their outcomes
//! - [`entity`] - Game entities owned by players
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: lowercase strings via `#[serde(rename_all = "lowercase")]`
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "id": 7,
//!   "seller": "0x3f1c0a55e2b4d9a6c7f0e8b1d2a3c4e5f6a7b8c9",
//!   "entity": "0000a3b1",
//!   "price": 10,
//!   "created_at": "2024-01-01T00:00:00Z",
//!   "status": "open"
//! }
//! ```

pub mod entity;
pub mod market;
pub mod transaction;

pub use entity::*;
pub use market::*;
pub use transaction::*;
