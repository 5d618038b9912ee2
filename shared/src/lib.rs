//! # Shared Market Types
//!
//! Data types exchanged between the market panel and the chain collaborators that
//! feed it (connection, contracts, signer).
//!
//! ## Structure
//!
//! - **[`dto`]**: Serializable records
//!   - **[`dto::market`]**: Listings, prices, addresses
//!   - **[`dto::transaction`]**: Transaction log records and their lifecycle
//!   - **[`dto::entity`]**: Game entities (planets) a player can list
//! - **[`utils`]**: Display helpers
//!   - **[`utils::short_address`]**: Shorten a long address with an ellipsis
//!
//! ## Wire Format
//!
//! Every DTO serializes with plain `serde` defaults:
//! - Field names are **snake_case**
//! - Status enums serialize to lowercase strings
//! - Optional fields are omitted when `None`
//!
//! ```rust
//! use shared::dto::market::{ListingStatus, Price};
//!
//! assert_eq!(serde_json::to_string(&ListingStatus::Open).unwrap(), "\"open\"");
//! assert_eq!(Price::new(10).amount(), 10);
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
