//! # Game Entity Data Transfer Objects
//!
//! Entities (planets) a player owns in the game and may offer on the market.

use serde::{Deserialize, Serialize};

use super::market::{Address, EntityId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub owner: Address,
    pub name: String,
    pub level: u8,
}

impl Entity {
    pub fn new(id: EntityId, owner: Address, name: impl Into<String>, level: u8) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            level,
        }
    }
}
