//! My Planets tab: the signer's entities, and the planet selected for listing.

use serde::Serialize;
use shared::{EntityId, Listing, ListingId};

use crate::core::error::{PanelError, Result};
use crate::providers::PanelContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanetRow {
    pub id: EntityId,
    pub name: String,
    pub level: u8,
    /// Open listing for this planet, if any
    pub listed_as: Option<ListingId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MyPlanetsView {
    pub rows: Vec<PlanetRow>,
    selected: Option<EntityId>,
}

impl MyPlanetsView {
    pub fn build(context: &PanelContext) -> Result<Self> {
        let me = context.signer.get()?.address();
        let contracts = context.contracts.get()?;
        let entities = contracts
            .game()
            .owned_entities(&me)
            .map_err(|e| PanelError::State(format!("planet lookup failed: {}", e)))?;

        let active: Vec<Listing> = context.listings.active_listings();
        let rows = entities
            .into_iter()
            .map(|entity| PlanetRow {
                listed_as: active
                    .iter()
                    .find(|listing| listing.entity == entity.id)
                    .map(|listing| listing.id),
                id: entity.id,
                name: entity.name,
                level: entity.level,
            })
            .collect();

        Ok(Self {
            rows,
            selected: None,
        })
    }

    /// Rebuild, keeping the selection if the planet is still owned.
    pub fn refresh(&mut self, context: &PanelContext) -> Result<()> {
        let selected = self.selected.take();
        *self = Self::build(context)?;
        if let Some(id) = selected {
            let _ = self.select_planet(&id);
        }
        Ok(())
    }

    pub fn select_planet(&mut self, id: &EntityId) -> Result<&PlanetRow> {
        let idx = self
            .rows
            .iter()
            .position(|row| &row.id == id)
            .ok_or_else(|| PanelError::invalid(format!("{} is not one of your planets", id)))?;
        self.selected = Some(id.clone());
        Ok(&self.rows[idx])
    }

    pub fn selected(&self) -> Option<&PlanetRow> {
        let id = self.selected.as_ref()?;
        self.rows.iter().find(|row| &row.id == id)
    }
}
