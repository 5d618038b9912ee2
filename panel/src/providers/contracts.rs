//! # Contract Set
//!
//! The contract handles a mounted panel talks to, addressable by logical name.
//! The set is immutable; a remount replaces it wholesale through the
//! [`ContractProvider`](crate::providers::value::ContractProvider).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::error::PanelError;
use crate::core::service::{GameContract, MarketContract};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractName {
    Game,
    Market,
}

impl ContractName {
    pub fn all() -> &'static [ContractName] {
        &[ContractName::Game, ContractName::Market]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContractName::Game => "game",
            ContractName::Market => "market",
        }
    }
}

impl FromStr for ContractName {
    type Err = PanelError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "game" => Ok(ContractName::Game),
            "market" => Ok(ContractName::Market),
            _ => Err(PanelError::Unavailable("contract")),
        }
    }
}

/// A contract handle returned by name lookup.
#[derive(Clone)]
pub enum ContractHandle {
    Game(Arc<dyn GameContract>),
    Market(Arc<dyn MarketContract>),
}

impl fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractHandle::Game(_) => f.write_str("ContractHandle::Game"),
            ContractHandle::Market(_) => f.write_str("ContractHandle::Market"),
        }
    }
}

#[derive(Clone)]
pub struct ContractSet {
    game: Arc<dyn GameContract>,
    market: Arc<dyn MarketContract>,
}

impl ContractSet {
    pub fn new(game: Arc<dyn GameContract>, market: Arc<dyn MarketContract>) -> Self {
        Self { game, market }
    }

    pub fn game(&self) -> &Arc<dyn GameContract> {
        &self.game
    }

    pub fn market(&self) -> &Arc<dyn MarketContract> {
        &self.market
    }

    pub fn get(&self, name: ContractName) -> ContractHandle {
        match name {
            ContractName::Game => ContractHandle::Game(Arc::clone(&self.game)),
            ContractName::Market => ContractHandle::Market(Arc::clone(&self.market)),
        }
    }

    /// Lookup by logical name (`"game"`, `"market"`).
    pub fn by_name(&self, name: &str) -> Result<ContractHandle, PanelError> {
        name.parse().map(|name| self.get(name))
    }
}

impl fmt::Debug for ContractSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractSet")
            .field("contracts", &ContractName::all())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sim::SimulatedChain;

    fn contract_set() -> ContractSet {
        let chain = Arc::new(SimulatedChain::manual());
        ContractSet::new(chain.clone(), chain)
    }

    #[test]
    fn test_lookup_by_name() {
        let contracts = contract_set();
        assert!(matches!(contracts.by_name("game"), Ok(ContractHandle::Game(_))));
        assert!(matches!(contracts.by_name("market"), Ok(ContractHandle::Market(_))));
    }

    #[test]
    fn test_unknown_name_is_unavailable() {
        let contracts = contract_set();
        assert_eq!(
            contracts.by_name("staking").err().map(|e| e.to_string()),
            Some("contract is not available in this panel".to_string())
        );
    }
}
