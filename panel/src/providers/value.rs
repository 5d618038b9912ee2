//! # Passthrough Providers
//!
//! A [`ValueProvider`] makes one immutable value reachable by everything that was
//! handed the provider. It does no transformation. Remounting with a new value swaps it
//! for every holder at once; a lookup on an empty provider yields
//! [`PanelError::Unavailable`] instead of panicking.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::core::error::{PanelError, Result};
use crate::core::service::{ChainConnection, Signer};
use crate::providers::contracts::ContractSet;

pub struct ValueProvider<T: ?Sized> {
    name: &'static str,
    value: RwLock<Option<Arc<T>>>,
}

/// Chain connection handle.
pub type ConnectionProvider = ValueProvider<dyn ChainConnection>;
/// Game and market contract handles.
pub type ContractProvider = ValueProvider<ContractSet>;
/// Active signing identity.
pub type SignerProvider = ValueProvider<dyn Signer>;

impl<T: ?Sized> ValueProvider<T> {
    pub fn new(name: &'static str, value: Arc<T>) -> Self {
        Self {
            name,
            value: RwLock::new(Some(value)),
        }
    }

    pub fn empty(name: &'static str) -> Self {
        Self {
            name,
            value: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self) -> Result<Arc<T>> {
        self.try_get().ok_or(PanelError::Unavailable(self.name))
    }

    pub fn try_get(&self) -> Option<Arc<T>> {
        self.value.read().clone()
    }

    pub fn is_provided(&self) -> bool {
        self.value.read().is_some()
    }

    /// Replace the value. Holders of an `Arc` from an earlier `get` keep the old one.
    pub fn provide(&self, value: Arc<T>) {
        *self.value.write() = Some(value);
        tracing::debug!(provider = self.name, "Provider value replaced");
    }

    pub fn clear(&self) {
        *self.value.write() = None;
        tracing::debug!(provider = self.name, "Provider value cleared");
    }
}

impl<T: ?Sized> fmt::Debug for ValueProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueProvider")
            .field("name", &self.name)
            .field("provided", &self.is_provided())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signer::LocalSigner;
    use shared::Address;

    #[test]
    fn test_empty_provider_reports_unavailable() {
        let provider: SignerProvider = ValueProvider::empty("signer");
        assert!(!provider.is_provided());
        assert_eq!(provider.get().err(), Some(PanelError::Unavailable("signer")));
        assert!(provider.try_get().is_none());
    }

    #[test]
    fn test_provide_replaces_for_all_holders() {
        let alice: Arc<dyn Signer> = Arc::new(LocalSigner::new(Address::new("0xalice")));
        let provider: Arc<SignerProvider> = Arc::new(ValueProvider::new("signer", alice));
        let view_handle = Arc::clone(&provider);

        provider.provide(Arc::new(LocalSigner::new(Address::new("0xbob"))));

        assert_eq!(view_handle.get().unwrap().address(), Address::new("0xbob"));
    }

    #[test]
    fn test_clear() {
        let provider = ValueProvider::new("count", Arc::new(5u32));
        assert_eq!(*provider.get().unwrap(), 5);
        provider.clear();
        assert!(provider.get().is_err());
    }
}
