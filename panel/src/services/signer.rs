//! # Local Signer
//!
//! The signing identity handed to the panel by the game client. The panel only needs
//! the account address; signing itself happens inside the contract handles.

use shared::Address;
use std::error::Error;
use std::fmt;

use crate::core::service::Signer;

/// Signer configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// No address configured
    Missing(String),
    /// Address is not a 0x-prefixed hex account
    InvalidAddress(String),
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerError::Missing(msg) => write!(f, "Signer missing: {}", msg),
            SignerError::InvalidAddress(msg) => write!(f, "Invalid signer address: {}", msg),
        }
    }
}

impl Error for SignerError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSigner {
    address: Address,
}

impl LocalSigner {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Parse and validate a hex account address (`0x` followed by 40 hex digits).
    pub fn from_hex(address: &str) -> Result<Self, SignerError> {
        let trimmed = address.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .ok_or_else(|| SignerError::InvalidAddress(format!("{} lacks 0x prefix", trimmed)))?;
        if digits.len() != 40 {
            return Err(SignerError::InvalidAddress(format!(
                "expected 40 hex digits, got {}",
                digits.len()
            )));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SignerError::InvalidAddress(format!(
                "{} contains non-hex characters",
                trimmed
            )));
        }
        Ok(Self::new(Address::new(trimmed.to_ascii_lowercase())))
    }

    /// Load the signer address from `PANEL_SIGNER_ADDRESS`.
    pub fn from_env() -> Result<Self, SignerError> {
        let address = std::env::var("PANEL_SIGNER_ADDRESS")
            .map_err(|_| SignerError::Missing("PANEL_SIGNER_ADDRESS is not set".to_string()))?;
        Self::from_hex(&address)
    }
}

impl Signer for LocalSigner {
    fn address(&self) -> Address {
        self.address.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_normalizes_case() {
        let signer = LocalSigner::from_hex("0xA11CE00000000000000000000000000000000001").unwrap();
        assert_eq!(
            signer.address(),
            Address::new("0xa11ce00000000000000000000000000000000001")
        );
    }

    #[test]
    fn test_from_hex_rejects_malformed_addresses() {
        assert!(matches!(
            LocalSigner::from_hex("a11ce"),
            Err(SignerError::InvalidAddress(_))
        ));
        assert!(matches!(
            LocalSigner::from_hex("0x1234"),
            Err(SignerError::InvalidAddress(_))
        ));
        assert!(matches!(
            LocalSigner::from_hex("0xz11ce00000000000000000000000000000000001"),
            Err(SignerError::InvalidAddress(_))
        ));
    }
}
