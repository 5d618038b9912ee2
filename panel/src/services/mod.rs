//! # Services
//!
//! Concrete collaborators the panel can be mounted with.
//!
//! - [`signer`]: [`LocalSigner`](signer::LocalSigner), an address-only signing identity
//! - [`sim`]: [`SimulatedChain`](sim::SimulatedChain), an in-memory connection plus game
//!   and market contracts, used by the demo binary and the tests

pub mod signer;
pub mod sim;
