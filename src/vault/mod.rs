//! Vault module — encrypted secret storage.
//!
//! This module provides:
//! - `VaultContents` and `PinVerifier` types (`contents`)
//! - The encrypted codec (`format`)
//! - Atomic on-disk persistence via `VaultStore` (`store`)
//! - `VaultEngine` and the unlocked `Vault` session (`engine`)

pub mod contents;
pub mod engine;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use contents::{PinVerifier, VaultContents};
pub use engine::{Vault, VaultEngine};
pub use store::VaultStore;
