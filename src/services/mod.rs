//! # Services Module
//!
//! External integrations of the relayer: the chain (read and signing
//! clients), Google Cloud Secret Manager, Discord, and the cache that
//! owns the chain clients.

mod provider;
pub use provider::*;

mod signer;
pub use signer::*;

mod secrets;
pub use secrets::*;

mod notification;
pub use notification::*;

mod cache;
pub use cache::*;
