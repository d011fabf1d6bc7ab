//! Configuration of the oracle relayer service.
//!
//! Everything is read from the environment (optionally seeded from a `.env`
//! file): the target network, the Secret Manager project and secret ids, the
//! RPC endpoint override and the HTTP bind address.
mod server_config;
pub use server_config::*;

mod error;
pub use error::*;
