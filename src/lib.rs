//! Oracle Price Feed Relayer Library
//!
//! Pushes the latest oracle price of a rate feed on-chain by calling `relay()`
//! on the feed's relayer contract, signed by an account derived per rate feed
//! from a single mnemonic. It includes:
//!
//! - Deterministic relayer account derivation and rate feed identifiers
//! - The relay execution engine with revert classification and a single retry
//! - Discord alerts for failures that need an operator
//! - A Pub/Sub push endpoint that triggers relays
//!
//! # Module Structure
//!
//! - `api`: Pub/Sub push and health endpoints
//! - `bootstrap`: Application state wiring
//! - `config`: Configuration management
//! - `constants`: Fee, timeout and refill constants
//! - `domain`: Relay execution engine
//! - `logging`: Logging setup
//! - `models`: Data structures and error types
//! - `services`: Chain clients, secret store, notifier and client cache
//! - `utils`: Account derivation and rate feed helpers

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
