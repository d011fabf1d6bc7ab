//! Initialization routines for the relayer system
//!
//! # Submodules
//!
//! - `initialize_app_state`: Builds the relay engine and the application state around it
mod initialize_app_state;
pub use initialize_app_state::*;
