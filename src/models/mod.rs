//! # Models Module
//!
//! Contains core data structures and type definitions for the relayer service.

mod network;
pub use network::*;

mod secret_string;
pub use secret_string::*;

mod app_state;
pub use app_state::*;

mod api_response;
pub use api_response::*;

mod relay;
pub use relay::*;

mod pubsub;
pub use pubsub::*;

mod discord;
pub use discord::*;

mod error;
pub use error::*;

mod relayer_addresses;
pub use relayer_addresses::*;
