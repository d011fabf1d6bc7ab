//! # Relay
//!
//! Executes `relay()` transactions on the price feed relayer contracts.
//!
//! * `contract` - ABI bindings of the relayer contract
//! * `classification` - revert and node error classification
//! * `receipt` - receipt polling
//! * `engine` - the relay execution engine

mod contract;
pub use contract::*;

mod classification;
pub use classification::*;

mod receipt;
pub use receipt::*;

mod engine;
pub use engine::*;
