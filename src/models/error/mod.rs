mod api;
pub use api::*;

mod provider;
pub use provider::*;

mod signer;
pub use signer::*;
