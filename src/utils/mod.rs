mod base64;
pub use base64::*;

mod derivation;
pub use derivation::*;

mod rate_feed;
pub use rate_feed::*;

mod trace;
pub use trace::*;


mod service_info_log;
pub use service_info_log::*;
