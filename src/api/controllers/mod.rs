//! # API Controllers Module
//!
//! Handles HTTP request processing and business logic coordination.
//!
//! ## Controllers
//!
//! * `relay` - Pub/Sub push deliveries that trigger a relay

pub mod relay;
