//! # API Routes Module
//!
//! Configures HTTP routes for the relayer service API.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/relay` - Pub/Sub push endpoint

pub mod health;
pub mod relay;

use actix_web::web;

use crate::domain::RelayEngineTrait;

pub fn configure_routes<E: RelayEngineTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init).configure(relay::init::<E>);
}
