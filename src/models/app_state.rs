use std::sync::Arc;

use crate::{
    domain::{RelayEngine, RelayEngineTrait},
    services::{AlloyClientFactory, DiscordNotificationService, GcpSecretManagerService},
};

/// Relay engine wired to the production chain, secret and Discord clients.
pub type DefaultRelayEngine = RelayEngine<
    AlloyClientFactory,
    GcpSecretManagerService,
    DiscordNotificationService<GcpSecretManagerService>,
>;

pub type DefaultAppState = AppState<DefaultRelayEngine>;

pub struct AppState<E: RelayEngineTrait> {
    pub relay_engine: Arc<E>,
}

impl<E: RelayEngineTrait> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            relay_engine: self.relay_engine.clone(),
        }
    }
}

impl<E: RelayEngineTrait> AppState<E> {
    pub fn new(relay_engine: Arc<E>) -> Self {
        Self { relay_engine }
    }
}
