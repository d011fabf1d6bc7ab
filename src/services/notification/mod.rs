//! This module provides the `DiscordNotificationService` for alerting operators
//! about relay failures that need human attention.
use std::sync::Arc;

use alloy::primitives::Address;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::OnceCell;

#[cfg(test)]
use mockall::automock;

use crate::{
    models::{DiscordMessage, SecretString},
    services::{SecretError, SecretServiceTrait},
};

#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum NotificationError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Webhook error: {0}")]
    WebhookError(String),
    #[error("Webhook URL unavailable: {0}")]
    SecretError(#[from] SecretError),
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait NotificationServiceTrait: Send + Sync {
    /// Alerts that the source price of `rate_feed` was rejected as invalid.
    async fn notify_invalid_price(
        &self,
        rate_feed: &str,
        details: &str,
    ) -> Result<(), NotificationError>;

    /// Alerts that a relay transaction of `signer` stayed stuck after the retry.
    async fn notify_stuck_transaction(
        &self,
        rate_feed: &str,
        signer: Address,
    ) -> Result<(), NotificationError>;
}

/// Posts alerts to a Discord webhook whose URL is kept in the secret store.
pub struct DiscordNotificationService<S>
where
    S: SecretServiceTrait,
{
    client: Client,
    secret_service: Arc<S>,
    webhook_url_secret_id: String,
    webhook_url: OnceCell<SecretString>,
}

impl<S> DiscordNotificationService<S>
where
    S: SecretServiceTrait,
{
    pub fn new(secret_service: Arc<S>, webhook_url_secret_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            secret_service,
            webhook_url_secret_id: webhook_url_secret_id.into(),
            webhook_url: OnceCell::new(),
        }
    }

    async fn webhook_url(&self) -> Result<&SecretString, NotificationError> {
        let url = self
            .webhook_url
            .get_or_try_init(|| self.secret_service.get_secret(&self.webhook_url_secret_id))
            .await?;
        Ok(url)
    }

    pub async fn send_message(&self, message: &DiscordMessage) -> Result<(), NotificationError> {
        let url = self.webhook_url().await?.to_str();

        let response = self.client.post(url.as_str()).json(message).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_message = response.text().await?;
            Err(NotificationError::WebhookError(error_message))
        }
    }
}

#[async_trait]
impl<S> NotificationServiceTrait for DiscordNotificationService<S>
where
    S: SecretServiceTrait,
{
    async fn notify_invalid_price(
        &self,
        rate_feed: &str,
        details: &str,
    ) -> Result<(), NotificationError> {
        self.send_message(&DiscordMessage::invalid_price(rate_feed, details))
            .await
    }

    async fn notify_stuck_transaction(
        &self,
        rate_feed: &str,
        signer: Address,
    ) -> Result<(), NotificationError> {
        self.send_message(&DiscordMessage::stuck_transaction(rate_feed, signer))
            .await
    }
}
