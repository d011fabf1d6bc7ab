use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

const EMBED_COLOR_RED: u32 = 0xff0000;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DiscordEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
}

/// Message body accepted by a Discord webhook.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DiscordMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embeds: Vec<DiscordEmbed>,
}

impl DiscordMessage {
    pub fn invalid_price(rate_feed: &str, details: &str) -> Self {
        Self {
            content: format!("🚨 Invalid price error while relaying {}", rate_feed),
            embeds: vec![DiscordEmbed {
                title: "Error Details".to_string(),
                description: details.to_string(),
                color: EMBED_COLOR_RED,
            }],
        }
    }

    pub fn stuck_transaction(rate_feed: &str, signer: Address) -> Self {
        Self {
            content: format!(
                "🚨 Tx stuck while relaying prices for {} from signer address {}, even after retrying with a higher gas price",
                rate_feed, signer
            ),
            embeds: Vec::new(),
        }
    }
}
