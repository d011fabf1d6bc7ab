//! Pub/Sub push delivery envelope and the relay event it carries.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PubsubMessage {
    /// Base64 encoded event JSON.
    pub data: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub publish_time: Option<String>,
    #[serde(default)]
    pub attributes: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PubsubEnvelope {
    #[serde(default)]
    pub message: PubsubMessage,
    #[serde(default)]
    pub subscription: Option<String>,
}

/// Decoded event published when a rate feed should be relayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayRequested {
    pub rate_feed_name: String,
    #[serde(default)]
    pub relayer_address: Option<String>,
}
