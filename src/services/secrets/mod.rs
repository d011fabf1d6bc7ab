//! # Google Cloud Secret Manager Service Module
//!
//! Reads the latest version of a secret through the Secret Manager REST API,
//! authenticated with Application Default Credentials.
//!
//! ```text
//! GcpSecretManagerService (implements SecretServiceTrait)
//!   ├── Authentication (ADC, headers cached between calls)
//!   └── versions/latest:access
//! ```

use async_trait::async_trait;
#[cfg(not(test))]
use google_cloud_auth::credentials::{Builder as CredentialsBuilder, CacheableResource};
use google_cloud_auth::credentials::Credentials;
#[cfg_attr(test, allow(unused_imports))]
use http::{Extensions, HeaderMap};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};

#[cfg(test)]
use mockall::automock;

use crate::{models::SecretString, utils::base64_decode};

const SECRET_MANAGER_BASE_URL: &str = "https://secretmanager.googleapis.com";

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SecretError {
    #[error("Secret Manager HTTP error: {0}")]
    HttpError(String),
    #[error("Secret Manager API error: {0}")]
    ApiError(String),
    #[error("Secret Manager response parse error: {0}")]
    ParseError(String),
    #[error("Secret {0} is empty")]
    Empty(String),
    #[error("Secret Manager auth error: {0}")]
    AuthError(String),
}

pub type SecretResult<T> = Result<T, SecretError>;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait SecretServiceTrait: Send + Sync {
    /// Returns the latest version of `secret_id`. Fails if it is absent or empty.
    async fn get_secret(&self, secret_id: &str) -> SecretResult<SecretString>;
}

#[derive(Deserialize)]
struct AccessSecretVersionResponse {
    payload: Option<SecretPayload>,
}

#[derive(Deserialize)]
struct SecretPayload {
    data: Option<String>,
}

#[derive(Clone)]
pub struct GcpSecretManagerService {
    project_id: String,
    base_url: String,
    client: Client,
    #[cfg_attr(test, allow(dead_code))]
    credentials: Arc<OnceCell<Credentials>>,
    #[cfg_attr(test, allow(dead_code))]
    cached_headers: Arc<RwLock<Option<HeaderMap>>>,
}

impl GcpSecretManagerService {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self::with_base_url(project_id, SECRET_MANAGER_BASE_URL)
    }

    pub fn with_base_url(project_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            credentials: Arc::new(OnceCell::new()),
            cached_headers: Arc::new(RwLock::new(None)),
        }
    }

    async fn get_auth_headers(&self) -> SecretResult<HeaderMap> {
        #[cfg(test)]
        {
            let mut headers = HeaderMap::new();
            headers.insert("Authorization", "Bearer test-token".parse().unwrap());
            Ok(headers)
        }

        #[cfg(not(test))]
        {
            let credentials = self
                .credentials
                .get_or_try_init(|| async {
                    CredentialsBuilder::default()
                        .build()
                        .map_err(|e| SecretError::AuthError(e.to_string()))
                })
                .await?;

            let cacheable_headers = credentials
                .headers(Extensions::new())
                .await
                .map_err(|e| SecretError::AuthError(e.to_string()))?;

            match cacheable_headers {
                CacheableResource::New { data, .. } => {
                    let mut cached = self.cached_headers.write().await;
                    *cached = Some(data.clone());
                    Ok(data)
                }
                CacheableResource::NotModified => {
                    let cached = self.cached_headers.read().await;
                    cached.as_ref().cloned().ok_or_else(|| {
                        SecretError::AuthError(
                            "Auth headers not modified, but not found in cache".to_string(),
                        )
                    })
                }
            }
        }
    }

    fn secret_version_url(&self, secret_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/secrets/{}/versions/latest:access",
            self.base_url, self.project_id, secret_id
        )
    }
}

#[async_trait]
impl SecretServiceTrait for GcpSecretManagerService {
    async fn get_secret(&self, secret_id: &str) -> SecretResult<SecretString> {
        let url = self.secret_version_url(secret_id);
        debug!("Accessing secret {}", secret_id);

        let headers = self.get_auth_headers().await?;
        let resp = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| SecretError::HttpError(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(SecretError::ApiError(format!(
                "Secret request failed ({}): {}",
                status, text
            )));
        }

        let body: AccessSecretVersionResponse = serde_json::from_str(&text)
            .map_err(|e| SecretError::ParseError(e.to_string()))?;

        let encoded = body
            .payload
            .and_then(|payload| payload.data)
            .ok_or_else(|| SecretError::Empty(secret_id.to_string()))?;

        let decoded =
            base64_decode(&encoded).map_err(|e| SecretError::ParseError(e.to_string()))?;
        let secret = SecretString::from_bytes(decoded)
            .map_err(|e| SecretError::ParseError(e.to_string()))?;

        if secret.is_empty() {
            return Err(SecretError::Empty(secret_id.to_string()));
        }

        Ok(secret)
    }
}
