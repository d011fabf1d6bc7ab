use alloy::{
    primitives::Bytes,
    transports::{RpcError, TransportErrorKind},
};
use thiserror::Error;

/// Errors returned by the chain RPC clients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Request timeout")]
    Timeout,
    #[error("Rate limited (HTTP 429)")]
    RateLimited,
    #[error("Execution reverted: {message}")]
    Revert {
        message: String,
        data: Option<Bytes>,
    },
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),
    #[error("Other provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Message reported by the node, or the error text for local failures.
    pub fn details(&self) -> String {
        match self {
            ProviderError::Revert { message, .. } | ProviderError::Rpc { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

impl From<RpcError<TransportErrorKind>> for ProviderError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        match err {
            RpcError::ErrorResp(payload) => {
                let message = payload.message.to_string();
                match payload.as_revert_data() {
                    Some(data) => ProviderError::Revert {
                        message,
                        data: Some(data),
                    },
                    None if is_revert_message(&message) => {
                        ProviderError::Revert { message, data: None }
                    }
                    None => ProviderError::Rpc {
                        code: payload.code,
                        message,
                    },
                }
            }
            RpcError::Transport(kind) => ProviderError::from(kind),
            other => ProviderError::Other(other.to_string()),
        }
    }
}

impl From<TransportErrorKind> for ProviderError {
    fn from(kind: TransportErrorKind) -> Self {
        match kind {
            TransportErrorKind::HttpError(ref http_err) if http_err.status == 429 => {
                ProviderError::RateLimited
            }
            TransportErrorKind::Custom(ref inner) => match inner.downcast_ref::<reqwest::Error>() {
                Some(req_err) if req_err.is_timeout() => ProviderError::Timeout,
                _ => ProviderError::Transport(kind.to_string()),
            },
            other => ProviderError::Transport(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

fn is_revert_message(message: &str) -> bool {
    message.to_lowercase().contains("execution reverted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::rpc::json_rpc::ErrorPayload;
    use alloy::transports::HttpError;

    fn error_resp(code: i64, message: &str, data: Option<&str>) -> RpcError<TransportErrorKind> {
        let payload = match data {
            Some(data) => serde_json::json!({ "code": code, "message": message, "data": data }),
            None => serde_json::json!({ "code": code, "message": message }),
        };
        let payload: ErrorPayload = serde_json::from_value(payload).unwrap();
        RpcError::ErrorResp(payload)
    }

    #[test]
    fn test_revert_with_data() {
        let err = ProviderError::from(error_resp(3, "execution reverted", Some("0x2a2b3c4d")));
        match err {
            ProviderError::Revert { message, data } => {
                assert_eq!(message, "execution reverted");
                assert_eq!(data.unwrap().to_vec(), vec![0x2a, 0x2b, 0x3c, 0x4d]);
            }
            other => panic!("Expected revert, got {:?}", other),
        }
    }

    #[test]
    fn test_revert_without_data() {
        let err = ProviderError::from(error_resp(-32000, "execution reverted", None));
        assert!(matches!(err, ProviderError::Revert { data: None, .. }));
    }

    #[test]
    fn test_node_error_is_rpc() {
        let err = ProviderError::from(error_resp(
            -32000,
            "replacement transaction underpriced",
            None,
        ));
        assert_eq!(
            err,
            ProviderError::Rpc {
                code: -32000,
                message: "replacement transaction underpriced".to_string()
            }
        );
        assert_eq!(err.details(), "replacement transaction underpriced");
    }

    #[test]
    fn test_http_429_is_rate_limited() {
        let err = ProviderError::from(RpcError::Transport(TransportErrorKind::HttpError(
            HttpError {
                status: 429,
                body: "too many requests".to_string(),
            },
        )));
        assert_eq!(err, ProviderError::RateLimited);
    }

    #[test]
    fn test_other_transport_error() {
        let err = ProviderError::from(RpcError::Transport(TransportErrorKind::BackendGone));
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[test]
    fn test_details_for_local_errors() {
        assert_eq!(ProviderError::Timeout.details(), "Request timeout");
    }
}
