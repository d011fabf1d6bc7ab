//! # Relay Controller
//!
//! Handles Pub/Sub push deliveries that request a relay of one rate feed.
use alloy::primitives::Address;
use actix_web::{web, HttpResponse};
use log::{error, info};

use crate::{
    domain::RelayEngineTrait,
    models::{ApiError, ApiResponse, AppState, PubsubEnvelope, RelayRequested},
    utils::base64_decode,
};

/// Decodes the event carried by `envelope` and relays it.
///
/// Responds 400 when the event is missing or malformed, 500 when the relay
/// did not land on-chain and 200 otherwise.
pub async fn relay<E: RelayEngineTrait>(
    envelope: PubsubEnvelope,
    trace_id: String,
    state: web::ThinData<AppState<E>>,
) -> Result<HttpResponse, ApiError> {
    let event = decode_event(&envelope, &trace_id)?;

    if event.rate_feed_name.trim().is_empty() {
        error!("[{}] Event without rate feed name", trace_id);
        return Err(ApiError::BadRequest(
            "Rate feed name not found in event data".to_string(),
        ));
    }

    let relayer_address = match event.relayer_address.as_deref() {
        Some(address) if !address.trim().is_empty() => address,
        _ => {
            let event_json = serde_json::to_string_pretty(&event)
                .unwrap_or_else(|_| event.rate_feed_name.clone());
            return Err(ApiError::BadRequest(format!(
                "Relayer address not found in event data: {}",
                event_json
            )));
        }
    };

    let target: Address = relayer_address.trim().parse().map_err(|_| {
        error!("[{}] Invalid relayer address: {}", trace_id, relayer_address);
        ApiError::BadRequest(format!("Invalid relayer address: {}", relayer_address))
    })?;

    info!(
        "[{}] Relay requested for {} at {}",
        trace_id, event.rate_feed_name, target
    );

    if !state.relay_engine.relay(target, &event.rate_feed_name).await {
        return Err(ApiError::InternalError("Relay failed".to_string()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success()))
}

fn decode_event(envelope: &PubsubEnvelope, trace_id: &str) -> Result<RelayRequested, ApiError> {
    let data = envelope
        .message
        .data
        .as_deref()
        .filter(|data| !data.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No event data found".to_string()))?;

    let decoded = base64_decode(data).map_err(|e| {
        error!("[{}] Error parsing event data {}: {}", trace_id, data, e);
        ApiError::BadRequest("Error parsing event data".to_string())
    })?;

    serde_json::from_slice(&decoded).map_err(|e| {
        error!("[{}] Error parsing event data {}: {}", trace_id, data, e);
        ApiError::BadRequest("Error parsing event data".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::MockRelayEngineTrait, models::PubsubMessage, utils::base64_encode};
    use actix_web::{body::to_bytes, http::StatusCode, ResponseError};
    use alloy::primitives::address;
    use futures::FutureExt;
    use std::sync::Arc;

    const RELAYER: Address = address!("aFc02368A174Cd08e01c373de6D0B537CECF43C8");

    fn envelope(data: Option<String>) -> PubsubEnvelope {
        PubsubEnvelope {
            message: PubsubMessage {
                data,
                message_id: Some("1".to_string()),
                ..Default::default()
            },
            subscription: None,
        }
    }

    fn event_envelope(json: serde_json::Value) -> PubsubEnvelope {
        envelope(Some(base64_encode(json.to_string().as_bytes())))
    }

    fn state(engine: MockRelayEngineTrait) -> web::ThinData<AppState<MockRelayEngineTrait>> {
        web::ThinData(AppState::new(Arc::new(engine)))
    }

    fn engine_never_called() -> MockRelayEngineTrait {
        let mut engine = MockRelayEngineTrait::new();
        engine.expect_relay().times(0);
        engine
    }

    async fn error_body(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let body = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn test_relay_success() {
        let mut engine = MockRelayEngineTrait::new();
        engine
            .expect_relay()
            .withf(|target, feed| *target == RELAYER && feed == "CELO/PHP")
            .times(1)
            .returning(|_, _| async { true }.boxed());

        let response = relay(
            event_envelope(serde_json::json!({
                "rate_feed_name": "CELO/PHP",
                "relayer_address": "0xaFc02368A174Cd08e01c373de6D0B537CECF43C8"
            })),
            "trace".to_string(),
            state(engine),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "success" }));
    }

    #[actix_web::test]
    async fn test_relay_failure_is_internal_error() {
        let mut engine = MockRelayEngineTrait::new();
        engine
            .expect_relay()
            .times(1)
            .returning(|_, _| async { false }.boxed());

        let err = relay(
            event_envelope(serde_json::json!({
                "rate_feed_name": "CELO/PHP",
                "relayer_address": "0xaFc02368A174Cd08e01c373de6D0B537CECF43C8"
            })),
            "trace".to_string(),
            state(engine),
        )
        .await
        .unwrap_err();

        let (status, json) = error_body(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Relay failed");
    }

    #[actix_web::test]
    async fn test_missing_data() {
        let err = relay(envelope(None), "t".to_string(), state(engine_never_called()))
            .await
            .unwrap_err();

        let (status, json) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "No event data found");
    }

    #[actix_web::test]
    async fn test_undecodable_data() {
        for data in ["%%%", "bm90IGpzb24="] {
            let err = relay(
                envelope(Some(data.to_string())),
                "t".to_string(),
                state(engine_never_called()),
            )
            .await
            .unwrap_err();

            let (status, json) = error_body(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "Error parsing event data");
        }
    }

    #[actix_web::test]
    async fn test_missing_relayer_address() {
        let err = relay(
            event_envelope(serde_json::json!({ "rate_feed_name": "PHP/USD" })),
            "t".to_string(),
            state(engine_never_called()),
        )
        .await
        .unwrap_err();

        let (status, json) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with("Relayer address not found in event data: "));
        assert!(message.contains("PHP/USD"));
    }

    #[actix_web::test]
    async fn test_blank_rate_feed_name() {
        for name in ["", "   "] {
            let err = relay(
                event_envelope(serde_json::json!({
                    "rate_feed_name": name,
                    "relayer_address": "0xaFc02368A174Cd08e01c373de6D0B537CECF43C8"
                })),
                "t".to_string(),
                state(engine_never_called()),
            )
            .await
            .unwrap_err();

            let (status, json) = error_body(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "Rate feed name not found in event data");
        }
    }

    #[actix_web::test]
    async fn test_invalid_relayer_address() {
        let err = relay(
            event_envelope(serde_json::json!({
                "rate_feed_name": "PHP/USD",
                "relayer_address": "0x1234"
            })),
            "t".to_string(),
            state(engine_never_called()),
        )
        .await
        .unwrap_err();

        let (status, _) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
