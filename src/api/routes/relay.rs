//! This module defines the HTTP routes that receive relay requests.
//!
//! Pub/Sub push subscriptions deliver to `POST /api/v1/relay`. `POST /` accepts
//! the same envelope for subscriptions configured with the bare service URL.
use crate::{
    api::controllers::relay,
    domain::RelayEngineTrait,
    models::{ApiError, AppState, PubsubEnvelope},
    utils::extract_trace_id,
};
use actix_web::{web, HttpRequest, Responder};

const TRACEPARENT_HEADER: &str = "traceparent";

/// Receives a Pub/Sub push delivery and relays the rate feed it names.
async fn relay_pubsub_push<E: RelayEngineTrait + 'static>(
    req: HttpRequest,
    envelope: web::Json<PubsubEnvelope>,
    data: web::ThinData<AppState<E>>,
) -> impl Responder {
    let envelope = envelope.into_inner();
    let fallback = envelope
        .message
        .message_id
        .clone()
        .unwrap_or_else(|| "unknown".to_string());
    let traceparent = req
        .headers()
        .get(TRACEPARENT_HEADER)
        .and_then(|value| value.to_str().ok());
    let trace_id = extract_trace_id(traceparent, &fallback);

    relay::relay(envelope, trace_id, data).await
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::error!("Rejected push delivery: {}", err);
        ApiError::BadRequest("Error parsing event data".to_string()).into()
    })
}

/// Initializes the relay routes under the enclosing scope.
pub fn init<E: RelayEngineTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/relay")
            .app_data(json_config())
            .route(web::post().to(relay_pubsub_push::<E>)),
    );
}

/// Initializes the push endpoint at the service root.
pub fn init_root<E: RelayEngineTrait + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .app_data(json_config())
            .route(web::post().to(relay_pubsub_push::<E>)),
    );
}
