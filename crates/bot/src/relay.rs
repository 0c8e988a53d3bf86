//! HTTP surface for the gateway relay.
//!
//! The relay watches the platform gateway and forwards every message event
//! here as a signed JSON POST, using the same signature scheme the platform
//! applies to its own webhooks.

use crate::{chat::Messenger, router::Bot, store::ConfigStore};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use http_body_util::{BodyExt, Full};
use hyper::{
    body::{Body, Bytes},
    Method, Request, Response, StatusCode,
};
use model::message::Message;

/// Enforces the transport rules and the event signature, yielding the raw
/// payload of an authentic request.
async fn checked_payload<B: Body>(req: Request<B>, key: &VerifyingKey) -> Result<Bytes, StatusCode> {
    if req.method() != Method::POST {
        return Err(StatusCode::METHOD_NOT_ALLOWED);
    }

    if req.uri().path() != "/" {
        return Err(StatusCode::NOT_FOUND);
    }

    // Headers must stay alive while the body is collected.
    let (parts, body) = req.into_parts();
    let maybe_sig = parts.headers.get("X-Signature-Ed25519");
    let maybe_time = parts.headers.get("X-Signature-Timestamp");
    let (sig, timestamp) = maybe_sig.zip(maybe_time).ok_or(StatusCode::UNAUTHORIZED)?;

    let signature = hex::decode(sig).map_err(|_| StatusCode::BAD_REQUEST)?;
    let signature = Signature::from_slice(&signature).map_err(|_| StatusCode::BAD_REQUEST)?;

    // Append body after the timestamp
    let payload = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(&payload);

    // Validate the challenge
    key.verify(&message, &signature).map_err(|_| StatusCode::UNAUTHORIZED)?;
    drop(message);

    Ok(payload)
}

/// Serves one relayed request end to end. Authentic message events are
/// dispatched to the bot and acknowledged with `204 No Content`.
pub async fn respond<B, S, C>(req: Request<B>, key: &VerifyingKey, bot: &Bot<S, C>) -> Response<Full<Bytes>>
where
    B: Body,
    S: Messenger,
    C: ConfigStore,
{
    let status = match checked_payload(req, key).await {
        Ok(payload) => match serde_json::from_slice::<Message>(&payload) {
            Ok(event) => {
                drop(payload);
                bot.on_message(event).await;
                StatusCode::NO_CONTENT
            }
            Err(err) => {
                log::warn!("relay pushed an undecodable event: {err}");
                StatusCode::BAD_REQUEST
            }
        },
        Err(status) => {
            log::debug!("rejecting relay request: {status}");
            status
        }
    };

    let mut res = Response::new(Full::default());
    *res.status_mut() = status;
    res
}
