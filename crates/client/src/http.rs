//! Request dispatch and response normalisation shared by every client.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use smartbiz_auth::SessionStore;

use crate::ClientError;

/// Best-effort extraction of `{"message": "..."}` from a failure body.
///
/// Anything other than a non-blank string `message` yields `None`.
pub(crate) fn extract_message(body: &[u8]) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_slice(body).ok()?;
    match parsed.get("message")? {
        serde_json::Value::String(msg) if !msg.trim().is_empty() => Some(msg.clone()),
        _ => None,
    }
}

/// Attach `Authorization: Bearer <token>`, reading the token at call time.
pub(crate) fn authorized(req: RequestBuilder, sessions: &dyn SessionStore) -> RequestBuilder {
    match sessions.read().token() {
        Some(token) => req.bearer_auth(token.as_str()),
        None => {
            tracing::warn!("no session token; sending request without Authorization header");
            req
        }
    }
}

/// Send a request and return the response if it was 2xx.
pub(crate) async fn send(req: RequestBuilder, fallback: &str) -> Result<Response, ClientError> {
    let resp = req.send().await.map_err(|e| ClientError::Network {
        message: fallback.to_string(),
        detail: e.to_string(),
    })?;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    // An unreadable error body just means "no server message".
    let body = resp.bytes().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_else(|| fallback.to_string());
    tracing::warn!(status = status.as_u16(), %message, "request rejected by server");

    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Send a request and decode a 2xx JSON body.
pub(crate) async fn send_json<T>(req: RequestBuilder, fallback: &str) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    let resp = send(req, fallback).await?;

    let body = resp.bytes().await.map_err(|e| ClientError::Network {
        message: fallback.to_string(),
        detail: e.to_string(),
    })?;

    serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "unexpected response body");
        ClientError::Decode {
            message: fallback.to_string(),
            detail: e.to_string(),
        }
    })
}
