//! Request audit trail: one `request_logs` row per non-excluded request.
//! Excluded: the docs route, the health route, OPTIONS, and 401 responses.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{Body, HttpBody, to_bytes},
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, Method, StatusCode, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};
use serde_json::Value;
use uuid::Uuid;

use crate::{entity::request_logs, state::AppState};

// Matches the request body limit layered on the router.
const BODY_CAPTURE_LIMIT: usize = 1024 * 1024;

pub async fn audit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if request.method() == Method::OPTIONS || path == "/health" || path.starts_with("/docs") {
        return next.run(request).await;
    }

    let method = request.method().to_string();
    let url = request.uri().to_string();
    let agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let decoded = decoded_claims(request.headers());

    let (parts, body) = request.into_parts();
    let (request, request_body) = if within_capture_limit(&body) {
        let bytes = to_bytes(body, BODY_CAPTURE_LIMIT).await.unwrap_or_default();
        let value = redact_password(parse_json(&bytes));
        (Request::from_parts(parts, Body::from(bytes)), value)
    } else {
        (Request::from_parts(parts, body), None)
    };

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if response.status() == StatusCode::UNAUTHORIZED {
        return response;
    }

    let status = i32::from(response.status().as_u16());
    let (parts, body) = response.into_parts();
    let (response, response_body) = capture_response(parts, body).await;

    let row = request_logs::ActiveModel {
        id: Set(Uuid::new_v4()),
        method: Set(method),
        url: Set(url),
        status: Set(status),
        remote_address: Set(addr.ip().to_string()),
        response_time: Set(elapsed_ms),
        agent: Set(agent),
        decoded: Set(decoded),
        request_body: Set(request_body),
        response_body: Set(response_body),
        created_at: NotSet,
    };
    if let Err(err) = row.insert(&state.orm).await {
        tracing::warn!(error = %err, "audit log failed");
    }

    response
}

fn within_capture_limit(body: &Body) -> bool {
    body.size_hint()
        .upper()
        .is_some_and(|size| size <= BODY_CAPTURE_LIMIT as u64)
}

/// Buffers the response body for the audit row. A body with no known size,
/// or one over the capture limit, is passed through to the client untouched
/// and the row records no response body.
async fn capture_response(
    parts: axum::http::response::Parts,
    body: Body,
) -> (Response, Option<Value>) {
    if !within_capture_limit(&body) {
        return (Response::from_parts(parts, body), None);
    }

    match to_bytes(body, BODY_CAPTURE_LIMIT).await {
        Ok(bytes) => {
            let value = strip_data(parse_json(&bytes));
            (Response::from_parts(parts, Body::from(bytes)), value)
        }
        Err(err) => {
            // The size check rules this out; once the body has been consumed
            // there is nothing left to hand back.
            tracing::warn!(error = %err, "audit: could not buffer response body");
            (Response::from_parts(parts, Body::empty()), None)
        }
    }
}

/// Bearer claims recorded for the audit trail only; never used to authorize.
/// Issued-at and expiry are dropped before storage.
fn decoded_claims(headers: &HeaderMap) -> Option<Value> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth.strip_prefix("Bearer ")?.trim();
    let secret = std::env::var("JWT_SECRET").ok()?;

    let data = decode::<Value>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    let mut claims = data.claims;
    if let Value::Object(map) = &mut claims {
        map.remove("iat");
        map.remove("exp");
    }
    Some(claims)
}

fn parse_json(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        None
    } else {
        serde_json::from_slice(bytes).ok()
    }
}

fn redact_password(body: Option<Value>) -> Option<Value> {
    let mut body = body?;
    if let Value::Object(map) = &mut body {
        if let Some(password) = map.get_mut("password") {
            *password = Value::String("********".to_string());
        }
    }
    Some(body)
}

fn strip_data(body: Option<Value>) -> Option<Value> {
    let mut body = body?;
    if let Value::Object(map) = &mut body {
        map.remove("data");
    }
    Some(body)
}
