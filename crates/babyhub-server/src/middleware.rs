use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::ApiError;

const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id attached to every request as an extension and echoed back in
/// the `x-request-id` response header.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Accepts a caller-supplied id only if it is short printable ASCII, so it is
/// safe to log and to send back as a header.
fn caller_request_id(req: &Request) -> Option<String> {
    let raw = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let valid = !raw.is_empty()
        && raw.len() <= MAX_REQUEST_ID_LEN
        && raw.bytes().all(|b| b.is_ascii_graphic());
    valid.then(|| raw.to_owned())
}

pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = caller_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

#[derive(Debug)]
struct QuotaUsage {
    window_start: Instant,
    used: usize,
}

/// Server-wide budget for requests proxied to the assist service. Catalog
/// routes are served from memory and never draw on it.
#[derive(Debug, Clone)]
pub struct AssistQuota {
    limit: usize,
    window: Duration,
    usage: Arc<Mutex<QuotaUsage>>,
}

impl AssistQuota {
    #[must_use]
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            usage: Arc::new(Mutex::new(QuotaUsage {
                window_start: Instant::now(),
                used: 0,
            })),
        }
    }

    /// Takes one unit from the current window. On exhaustion returns how
    /// long until the window resets.
    fn try_acquire(&self) -> Result<(), Duration> {
        let mut usage = self.usage.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let elapsed = now.duration_since(usage.window_start);

        if elapsed >= self.window {
            usage.window_start = now;
            usage.used = 0;
        } else if usage.used >= self.limit {
            return Err(self.window - elapsed);
        }

        usage.used += 1;
        Ok(())
    }
}

/// Rejects assist-backed requests with 429 and a `Retry-After` header once
/// the quota for the current window is spent.
pub async fn limit_assist_calls(
    State(quota): State<AssistQuota>,
    req: Request,
    next: Next,
) -> Response {
    let Err(retry_after) = quota.try_acquire() else {
        return next.run(req).await;
    };

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let retry_secs = retry_after.as_secs().max(1);
    tracing::warn!(
        path = %req.uri().path(),
        limit = quota.limit,
        retry_secs,
        "assist quota exhausted"
    );

    let mut res = ApiError::new(
        request_id,
        "rate_limited",
        "too many assistant requests, try again shortly",
    )
    .into_response();
    res.headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_secs));
    res
}
