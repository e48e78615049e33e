//! Response envelopes and classification of error responses.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// Epoch-looking reset values are absolute timestamps, smaller ones are deltas.
const EPOCH_THRESHOLD: u64 = 1_000_000_000;

/// Status, headers and decoded body of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    /// Case-insensitive header map.
    pub headers: HeaderMap,
    /// Decoded body; `Null` when the body was empty.
    pub body: Value,
}

impl ResponseEnvelope {
    pub fn new(status: u16, headers: HeaderMap, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the body was empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_null()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Total-count hint of a collection page.
    pub fn count(&self) -> Option<u64> {
        self.body
            .get("count")
            .and_then(Value::as_u64)
            .or_else(|| self.body.pointer("/meta/count").and_then(Value::as_u64))
    }

    /// Get the Retry-After header as a Duration (delta seconds or an HTTP date).
    pub fn retry_after(&self) -> Option<Duration> {
        let value = self.header("retry-after")?.trim();

        if let Ok(seconds) = value.parse::<u64>() {
            return Some(Duration::from_secs(seconds));
        }

        let at = chrono::DateTime::parse_from_rfc2822(value).ok()?;
        let remaining = at.with_timezone(&chrono::Utc) - chrono::Utc::now();
        Some(remaining.to_std().unwrap_or(Duration::ZERO))
    }

    /// How long the server asks us to wait, from `Retry-After` or a rate-limit reset header.
    pub fn retry_hint(&self) -> Option<Duration> {
        self.retry_after()
            .or_else(|| self.reset_hint("ratelimit-reset"))
            .or_else(|| self.reset_hint("x-rate-limit-reset"))
    }

    fn reset_hint(&self, name: &str) -> Option<Duration> {
        let value = self.header(name)?.trim().parse::<u64>().ok()?;
        if value < EPOCH_THRESHOLD {
            return Some(Duration::from_secs(value));
        }
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        Some(Duration::from_secs(value.saturating_sub(now)))
    }

    /// Rate-limit budget reported by the server.
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        let limit = self
            .header("x-rate-limit")
            .or_else(|| self.header("ratelimit-limit"))?
            .trim()
            .parse()
            .ok()?;
        let remaining = self
            .header("x-rate-limit-remaining")
            .or_else(|| self.header("ratelimit-remaining"))?
            .trim()
            .parse()
            .ok()?;
        Some(RateLimitInfo {
            limit,
            remaining,
            reset: self.reset_hint("ratelimit-reset"),
        })
    }

    /// Turn a non-2xx envelope into the matching error; 2xx passes through.
    pub fn classify(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(parse_error_response(&self))
    }
}

/// Rate-limit budget from response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests allowed per window.
    pub limit: u64,
    /// Requests left in the current window.
    pub remaining: u64,
    /// Time until the window resets.
    pub reset: Option<Duration>,
}

impl RateLimitInfo {
    /// Get the usage percentage.
    pub fn percentage(&self) -> f64 {
        if self.limit == 0 {
            100.0
        } else {
            (self.limit.saturating_sub(self.remaining) as f64 / self.limit as f64) * 100.0
        }
    }

    /// Returns true if usage is above the given percentage threshold.
    pub fn is_above_threshold(&self, threshold_percent: f64) -> bool {
        self.percentage() >= threshold_percent
    }
}

fn parse_error_response(envelope: &ResponseEnvelope) -> Error {
    let status = envelope.status;
    let message = sanitize_error_message(&error_message(&envelope.body, status));

    let kind = match status {
        401 => ErrorKind::Authentication(message),
        403 => ErrorKind::Authorization(message),
        404 => ErrorKind::NotFound(message),
        409 => ErrorKind::Conflict(message),
        422 => ErrorKind::Validation {
            message,
            details: validation_details(&envelope.body),
        },
        429 => ErrorKind::RateLimitExceeded {
            retry_after: envelope.retry_hint(),
        },
        500..=599 => ErrorKind::Server { status, message },
        _ => ErrorKind::Http { status, message },
    };

    Error::new(kind)
}

/// Pull a human readable message out of the error body shapes Zendesk uses:
/// `{"error": "...", "description": "..."}`, `{"error": {"title", "message"}}`
/// and `{"errors": [{"title", "detail"}]}`.
fn error_message(body: &Value, status: u16) -> String {
    if let Some(description) = body.get("description").and_then(Value::as_str) {
        return description.to_string();
    }
    match body.get("error") {
        Some(Value::String(error)) => return error.clone(),
        Some(Value::Object(error)) => {
            if let Some(msg) = error
                .get("message")
                .or_else(|| error.get("title"))
                .and_then(Value::as_str)
            {
                return msg.to_string();
            }
        }
        _ => {}
    }
    if let Some(first) = body.get("errors").and_then(Value::as_array).and_then(|e| e.first()) {
        if let Some(msg) = first
            .get("detail")
            .or_else(|| first.get("title"))
            .and_then(Value::as_str)
        {
            return msg.to_string();
        }
    }
    match body {
        Value::String(text) if !text.is_empty() => text.clone(),
        _ => format!("HTTP {}", status),
    }
}

fn validation_details(body: &Value) -> BTreeMap<String, Vec<String>> {
    let mut details = BTreeMap::new();
    let Some(fields) = body.get("details").and_then(Value::as_object) else {
        return details;
    };

    for (field, entries) in fields {
        let entries = match entries {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            other => vec![other],
        };
        let descriptions = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj
                    .get("description")
                    .or_else(|| obj.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect();
        details.insert(field.clone(), descriptions);
    }

    details
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Redacts credentials that servers sometimes echo back and truncates
/// messages longer than 500 characters.
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    if let Ok(auth_pattern) = regex_lite::Regex::new(r"(?i)(bearer|basic)\s+[A-Za-z0-9._~+/=-]{8,}") {
        sanitized = auth_pattern
            .replace_all(&sanitized, "$1 [REDACTED]")
            .to_string();
    }

    if let Ok(token_pattern) = regex_lite::Regex::new(r"(?i)(access_token|token)=[A-Za-z0-9._~-]+") {
        sanitized = token_pattern
            .replace_all(&sanitized, "$1=[REDACTED]")
            .to_string();
    }

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
