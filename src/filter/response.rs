use serde_json::Value;

use crate::error::Result;

const JSON_CONTENT_TYPE: &str = "application/json";

/// What came back from the transport: status, headers and the raw body.
#[derive(Debug, Clone)]
pub struct ResponseOutcome {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ResponseOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        self.headers.iter().any(|(name, value)| {
            name.eq_ignore_ascii_case("content-type")
                && value.to_ascii_lowercase().contains(JSON_CONTENT_TYPE)
        })
    }
}

/// The decoded result routed to the event mutator.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Value(Value),
    Failed { reason: String },
}

/// Reduce a transport result to a decoded value or a failure.
///
/// Transport errors and non-2xx statuses fail; a JSON content-type triggers
/// body parsing (a parse error is also a failure); any other body is returned
/// as a raw string. Nothing propagates past this boundary.
pub fn decode(outcome: Result<ResponseOutcome>) -> Decoded {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            return Decoded::Failed {
                reason: e.to_string(),
            }
        }
    };

    if !outcome.is_success() {
        return Decoded::Failed {
            reason: format!("unexpected response status {}", outcome.status),
        };
    }

    if outcome.is_json() {
        match serde_json::from_str(&outcome.body) {
            Ok(value) => Decoded::Value(value),
            Err(e) => Decoded::Failed {
                reason: format!("invalid JSON response body: {}", e),
            },
        }
    } else {
        Decoded::Value(Value::String(outcome.body))
    }
}
