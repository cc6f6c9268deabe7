//! Backend response envelope.
//!
//! Core endpoints wrap payloads as `{"code": 0, "data": ...}` on success and
//! `{"code": <non-zero>, "message": "..."}` on failure. Model endpoints answer
//! with bare JSON. Decoding never guesses beyond the presence of `code`.

use serde_json::Value;

/// Message used when a failure envelope carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `code == 0`; holds `data` (null when absent).
    Success(Value),
    /// Any other `code`; holds the failure message.
    Failure(String),
    /// No envelope; the body as received.
    PassThrough(Value),
}

impl Envelope {
    pub fn decode(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Envelope::PassThrough(value);
        };

        let Some(code) = map.get("code") else {
            return Envelope::PassThrough(Value::Object(map));
        };

        if code.as_f64() == Some(0.0) {
            return Envelope::Success(map.remove("data").unwrap_or(Value::Null));
        }

        let message = map
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_FAILURE_MESSAGE);
        Envelope::Failure(message.to_string())
    }

    /// Payload on success or pass-through, message on failure.
    pub fn into_result(self) -> Result<Value, String> {
        match self {
            Envelope::Success(data) | Envelope::PassThrough(data) => Ok(data),
            Envelope::Failure(message) => Err(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_unwraps_data() {
        let env = Envelope::decode(json!({"code": 0, "data": {"items": [1, 2]}}));
        assert_eq!(env, Envelope::Success(json!({"items": [1, 2]})));
    }

    #[test]
    fn test_success_without_data_is_null() {
        assert_eq!(Envelope::decode(json!({"code": 0})), Envelope::Success(Value::Null));
    }

    #[test]
    fn test_failure_message() {
        let env = Envelope::decode(json!({"code": 1001, "message": "mode is required"}));
        assert_eq!(env, Envelope::Failure("mode is required".into()));

        let env = Envelope::decode(json!({"code": -1, "message": ""}));
        assert_eq!(env, Envelope::Failure(DEFAULT_FAILURE_MESSAGE.into()));

        // `"0"` is not the number zero.
        let env = Envelope::decode(json!({"code": "0", "data": 1}));
        assert_eq!(env, Envelope::Failure(DEFAULT_FAILURE_MESSAGE.into()));
    }

    #[test]
    fn test_pass_through() {
        let body = json!({"results": [{"label": "joy", "score": 0.9}]});
        assert_eq!(Envelope::decode(body.clone()), Envelope::PassThrough(body));

        assert_eq!(Envelope::decode(json!([1, 2])), Envelope::PassThrough(json!([1, 2])));
        assert_eq!(Envelope::decode(json!("ok")).into_result(), Ok(json!("ok")));
    }
}
