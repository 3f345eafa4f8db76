//! The `ServiceResponse` envelope returned by every service-boundary call.
//!
//! Callers are never handed a raw error: every failure path is folded into
//! `{ success: false, message, errors }` so a UI can show all problems at
//! once instead of one at a time.

use serde::{Deserialize, Serialize};

/// Discriminated result envelope, keyed by the `success` boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,

    /// Present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Present on failure: a single human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Present on failure: per-line or batch-level error details.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl<T> ServiceResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Unwrap into a plain `Result`, losing nothing on the failure side.
    pub fn into_result(self) -> Result<T, (String, Vec<String>)> {
        if self.success {
            match self.data {
                Some(data) => Ok(data),
                None => Err(("success response carried no data".to_string(), Vec::new())),
            }
        } else {
            Err((self.message.unwrap_or_default(), self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_failure_fields() {
        let res = ServiceResponse::ok(42);
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": 42 }));
    }

    #[test]
    fn failure_carries_message_and_errors() {
        let res: ServiceResponse<()> =
            ServiceResponse::failure("validation failed", vec!["EMPTY_BATCH: movement contains no lines".into()]);
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "validation failed");
        assert_eq!(json["errors"].as_array().unwrap().len(), 1);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn into_result_preserves_both_sides() {
        assert_eq!(ServiceResponse::ok(7).into_result(), Ok(7));

        let err: ServiceResponse<u32> = ServiceResponse::failure("timeout", vec![]);
        assert_eq!(err.into_result(), Err(("timeout".to_string(), vec![])));
    }
}
