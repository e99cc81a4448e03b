//! API error bodies
//!
//! Every failure is rendered as `{status, message}`; validation failures add
//! a per-field `errors` map.

use serde::Serialize;

use crate::features::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(status: u16, message: impl Into<String>, errors: ValidationErrors) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_error_has_no_errors_key() {
        let body = serde_json::to_value(ErrorResponse::new(404, "gone")).unwrap();
        assert_eq!(body, json!({ "status": 404, "message": "gone" }));
    }

    #[test]
    fn test_validation_error_shape() {
        let body = serde_json::to_value(ErrorResponse::with_errors(
            400,
            "Validation failed",
            ValidationErrors::single("age", "Age cannot be null"),
        ))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "status": 400,
                "message": "Validation failed",
                "errors": { "age": "Age cannot be null" }
            })
        );
    }
}
