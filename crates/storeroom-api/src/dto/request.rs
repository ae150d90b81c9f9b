//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login and password, used by both registration and login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Login name.
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_fail_validation() {
        let req = CredentialsRequest {
            login: String::new(),
            password: "pw".to_string(),
        };
        let errors = req.validate().expect_err("empty login");
        assert!(errors.field_errors().contains_key("login"));

        let ok = CredentialsRequest {
            login: "bob".to_string(),
            password: "pw".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
