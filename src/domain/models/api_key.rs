use std::fmt;

use crate::domain::DomainError;

/// Logical name the credential is looked up under.
pub const API_KEY_NAME: &str = "DEEPINFRA_API_KEY";

/// Bearer token for the completion service. Never blank.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(token: impl Into<String>) -> Result<Self, DomainError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(DomainError::missing_credential(missing_credential_message()));
        }
        Ok(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

pub fn missing_credential_message() -> String {
    format!(
        "API key not found. Please set {API_KEY_NAME} as an environment variable or in the secrets file."
    )
}
