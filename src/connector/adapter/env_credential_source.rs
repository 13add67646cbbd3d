use crate::application::CredentialSource;

/// Reads credentials from the process environment.
pub struct EnvCredentialSource;

impl EnvCredentialSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvCredentialSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentialSource {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn describe(&self) -> String {
        "environment".to_string()
    }
}
