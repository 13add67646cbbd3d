use std::sync::Arc;

use tracing::debug;

use crate::application::CredentialSource;
use crate::domain::{missing_credential_message, ApiKey, DomainError};

/// Resolves the API key by asking each source in order.
///
/// Blank values count as absent. When every source comes up empty the caller
/// gets [`DomainError::MissingCredential`] and must stop before any chat starts.
pub struct LoadCredentialUseCase {
    sources: Vec<Arc<dyn CredentialSource>>,
}

impl LoadCredentialUseCase {
    pub fn new(sources: Vec<Arc<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    pub fn execute(&self, key: &str) -> Result<ApiKey, DomainError> {
        for source in &self.sources {
            match source.lookup(key) {
                Some(token) if !token.trim().is_empty() => {
                    debug!("Found {} in {}", key, source.describe());
                    return ApiKey::new(token);
                }
                _ => debug!("{} not set in {}", key, source.describe()),
            }
        }

        Err(DomainError::missing_credential(missing_credential_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<String, String>);

    impl MapSource {
        fn with(key: &str, value: &str) -> Arc<dyn CredentialSource> {
            Arc::new(Self(HashMap::from([(key.to_string(), value.to_string())])))
        }

        fn empty() -> Arc<dyn CredentialSource> {
            Arc::new(Self(HashMap::new()))
        }
    }

    impl CredentialSource for MapSource {
        fn lookup(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn describe(&self) -> String {
            "map".to_string()
        }
    }

    #[test]
    fn test_first_source_wins() {
        let use_case = LoadCredentialUseCase::new(vec![
            MapSource::with("KEY", "from-file"),
            MapSource::with("KEY", "from-env"),
        ]);

        assert_eq!(use_case.execute("KEY").unwrap().expose(), "from-file");
    }

    #[test]
    fn test_blank_value_falls_through() {
        let use_case = LoadCredentialUseCase::new(vec![
            MapSource::with("KEY", "  "),
            MapSource::with("KEY", "from-env"),
        ]);

        assert_eq!(use_case.execute("KEY").unwrap().expose(), "from-env");
    }

    #[test]
    fn test_missing_everywhere_is_an_error() {
        let use_case = LoadCredentialUseCase::new(vec![MapSource::empty(), MapSource::empty()]);

        let err = use_case.execute("KEY").unwrap_err();
        assert!(err.is_missing_credential());
    }

    #[test]
    fn test_no_sources_is_an_error() {
        let use_case = LoadCredentialUseCase::new(vec![]);
        assert!(use_case.execute("KEY").is_err());
    }
}
