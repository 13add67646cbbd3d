use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::application::CredentialSource;
use crate::domain::DomainError;

/// Reads credentials from a flat TOML secrets file, e.g.
///
/// ```toml
/// DEEPINFRA_API_KEY = "..."
/// ```
///
/// A missing file is not an error: the source simply has nothing. A file that
/// exists but does not parse is reported once at load time and treated as empty.
pub struct SecretsFileCredentialSource {
    path: PathBuf,
    secrets: HashMap<String, String>,
}

impl SecretsFileCredentialSource {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let secrets = match Self::read(&path) {
            Ok(secrets) => secrets,
            Err(e) => {
                warn!("Ignoring secrets file {}: {}", path.display(), e);
                HashMap::new()
            }
        };
        Self { path, secrets }
    }

    fn read(path: &Path) -> Result<HashMap<String, String>, DomainError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&content)
            .map_err(|e| DomainError::config(format!("failed to parse secrets: {e}")))?;

        Ok(table
            .into_iter()
            .filter_map(|(key, value)| match value {
                toml::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect())
    }
}

impl CredentialSource for SecretsFileCredentialSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.secrets.get(key).cloned()
    }

    fn describe(&self) -> String {
        format!("secrets file {}", self.path.display())
    }
}
