use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ChatSession, CompletionClient, CredentialSource, LoadCredentialUseCase};
use crate::connector::adapter::{
    EnvCredentialSource, HttpCompletionClient, MockCompletionClient, SecretsFileCredentialSource,
    DEFAULT_ENDPOINT, ENDPOINT_ENV,
};
use crate::domain::{
    DomainError, GenerationParams, API_KEY_NAME, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
};

pub const MODEL_ENV: &str = "STORYCHAT_MODEL";
pub const DEFAULT_SECRETS_FILE: &str = "~/.storychat/secrets.toml";

pub struct ContainerConfig {
    /// Answer from the in-process mock client instead of the network.
    pub mock_completions: bool,
    /// Overrides `STORYCHAT_ENDPOINT` and the built-in endpoint.
    pub endpoint: Option<String>,
    /// Overrides `STORYCHAT_MODEL` and the built-in model id.
    pub model: Option<String>,
    /// TOML file consulted before the environment for the API key.
    pub secrets_file: String,
    /// Replaces the default seed instruction for new sessions.
    pub system_prompt: Option<String>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            mock_completions: false,
            endpoint: None,
            model: None,
            secrets_file: DEFAULT_SECRETS_FILE.to_string(),
            system_prompt: None,
        }
    }
}

impl ContainerConfig {
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .or_else(|| std::env::var(MODEL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn secrets_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.secrets_file))
    }
}

/// Wires the credential, completion client and generation parameters together,
/// and hands out one fresh [`ChatSession`] per session.
pub struct Container {
    client: Arc<dyn CompletionClient>,
    params: GenerationParams,
    system_prompt: String,
}

impl Container {
    /// Resolve the API key from the secrets file, then the environment.
    ///
    /// Fails with [`DomainError::MissingCredential`] before any client exists
    /// when neither has a usable key.
    pub fn new(config: ContainerConfig) -> Result<Self, DomainError> {
        let sources: Vec<Arc<dyn CredentialSource>> = vec![
            Arc::new(SecretsFileCredentialSource::load(config.secrets_path())),
            Arc::new(EnvCredentialSource::new()),
        ];
        Self::with_sources(config, sources)
    }

    pub fn with_sources(
        config: ContainerConfig,
        sources: Vec<Arc<dyn CredentialSource>>,
    ) -> Result<Self, DomainError> {
        let api_key = LoadCredentialUseCase::new(sources).execute(API_KEY_NAME)?;

        let client: Arc<dyn CompletionClient> = if config.mock_completions {
            debug!("Using mock completion client");
            Arc::new(MockCompletionClient::new())
        } else {
            let endpoint = config.resolved_endpoint();
            debug!("Using completion endpoint {}", endpoint);
            Arc::new(HttpCompletionClient::new(api_key, endpoint))
        };

        Ok(Self::with_client(client, &config))
    }

    /// Build around an already constructed client.
    pub fn with_client(client: Arc<dyn CompletionClient>, config: &ContainerConfig) -> Self {
        let params = GenerationParams::new(config.resolved_model());
        let system_prompt = config
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        info!("Model: {}", params.model());

        Self {
            client,
            params,
            system_prompt,
        }
    }

    pub fn new_session(&self) -> ChatSession {
        ChatSession::new(
            self.client.clone(),
            self.params.clone(),
            self.system_prompt.clone(),
        )
    }

    pub fn client_name(&self) -> &str {
        self.client.name()
    }
}

pub fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
