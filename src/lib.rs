pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatSession, CompletionClient, CredentialSource, LoadCredentialUseCase, SessionState,
    SubmitOutcome,
};

pub use cli::Commands;

pub use connector::{
    Container, ContainerConfig, EnvCredentialSource, HttpCompletionClient, MockCompletionClient,
    Router, SecretsFileCredentialSource,
};

pub use domain::{
    ApiKey, CompletionError, Conversation, DomainError, GenerationParams, GenerationRequest, Role,
    Turn,
};
