mod env_credential_source;
mod http_completion_client;
mod mock_completion_client;
mod secrets_file_credential_source;

pub use env_credential_source::*;
pub use http_completion_client::*;
pub use mock_completion_client::*;
pub use secrets_file_credential_source::*;
