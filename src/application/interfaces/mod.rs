mod completion_client;
mod credential_source;

pub use completion_client::*;
pub use credential_source::*;
