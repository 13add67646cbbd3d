mod chat_session;
mod load_credential;

pub use chat_session::*;
pub use load_credential::*;
