mod api_key;
mod conversation;
mod generation;
mod turn;

pub use api_key::*;
pub use conversation::*;
pub use generation::*;
pub use turn::*;
