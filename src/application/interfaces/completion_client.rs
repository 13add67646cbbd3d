use async_trait::async_trait;

use crate::domain::{CompletionError, GenerationParams, Turn};

/// Turns a conversation into one remote completion.
///
/// Implementors make exactly one outbound request per call and touch no other
/// state. The returned turn always has the `assistant` role.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        turns: &[Turn],
        params: &GenerationParams,
    ) -> Result<Turn, CompletionError>;

    /// Short label for logs (e.g. the endpoint host or "mock").
    fn name(&self) -> &str;
}
