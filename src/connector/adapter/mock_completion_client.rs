use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{CompletionError, GenerationParams, Role, Turn};

/// In-process [`CompletionClient`] that answers from a script.
///
/// Scripted replies and errors are consumed in order. Once the script runs out
/// the client echoes the latest user turn, which keeps `--mock` sessions usable
/// without a network. Every request is recorded for inspection.
pub struct MockCompletionClient {
    script: Mutex<VecDeque<Result<String, CompletionError>>>,
    requests: Mutex<Vec<Vec<Turn>>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.push(Ok(reply.into()))
    }

    pub fn with_error(self, error: CompletionError) -> Self {
        self.push(Err(error))
    }

    fn push(mut self, entry: Result<String, CompletionError>) -> Self {
        self.script.get_mut().push_back(entry);
        self
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Turn lists received so far, one entry per call.
    pub async fn requests(&self) -> Vec<Vec<Turn>> {
        self.requests.lock().await.clone()
    }

    fn echo(turns: &[Turn]) -> String {
        let prompt = turns
            .iter()
            .rev()
            .find(|t| t.role() == Role::User)
            .map(|t| t.content())
            .unwrap_or_default();
        format!("(mock) And so the story continued: {prompt}")
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        turns: &[Turn],
        params: &GenerationParams,
    ) -> Result<Turn, CompletionError> {
        debug!(
            "MockCompletionClient: {} turns for model {}",
            turns.len(),
            params.model()
        );
        self.requests.lock().await.push(turns.to_vec());

        match self.script.lock().await.pop_front() {
            Some(Ok(reply)) => Ok(Turn::assistant(reply)),
            Some(Err(e)) => Err(e),
            None => Ok(Turn::assistant(Self::echo(turns))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
