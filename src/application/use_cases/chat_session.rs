use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::CompletionClient;
use crate::domain::{CompletionError, Conversation, GenerationParams, Turn};

/// Where a session is in its submit cycle.
///
/// `AwaitingCompletion` holds while a `submit` future is waiting on the client.
/// If that future is dropped before the reply arrives (a timeout or a cancelled
/// task), the session stays in `AwaitingCompletion` with the user turn already
/// appended; [`ChatSession::reset`] brings it back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingCompletion,
}

/// What a submission did to the session. The caller re-renders from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input: nothing appended, no request made.
    Ignored,
    /// The user turn and this assistant turn were appended.
    Replied(Turn),
    /// Only the user turn was appended; the error is for display.
    Failed(CompletionError),
}

impl SubmitOutcome {
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied(_))
    }

    pub fn error(&self) -> Option<&CompletionError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// One user's chat: the conversation store plus the submission flow around it.
///
/// Each session owns its own [`Conversation`]; only the stateless completion
/// client is shared. `submit` takes `&mut self`, so a session serves one
/// interaction at a time.
pub struct ChatSession {
    conversation: Conversation,
    client: Arc<dyn CompletionClient>,
    params: GenerationParams,
    state: SessionState,
}

impl ChatSession {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        params: GenerationParams,
        system_instruction: impl Into<String>,
    ) -> Self {
        let conversation = Conversation::new(system_instruction);
        info!(
            "Starting chat session (client: {}, model: {})",
            client.name(),
            params.model()
        );
        Self {
            conversation,
            client,
            params,
            state: SessionState::Idle,
        }
    }

    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return SubmitOutcome::Ignored;
        }

        self.conversation.append(Turn::user(text));
        self.state = SessionState::AwaitingCompletion;
        debug!(
            "Requesting completion with {} turns",
            self.conversation.len()
        );

        let result = self
            .client
            .complete(self.conversation.turns(), &self.params)
            .await;
        self.state = SessionState::Idle;

        match result {
            Ok(reply) => {
                self.conversation.append(reply.clone());
                SubmitOutcome::Replied(reply)
            }
            Err(e) => {
                warn!("Completion failed: {}", e);
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Start a new story: drop everything but the seed turn.
    pub fn reset(&mut self) {
        info!("Resetting conversation ({} turns dropped)", self.conversation.len() - 1);
        self.conversation.reset();
        self.state = SessionState::Idle;
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }
}
