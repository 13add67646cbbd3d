use anyhow::{bail, Result};

use crate::application::SubmitOutcome;

use super::super::Container;
use super::chat_controller::format_error;

/// One-shot prompt: a fresh session, one submission, the reply as output.
pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, prompt: String) -> Result<String> {
        let mut session = self.container.new_session();

        match session.submit(&prompt).await {
            SubmitOutcome::Replied(turn) => Ok(turn.content().to_string()),
            SubmitOutcome::Ignored => bail!("Prompt is empty; nothing to send."),
            SubmitOutcome::Failed(e) => bail!(format_error(&e)),
        }
    }
}
