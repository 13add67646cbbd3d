use std::io::{ErrorKind, Write};
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::application::{ChatSession, SubmitOutcome};
use crate::domain::{CompletionError, Conversation};

use super::super::Container;

const HELP: &str = "Type to continue the story. Commands: /new starts over, /history reprints the story, /quit exits.";

/// Interactive terminal chat over one [`ChatSession`].
pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run against the process's stdin and stdout.
    pub async fn chat(&self) -> Result<String> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run(stdin, &mut stdout).await
    }

    /// Read lines from `input` until `/quit` or end of input.
    ///
    /// Every submit and reset is followed by a render to `output`, so the
    /// view never lags behind the store.
    pub async fn run<R, W>(&self, input: R, output: &mut W) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut session = self.container.new_session();
        let mut lines = input.lines();

        writeln!(output, "Story Chat ({})", session.params().model())?;
        writeln!(output, "{HELP}")?;
        writeln!(output)?;

        loop {
            write!(output, "You: ")?;
            output.flush()?;

            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                // the bad line is already consumed; keep reading
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    warn!("Skipping unreadable input line: {}", e);
                    writeln!(output, "Could not read that line as UTF-8 text; please try again.")?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            match line.trim() {
                "/quit" | "/exit" => break,
                "/new" | "/reset" => {
                    session.reset();
                    writeln!(output, "--- New story ---")?;
                }
                "/history" => {
                    write!(output, "{}", render_transcript(session.conversation()))?;
                }
                "/help" => writeln!(output, "{HELP}")?,
                _ => {
                    let outcome = submit_with_spinner(&mut session, &line).await;
                    render_outcome(&outcome, output)?;
                }
            }
        }

        let turns = session.conversation().visible_turns().len();
        debug!("Chat loop finished with {} visible turns", turns);
        Ok(format!("Story ended after {turns} turns."))
    }
}

async fn submit_with_spinner(session: &mut ChatSession, text: &str) -> SubmitOutcome {
    if text.trim().is_empty() {
        return session.submit(text).await;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("writing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = session.submit(text).await;
    spinner.finish_and_clear();
    outcome
}

fn render_outcome<W: Write>(outcome: &SubmitOutcome, output: &mut W) -> std::io::Result<()> {
    match outcome {
        SubmitOutcome::Ignored => Ok(()),
        SubmitOutcome::Replied(turn) => {
            writeln!(output, "{}", turn.display_line())?;
            writeln!(output)
        }
        SubmitOutcome::Failed(e) => writeln!(output, "{}", format_error(e)),
    }
}

/// `API Error <status>` plus the raw body, or the transport failure text.
pub fn format_error(error: &CompletionError) -> String {
    match error.status_code() {
        Some(status) => format!("API Error {status}\n{}", error.body()),
        None => format!("Request failed: {}", error.body()),
    }
}

/// Every turn after the seed, one `Role: content` line each.
pub fn render_transcript(conversation: &Conversation) -> String {
    if conversation.is_empty() {
        return "(the story has not started yet)\n".to_string();
    }

    conversation
        .visible_turns()
        .iter()
        .map(|turn| format!("{}\n", turn.display_line()))
        .collect()
}
