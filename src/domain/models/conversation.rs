use super::Turn;

/// System instruction every new story starts from.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a talented fiction writer";

/// Ordered, append-only list of turns for one session.
///
/// Index 0 always holds the seed `system` turn. It is set once in [`Conversation::new`]
/// and survives every operation; [`Conversation::reset`] truncates back to it.
/// There is no length bound, so the request payload grows with the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_instruction)],
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn reset(&mut self) {
        self.turns.truncate(1);
    }

    pub fn seed(&self) -> &Turn {
        &self.turns[0]
    }

    /// Full history, seed included, in the order it is sent to the model.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Everything after the seed turn; this is what the view renders.
    pub fn visible_turns(&self) -> &[Turn] {
        &self.turns[1..]
    }

    pub fn last(&self) -> &Turn {
        // never empty: the seed is always present
        &self.turns[self.turns.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when nothing has been said beyond the seed instruction.
    pub fn is_empty(&self) -> bool {
        self.turns.len() == 1
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}
