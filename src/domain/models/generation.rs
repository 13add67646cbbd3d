use serde::Serialize;

use super::Turn;

pub const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Fixed generation knobs sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GenerationParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

/// Wire body of one chat-completion call.
///
/// Built fresh from the whole conversation for each call and never stored.
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    temperature: f32,
    max_tokens: u32,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(turns: &'a [Turn], params: &'a GenerationParams) -> Self {
        Self {
            model: &params.model,
            messages: turns,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
