use serde::{Deserialize, Serialize};

use crate::core::message::{Message, Role};

pub const DEFAULT_TEMPERATURE: f64 = 0.5;
pub const TEMPERATURE_STEP: f64 = 0.1;

/// Per-conversation sampling parameters. Temperature is the only parameter
/// the original interface exposed; it stays in a bag so panes can grow more
/// knobs without touching the workspace API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub temperature: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// One conversation pane: a provider/model pair with its transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: u64,
    pub provider: String,
    pub model: String,
    pub messages: Vec<Message>,
    pub parameters: Parameters,
}

impl Conversation {
    pub fn new(id: u64, provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id,
            provider: provider.into(),
            model: model.into(),
            messages: Vec::new(),
            parameters: Parameters::default(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Index of the most recent AI message, if any.
    pub fn last_ai_index(&self) -> Option<usize> {
        self.messages.iter().rposition(|m| m.role == Role::Ai)
    }

    /// Clamp to [0, 1] and snap to tenths, the slider step.
    pub fn set_temperature(&mut self, value: f64) {
        let clamped = value.clamp(0.0, 1.0);
        self.parameters.temperature = (clamped * 10.0).round() / 10.0;
    }

    /// Transcript contents joined for the playground buffer.
    pub fn joined_contents(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_is_clamped() {
        let mut conv = Conversation::new(1, "OpenAI", "GPT-4o");
        conv.set_temperature(1.4);
        assert_eq!(conv.parameters.temperature, 1.0);
        conv.set_temperature(-0.2);
        assert_eq!(conv.parameters.temperature, 0.0);
        conv.set_temperature(0.7);
        assert_eq!(conv.parameters.temperature, 0.7);
        conv.set_temperature(0.34);
        assert_eq!(conv.parameters.temperature, 0.3);
    }

    #[test]
    fn last_ai_index_skips_trailing_user_messages() {
        let mut conv = Conversation::new(1, "OpenAI", "GPT-4o");
        assert_eq!(conv.last_ai_index(), None);
        conv.push(Message::user("q1"));
        conv.push(Message::ai("a1"));
        conv.push(Message::user("q2"));
        assert_eq!(conv.last_ai_index(), Some(1));
    }

    #[test]
    fn joined_contents_separates_messages_with_blank_lines() {
        let mut conv = Conversation::new(1, "OpenAI", "GPT-4o");
        conv.push(Message::user("one"));
        conv.push(Message::ai("two"));
        assert_eq!(conv.joined_contents(), "one\n\ntwo");
    }
}
