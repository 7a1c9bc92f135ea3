//! Multi-conversation workspace state
//!
//! The workspace owns the ordered pane collection, the main-conversation
//! pointer, and the per-model tally shown in the composer. All mutation of
//! conversation state flows through here.

use std::collections::HashMap;

use crate::core::conversation::Conversation;
use crate::core::library::{self, CaseBrief};
use crate::core::message::Message;
use crate::core::providers::CASE_BRIEF_PROVIDER;

/// Snapshot entry handed to the responder when a prompt is sent. Replies
/// are addressed by id so panes closed mid-flight are simply skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub conversation_id: u64,
    pub model: String,
}

#[derive(Default)]
pub struct Workspace {
    conversations: Vec<Conversation>,
    main_conversation_id: Option<u64>,
    selected_models: HashMap<String, usize>,
    next_id: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn main_conversation_id(&self) -> Option<u64> {
        self.main_conversation_id
    }

    pub fn get(&self, id: u64) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    pub fn main_conversation(&self) -> Option<&Conversation> {
        self.main_conversation_id.and_then(|id| self.get(id))
    }

    pub fn main_conversation_mut(&mut self) -> Option<&mut Conversation> {
        let id = self.main_conversation_id?;
        self.get_mut(id)
    }

    /// Pane tally per model name, e.g. `GPT-4o ×2`.
    pub fn selected_models(&self) -> &HashMap<String, usize> {
        &self.selected_models
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Open a new pane for a provider/model pair. The first pane ever
    /// opened becomes the main conversation.
    pub fn add_conversation(&mut self, provider: &str, model: &str) -> u64 {
        let id = self.allocate_id();
        self.conversations
            .push(Conversation::new(id, provider, model));
        *self.selected_models.entry(model.to_string()).or_insert(0) += 1;
        if self.main_conversation_id.is_none() {
            self.main_conversation_id = Some(id);
        }
        id
    }

    /// Close a pane. The model tally drops its entry at zero, and a closed
    /// main pane hands the pointer to the first surviving conversation.
    pub fn close_conversation(&mut self, id: u64) -> bool {
        let Some(index) = self.conversations.iter().position(|c| c.id == id) else {
            return false;
        };
        let removed = self.conversations.remove(index);

        if let Some(count) = self.selected_models.get_mut(&removed.model) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.selected_models.remove(&removed.model);
            }
        }

        if self.main_conversation_id == Some(id) {
            self.main_conversation_id = self.conversations.first().map(|c| c.id);
        }
        true
    }

    pub fn set_main(&mut self, id: u64) -> bool {
        if self.get(id).is_some() {
            self.main_conversation_id = Some(id);
            true
        } else {
            false
        }
    }

    /// Append the prompt to every open pane and return the reply snapshot.
    /// Empty and whitespace-only prompts are rejected.
    pub fn send(&mut self, text: &str) -> Option<Vec<ReplyTarget>> {
        if text.trim().is_empty() {
            return None;
        }
        let mut targets = Vec::with_capacity(self.conversations.len());
        for conv in &mut self.conversations {
            conv.push(Message::user(text));
            targets.push(ReplyTarget {
                conversation_id: conv.id,
                model: conv.model.clone(),
            });
        }
        Some(targets)
    }

    /// Deliver a simulated reply. Misses (pane closed mid-flight) are
    /// ignored.
    pub fn apply_reply(&mut self, conversation_id: u64, content: String) {
        if let Some(conv) = self.get_mut(conversation_id) {
            conv.push(Message::ai(content));
        }
    }

    pub fn set_temperature(&mut self, id: u64, value: f64) -> bool {
        match self.get_mut(id) {
            Some(conv) => {
                conv.set_temperature(value);
                true
            }
            None => false,
        }
    }

    /// Rewrite the main conversation's last AI message with a complexity
    /// note. Returns false when there is nothing to adjust.
    pub fn adjust_complexity(&mut self, delta: i32) -> bool {
        let Some(conv) = self.main_conversation_mut() else {
            return false;
        };
        let Some(index) = conv.last_ai_index() else {
            return false;
        };
        let message = &mut conv.messages[index];
        message.content = format!("{} (Complexity adjusted by {delta})", message.content);
        true
    }

    /// Promote a case brief onto the workspace as its own pane. The pane is
    /// seeded with the fixed three-message transcript and becomes main.
    pub fn open_case_brief(&mut self, brief: &CaseBrief) -> u64 {
        let id = self.add_conversation(CASE_BRIEF_PROVIDER, &brief.name);
        let body = library::sections_as_text(library::reference_sections());
        if let Some(conv) = self.get_mut(id) {
            conv.push(Message::system("Displaying case brief."));
            conv.push(Message::user("Show me the case brief."));
            conv.push(Message::ai(body));
        }
        self.main_conversation_id = Some(id);
        id
    }

    /// Drop all messages from a pane, keeping the pane itself.
    pub fn clear_messages(&mut self, id: u64) -> bool {
        match self.get_mut(id) {
            Some(conv) => {
                conv.messages.clear();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;

    fn workspace_with_two_panes() -> (Workspace, u64, u64) {
        let mut ws = Workspace::new();
        let a = ws.add_conversation("OpenAI", "GPT-4o");
        let b = ws.add_conversation("Anthropic", "Opus 3");
        (ws, a, b)
    }

    #[test]
    fn first_pane_becomes_main() {
        let (ws, a, _) = workspace_with_two_panes();
        assert_eq!(ws.main_conversation_id(), Some(a));
    }

    #[test]
    fn ids_are_unique_and_monotonic() {
        let (mut ws, a, b) = workspace_with_two_panes();
        let c = ws.add_conversation("OpenAI", "GPT-4o");
        assert!(a < b && b < c);
    }

    #[test]
    fn model_tally_tracks_open_panes() {
        let (mut ws, a, _) = workspace_with_two_panes();
        ws.add_conversation("OpenAI", "GPT-4o");
        assert_eq!(ws.selected_models().get("GPT-4o"), Some(&2));
        assert_eq!(ws.selected_models().get("Opus 3"), Some(&1));

        ws.close_conversation(a);
        assert_eq!(ws.selected_models().get("GPT-4o"), Some(&1));
    }

    #[test]
    fn tally_entry_is_dropped_at_zero() {
        let (mut ws, _, b) = workspace_with_two_panes();
        ws.close_conversation(b);
        assert!(!ws.selected_models().contains_key("Opus 3"));
    }

    #[test]
    fn closing_main_promotes_first_survivor() {
        let (mut ws, a, b) = workspace_with_two_panes();
        assert!(ws.close_conversation(a));
        assert_eq!(ws.main_conversation_id(), Some(b));
    }

    #[test]
    fn closing_last_pane_clears_main() {
        let mut ws = Workspace::new();
        let a = ws.add_conversation("OpenAI", "GPT-4o");
        ws.close_conversation(a);
        assert_eq!(ws.main_conversation_id(), None);
        assert!(ws.is_empty());
    }

    #[test]
    fn closing_non_main_keeps_pointer() {
        let (mut ws, a, b) = workspace_with_two_panes();
        ws.close_conversation(b);
        assert_eq!(ws.main_conversation_id(), Some(a));
    }

    #[test]
    fn close_preserves_order_of_survivors() {
        let mut ws = Workspace::new();
        let _a = ws.add_conversation("OpenAI", "GPT-4o");
        let b = ws.add_conversation("OpenAI", "o1-mini");
        let _c = ws.add_conversation("Anthropic", "Opus 3");
        ws.close_conversation(b);
        let models: Vec<&str> = ws.conversations().iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["GPT-4o", "Opus 3"]);
    }

    #[test]
    fn send_rejects_blank_input() {
        let (mut ws, _, _) = workspace_with_two_panes();
        assert!(ws.send("").is_none());
        assert!(ws.send("   \n").is_none());
        assert!(ws.conversations().iter().all(|c| c.messages.is_empty()));
    }

    #[test]
    fn send_fans_out_to_every_pane() {
        let (mut ws, a, b) = workspace_with_two_panes();
        let targets = ws.send("What is consideration?").expect("non-empty send");
        assert_eq!(
            targets,
            vec![
                ReplyTarget {
                    conversation_id: a,
                    model: "GPT-4o".into()
                },
                ReplyTarget {
                    conversation_id: b,
                    model: "Opus 3".into()
                },
            ]
        );
        for conv in ws.conversations() {
            assert_eq!(conv.messages.len(), 1);
            assert_eq!(conv.messages[0].role, Role::User);
        }
    }

    #[test]
    fn reply_to_closed_pane_is_ignored() {
        let (mut ws, a, b) = workspace_with_two_panes();
        ws.send("hello");
        ws.close_conversation(b);
        ws.apply_reply(b, "late reply".into());
        ws.apply_reply(a, "on time".into());
        assert_eq!(ws.get(a).unwrap().messages.len(), 2);
        assert!(ws.get(b).is_none());
    }

    #[test]
    fn temperature_change_hits_only_the_target() {
        let (mut ws, a, b) = workspace_with_two_panes();
        assert!(ws.set_temperature(b, 0.9));
        assert_eq!(ws.get(a).unwrap().parameters.temperature, 0.5);
        assert_eq!(ws.get(b).unwrap().parameters.temperature, 0.9);
        assert!(!ws.set_temperature(999, 0.1));
    }

    #[test]
    fn complexity_adjustment_rewrites_last_ai_message() {
        let (mut ws, a, _) = workspace_with_two_panes();
        ws.send("q");
        ws.apply_reply(a, "This is a simulated AI response for GPT-4o.".into());
        assert!(ws.adjust_complexity(2));
        let conv = ws.get(a).unwrap();
        assert_eq!(
            conv.messages.last().unwrap().content,
            "This is a simulated AI response for GPT-4o. (Complexity adjusted by 2)"
        );
    }

    #[test]
    fn complexity_adjustment_without_ai_message_is_a_noop() {
        let (mut ws, _, _) = workspace_with_two_panes();
        ws.send("q");
        assert!(!ws.adjust_complexity(1));

        let mut empty = Workspace::new();
        assert!(!empty.adjust_complexity(1));
    }

    #[test]
    fn case_brief_pane_has_the_fixed_transcript_and_is_main() {
        let (mut ws, _, _) = workspace_with_two_panes();
        let brief = crate::core::library::find_brief("3").unwrap();
        let id = ws.open_case_brief(brief);

        assert_eq!(ws.main_conversation_id(), Some(id));
        let conv = ws.get(id).unwrap();
        assert_eq!(conv.provider, CASE_BRIEF_PROVIDER);
        assert_eq!(conv.model, "Brown v. Board of Education");
        assert_eq!(conv.messages.len(), 3);
        assert_eq!(conv.messages[0].role, Role::System);
        assert_eq!(conv.messages[0].content, "Displaying case brief.");
        assert_eq!(conv.messages[1].role, Role::User);
        assert_eq!(conv.messages[1].content, "Show me the case brief.");
        assert_eq!(conv.messages[2].role, Role::Ai);
        assert!(conv.messages[2].content.starts_with("Rule\n"));
        assert!(conv.messages[2].content.contains("Test Applied"));
    }

    #[test]
    fn clear_messages_keeps_the_pane() {
        let (mut ws, a, _) = workspace_with_two_panes();
        ws.send("q");
        assert!(ws.clear_messages(a));
        assert!(ws.get(a).unwrap().messages.is_empty());
        assert_eq!(ws.conversations().len(), 2);
    }
}
