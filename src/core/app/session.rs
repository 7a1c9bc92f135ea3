use tokio_util::sync::CancellationToken;

use crate::core::account::UserProfile;
use crate::utils::logging::LoggingState;

/// Session-scoped state: the composer's provider/model selection, the
/// signed-in user (once the stub resolves), transcript logging, and the
/// request-id bookkeeping that lets the event loop drop stale responder
/// events.
pub struct SessionContext {
    pub provider: String,
    pub model: String,
    pub user: Option<UserProfile>,
    pub logging: LoggingState,
    pub reply_cancel_token: Option<CancellationToken>,
    pub current_reply_id: u64,
    pub current_search_id: u64,
    pub current_run_id: u64,
    pub current_sign_in_id: u64,
    next_request_id: u64,
}

impl SessionContext {
    pub fn new(provider: String, model: String, logging: LoggingState) -> Self {
        Self {
            provider,
            model,
            user: None,
            logging,
            reply_cancel_token: None,
            current_reply_id: 0,
            current_search_id: 0,
            current_run_id: 0,
            current_sign_in_id: 0,
            next_request_id: 0,
        }
    }

    pub fn next_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    /// Name used for the user's transcript lines: first name once signed
    /// in, a neutral "You" before that.
    pub fn user_display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.first_name.as_str())
            .unwrap_or("You")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::account;

    #[test]
    fn request_ids_are_monotonic() {
        let mut session =
            SessionContext::new("OpenAI".into(), "GPT-4o".into(), LoggingState::new(None));
        let a = session.next_request_id();
        let b = session.next_request_id();
        assert!(b > a);
    }

    #[test]
    fn display_name_switches_after_sign_in() {
        let mut session =
            SessionContext::new("OpenAI".into(), "GPT-4o".into(), LoggingState::new(None));
        assert_eq!(session.user_display_name(), "You");
        session.user = Some(account::fixture_profile());
        assert_eq!(session.user_display_name(), "John");
    }
}
