//! Simulated background work
//!
//! Every asynchronous behavior in the workbench is a fixed-duration timer:
//! reply generation, case-brief page loads, sign-in, and playground runs.
//! The `ResponderService` owns the sending half of one unbounded channel;
//! the chat loop drains the receiving half every tick. Events carry the
//! request id they were spawned with so the app can drop stale ones after
//! a cancel or a newer request.

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use tracing::debug;

use crate::core::account::{self, UserProfile};
use crate::core::library::{self, CaseBrief};
use crate::core::workspace::ReplyTarget;

/// Task-breakdown stages surfaced while a reply is pending.
pub const REPLY_STAGES: &[(&str, &str)] = &[
    ("Analyzing Input", "Processing user query and context"),
    ("Retrieving Information", "Searching relevant legal databases"),
    ("Formulating Response", "Synthesizing data into coherent answer"),
];

/// Milliseconds after spawn at which each stage becomes active.
pub const STAGE_DELAYS_MS: &[u64] = &[0, 300, 700];

pub const REPLY_DELAY_MS: u64 = 1500;
pub const BRIEF_PAGE_DELAY_MS: u64 = 1000;
pub const SIGN_IN_DELAY_MS: u64 = 1000;
pub const PLAYGROUND_RUN_DELAY_MS: u64 = 2000;

#[derive(Clone, Debug)]
pub enum ResponderEvent {
    /// A task-breakdown stage became active.
    Stage(usize),
    Reply {
        conversation_id: u64,
        content: String,
    },
    ReplyDone,
    BriefPage {
        start: usize,
        items: Vec<&'static CaseBrief>,
        has_more: bool,
    },
    SignedIn(UserProfile),
    RunComplete {
        conversation_id: u64,
    },
}

pub struct ReplyParams {
    pub targets: Vec<ReplyTarget>,
    pub cancel_token: tokio_util::sync::CancellationToken,
    pub request_id: u64,
}

pub struct BriefPageParams {
    pub term: String,
    pub start: usize,
    pub request_id: u64,
}

pub fn simulated_reply(model: &str) -> String {
    format!("This is a simulated AI response for {model}.")
}

#[derive(Clone)]
pub struct ResponderService {
    tx: mpsc::UnboundedSender<(ResponderEvent, u64)>,
}

impl ResponderService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(ResponderEvent, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Stage events at their fixed offsets, then one reply per snapshot
    /// entry, then the terminator. A cancelled request emits nothing more.
    pub fn spawn_reply(&self, params: ReplyParams) {
        let tx = self.tx.clone();
        let ReplyParams {
            targets,
            cancel_token,
            request_id,
        } = params;
        debug!(request_id, panes = targets.len(), "spawning simulated reply");
        tokio::spawn(async move {
            tokio::select! {
                _ = async {
                    let mut elapsed = 0u64;
                    for (stage, at) in STAGE_DELAYS_MS.iter().enumerate() {
                        sleep(Duration::from_millis(at - elapsed)).await;
                        elapsed = *at;
                        let _ = tx.send((ResponderEvent::Stage(stage), request_id));
                    }
                    sleep(Duration::from_millis(REPLY_DELAY_MS - elapsed)).await;
                    for target in &targets {
                        let _ = tx.send((
                            ResponderEvent::Reply {
                                conversation_id: target.conversation_id,
                                content: simulated_reply(&target.model),
                            },
                            request_id,
                        ));
                    }
                    let _ = tx.send((ResponderEvent::ReplyDone, request_id));
                    debug!(request_id, "simulated reply delivered");
                } => {}
                _ = cancel_token.cancelled() => {
                    debug!(request_id, "simulated reply cancelled");
                }
            }
        });
    }

    /// One page of the filtered library after the loader delay.
    pub fn spawn_brief_page(&self, params: BriefPageParams) {
        let tx = self.tx.clone();
        let BriefPageParams {
            term,
            start,
            request_id,
        } = params;
        tokio::spawn(async move {
            sleep(Duration::from_millis(BRIEF_PAGE_DELAY_MS)).await;
            let filtered = library::filter(&term);
            let (items, has_more) = library::page(&filtered, start);
            let _ = tx.send((
                ResponderEvent::BriefPage {
                    start,
                    items,
                    has_more,
                },
                request_id,
            ));
        });
    }

    /// Resolve the fixture profile after the sign-in delay.
    pub fn spawn_sign_in(&self, request_id: u64) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(SIGN_IN_DELAY_MS)).await;
            let _ = tx.send((
                ResponderEvent::SignedIn(account::fixture_profile()),
                request_id,
            ));
        });
    }

    pub fn spawn_playground_run(&self, conversation_id: u64, request_id: u64) {
        let tx = self.tx.clone();
        debug!(request_id, conversation_id, "spawning playground run");
        tokio::spawn(async move {
            sleep(Duration::from_millis(PLAYGROUND_RUN_DELAY_MS)).await;
            let _ = tx.send((ResponderEvent::RunComplete { conversation_id }, request_id));
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, event: ResponderEvent, request_id: u64) {
        let _ = self.tx.send((event, request_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(
        rx: &mut mpsc::UnboundedReceiver<(ResponderEvent, u64)>,
    ) -> Vec<(ResponderEvent, u64)> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn reply_emits_stages_then_replies_then_done() {
        let (service, mut rx) = ResponderService::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        service.spawn_reply(ReplyParams {
            targets: vec![
                ReplyTarget {
                    conversation_id: 1,
                    model: "GPT-4o".into(),
                },
                ReplyTarget {
                    conversation_id: 2,
                    model: "Opus 3".into(),
                },
            ],
            cancel_token: cancel,
            request_id: 7,
        });

        tokio::time::sleep(Duration::from_millis(REPLY_DELAY_MS + 50)).await;
        let events = drain(&mut rx);
        assert_eq!(events.len(), STAGE_DELAYS_MS.len() + 3);
        for (expected, event) in events.iter().take(STAGE_DELAYS_MS.len()).enumerate() {
            match event {
                (ResponderEvent::Stage(stage), 7) => assert_eq!(*stage, expected),
                other => panic!("expected stage event, got {other:?}"),
            }
        }
        match &events[STAGE_DELAYS_MS.len()] {
            (
                ResponderEvent::Reply {
                    conversation_id,
                    content,
                },
                7,
            ) => {
                assert_eq!(*conversation_id, 1);
                assert_eq!(content, "This is a simulated AI response for GPT-4o.");
            }
            other => panic!("expected reply event, got {other:?}"),
        }
        assert!(matches!(
            events.last(),
            Some((ResponderEvent::ReplyDone, 7))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_reply_stops_emitting() {
        let (service, mut rx) = ResponderService::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        service.spawn_reply(ReplyParams {
            targets: vec![ReplyTarget {
                conversation_id: 1,
                model: "GPT-4o".into(),
            }],
            cancel_token: cancel.clone(),
            request_id: 3,
        });

        tokio::time::sleep(Duration::from_millis(400)).await;
        cancel.cancel();
        tokio::time::sleep(Duration::from_millis(REPLY_DELAY_MS)).await;

        let events = drain(&mut rx);
        assert!(events
            .iter()
            .all(|(event, _)| matches!(event, ResponderEvent::Stage(_))));
        assert!(!events.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn brief_page_respects_filter_and_start() {
        let (service, mut rx) = ResponderService::new();
        service.spawn_brief_page(BriefPageParams {
            term: String::new(),
            start: 3,
            request_id: 11,
        });

        tokio::time::sleep(Duration::from_millis(BRIEF_PAGE_DELAY_MS + 10)).await;
        let events = drain(&mut rx);
        match &events[..] {
            [(
                ResponderEvent::BriefPage {
                    start,
                    items,
                    has_more,
                },
                11,
            )] => {
                assert_eq!(*start, 3);
                assert_eq!(items.len(), 2);
                assert!(!has_more);
            }
            other => panic!("expected one brief page, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sign_in_resolves_the_fixture_profile() {
        let (service, mut rx) = ResponderService::new();
        service.spawn_sign_in(1);
        tokio::time::sleep(Duration::from_millis(SIGN_IN_DELAY_MS + 10)).await;
        match drain(&mut rx).as_slice() {
            [(ResponderEvent::SignedIn(profile), 1)] => {
                assert_eq!(profile.email, "john.doe@example.com");
            }
            other => panic!("expected sign-in event, got {other:?}"),
        }
    }

    #[test]
    fn stage_labels_and_delays_line_up() {
        assert_eq!(REPLY_STAGES.len(), STAGE_DELAYS_MS.len());
        assert!(STAGE_DELAYS_MS.windows(2).all(|w| w[0] < w[1]));
        assert!(*STAGE_DELAYS_MS.last().unwrap() < REPLY_DELAY_MS);
    }
}
