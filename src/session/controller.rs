use std::sync::Arc;
use tracing::info;

use super::state::{ChatSession, Role, Turn};
use crate::kb::QueryDispatcher;

/// Conversation controller: the single entry point both the typed-input
/// path and the preset questions go through.
///
/// Dispatcher failures are not distinguished from successes here; either
/// outcome becomes an ordinary assistant turn.
pub struct Conversation {
    session: ChatSession,
    dispatcher: Arc<QueryDispatcher>,
}

impl Conversation {
    pub fn new(dispatcher: Arc<QueryDispatcher>) -> Self {
        Self {
            session: ChatSession::new(),
            dispatcher,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn transcript(&self) -> &[Turn] {
        self.session.transcript()
    }

    /// Submit one question. Returns false when the guard rejected it.
    pub async fn submit(&mut self, question: &str) -> bool {
        let Some(question) = self.session.accept_question(question) else {
            return false;
        };
        info!("User asked: {}", question);

        let answer = self
            .dispatcher
            .dispatch(&question)
            .await
            .unwrap_or_else(|e| e.to_string());
        self.session.record_answer(answer);
        true
    }

    /// Content of the most recent assistant turn, if any
    pub fn last_answer(&self) -> Option<&str> {
        self.session
            .transcript()
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.as_str())
    }
}
