use chrono::{DateTime, Local};

/// Originating role of a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation, immutable once appended
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// Transcript and presets flag for one chat session.
///
/// The presets flag moves true -> false on the first accepted question and
/// never back; the transcript is append-only and its order is the display
/// order.
#[derive(Debug)]
pub struct ChatSession {
    transcript: Vec<Turn>,
    show_presets: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            show_presets: true,
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn show_presets(&self) -> bool {
        self.show_presets
    }

    /// Presets render only before anything has been asked
    pub fn presets_visible(&self) -> bool {
        self.show_presets && self.transcript.is_empty()
    }

    /// Guard and record a question. Whitespace-only input is rejected and
    /// leaves the session untouched; an accepted question hides the
    /// presets, appends the user turn and returns the text to dispatch.
    pub fn accept_question(&mut self, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        self.show_presets = false;
        let question = question.to_string();
        self.push(Role::User, question.clone());
        Some(question)
    }

    /// Append the assistant turn for the last accepted question
    pub fn record_answer(&mut self, answer: String) {
        self.push(Role::Assistant, answer);
    }

    fn push(&mut self, role: Role, content: String) {
        self.transcript.push(Turn {
            role,
            content,
            timestamp: Local::now(),
        });
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_idle_with_presets_visible() {
        let session = ChatSession::new();

        assert!(session.transcript().is_empty());
        assert!(session.show_presets());
        assert!(session.presets_visible());
    }

    #[test]
    fn whitespace_questions_are_rejected() {
        let mut session = ChatSession::new();

        assert_eq!(session.accept_question(""), None);
        assert_eq!(session.accept_question("   \t\n"), None);
        assert!(session.transcript().is_empty());
        assert!(session.presets_visible());
    }

    #[test]
    fn first_accepted_question_hides_presets_for_good() {
        let mut session = ChatSession::new();

        session.accept_question("hello").unwrap();
        assert!(!session.show_presets());

        session.record_answer("hi".to_string());

        // a rejected question later must not resurrect them
        assert_eq!(session.accept_question("  "), None);
        assert!(!session.show_presets());
        assert!(!session.presets_visible());
    }

    #[test]
    fn turns_append_in_order() {
        let mut session = ChatSession::new();

        session.accept_question("first").unwrap();
        session.record_answer("answer one".to_string());
        session.accept_question("second").unwrap();
        session.record_answer("answer two".to_string());

        let roles: Vec<Role> = session.transcript().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(session.transcript()[2].content, "second");
        assert_eq!(session.transcript()[3].content, "answer two");
    }

    #[test]
    fn accepted_questions_are_trimmed() {
        let mut session = ChatSession::new();

        let accepted = session.accept_question("  spaced out  ").unwrap();
        assert_eq!(accepted, "spaced out");
        assert_eq!(session.transcript()[0].content, "spaced out");
    }
}
