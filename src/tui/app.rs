use std::sync::Arc;

use crate::app::Config;
use crate::constants::{PRESET_QUESTIONS, UI_DEFAULT_VIEWPORT_HEIGHT};
use crate::kb::QueryDispatcher;
use crate::session::ChatSession;

/// Terminal application state
pub struct App {
    /// Conversation transcript and presets flag
    pub session: ChatSession,
    /// Dispatcher shared with the in-flight query task
    pub dispatcher: Arc<QueryDispatcher>,
    /// User input buffer
    pub input: String,
    /// Is the app running?
    pub running: bool,
    /// Is a dispatch in flight?
    pub is_querying: bool,
    /// Scroll offset for the chat view, counted up from the bottom
    pub scroll_offset: u16,
    /// Show the debug sidebar
    pub show_sidebar: bool,
    /// Highlighted preset question
    pub selected_preset: usize,
    /// Status line message
    pub status_message: Option<String>,
    /// Loaded configuration, shown in the sidebar
    pub config: Config,
}

impl App {
    pub fn new(config: Config, dispatcher: Arc<QueryDispatcher>) -> Self {
        let show_sidebar = config.ui.show_sidebar;
        Self {
            session: ChatSession::new(),
            dispatcher,
            input: String::new(),
            running: true,
            is_querying: false,
            scroll_offset: 0,
            show_sidebar,
            selected_preset: 0,
            status_message: None,
            config,
        }
    }

    /// Accept the typed input for dispatch. Returns the question to send,
    /// or None when the guard rejected it or a query is already in flight.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.is_querying {
            return None;
        }
        let input = self.input.clone();
        let question = self.session.accept_question(&input)?;
        self.input.clear();
        self.status_message = None;
        self.is_querying = true;
        self.scroll_offset = 0;
        Some(question)
    }

    /// Accept the highlighted preset question for dispatch. Presets stop
    /// submitting once they are hidden.
    pub fn begin_submit_preset(&mut self) -> Option<String> {
        if self.is_querying || !self.session.presets_visible() {
            return None;
        }
        let question = self.session.accept_question(PRESET_QUESTIONS[self.selected_preset])?;
        self.status_message = None;
        self.is_querying = true;
        Some(question)
    }

    /// Record the answer (or error text) for the in-flight query
    pub fn finish_submit(&mut self, answer: String) {
        self.session.record_answer(answer);
        self.is_querying = false;
        self.scroll_offset = 0;
    }

    pub fn select_next_preset(&mut self) {
        self.selected_preset = (self.selected_preset + 1) % PRESET_QUESTIONS.len();
    }

    pub fn select_prev_preset(&mut self) {
        self.selected_preset =
            (self.selected_preset + PRESET_QUESTIONS.len() - 1) % PRESET_QUESTIONS.len();
    }

    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Scroll the chat view up, clamped to a line-count estimate
    pub fn scroll_up(&mut self, amount: u16) {
        let mut total_lines = 0u16;
        for turn in self.session.transcript() {
            total_lines += 1; // role line
            total_lines += turn.content.lines().count() as u16;
            total_lines += 1; // spacer
        }
        if self.is_querying {
            total_lines += 1;
        }

        let max_scroll = total_lines.saturating_sub(UI_DEFAULT_VIEWPORT_HEIGHT);
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max_scroll);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::MockRetrieveAndGenerate;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        let config = Config {
            kb_id: "KB123".to_string(),
            model_arn: "arn:model".to_string(),
            ..Config::default()
        };
        let dispatcher = Arc::new(QueryDispatcher::new(
            Arc::new(MockRetrieveAndGenerate::new()),
            &config,
        ));
        App::new(config, dispatcher)
    }

    #[test]
    fn input_is_ignored_while_a_query_is_in_flight() {
        let mut app = app();

        app.input = "first".to_string();
        assert!(app.begin_submit().is_some());

        app.input = "second".to_string();
        assert!(app.begin_submit().is_none());
        assert_eq!(app.session.transcript().len(), 1);
        assert_eq!(app.input, "second");
    }

    #[test]
    fn presets_stop_submitting_once_hidden() {
        let mut app = app();

        assert!(app.begin_submit_preset().is_some());
        app.finish_submit("ok".to_string());

        assert!(app.begin_submit_preset().is_none());
        assert_eq!(app.session.transcript().len(), 2);
    }

    #[test]
    fn preset_selection_wraps_around() {
        let mut app = app();

        app.select_prev_preset();
        assert_eq!(app.selected_preset, 3);
        app.select_next_preset();
        assert_eq!(app.selected_preset, 0);
    }
}
