pub mod app;
pub mod cli;
pub mod constants;
pub mod kb;
pub mod session;
pub mod tui;
pub mod utils;

pub use app::{load_config, Config};
pub use kb::{BedrockKbClient, QueryDispatcher, RetrieveAndGenerate};
pub use session::{ChatSession, Conversation};
pub use tui::run_ui;
pub use utils::QueryError;
