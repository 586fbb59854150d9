// Gateway module for session - external access goes through these re-exports

mod controller;
mod state;

pub use controller::Conversation;
pub use state::{ChatSession, Role, Turn};
