use thiserror::Error;

/// Dispatch failures, rendered verbatim as chat answers.
///
/// Neither kind ends the session; the controller appends the display string
/// as an ordinary assistant turn and keeps accepting input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// An identifier was empty; the backend is never called in this case.
    #[error("Error: Missing KB_ID or MODEL_ARN. Please check your .env file.")]
    MissingConfig,

    /// The retrieve-and-generate call failed; carries the backend message.
    #[error("Error querying KB: {0}")]
    Service(String),
}
