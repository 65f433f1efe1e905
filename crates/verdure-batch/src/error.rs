use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    /// The control surface itself failed (journal unreadable, pointer move
    /// rejected). Recorded as a whole-day skip, never a run abort.
    #[error("control surface error: {0}")]
    Control(String),

    /// A single analysis operation failed. Recorded in the run report and
    /// the sequence continues.
    #[error("operation failed: {0}")]
    Operation(String),
}
