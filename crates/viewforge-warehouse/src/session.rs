//! Warehouse session trait

use async_trait::async_trait;

/// Errors raised by a warehouse session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no open warehouse session")]
    NotConnected,

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("statement failed: {message} (statement: {statement})")]
    Execution { statement: String, message: String },

    #[error(transparent)]
    Validation(#[from] viewforge_sql::ValidationError),
}

/// One warehouse connection, owned for the duration of a run.
///
/// All operations take `&mut self`; the session is never shared across
/// threads.
#[async_trait]
pub trait WarehouseSession: Send {
    /// Execute one statement, draining any result rows so warehouse-side
    /// errors surface here rather than at a later fetch.
    async fn execute(&mut self, statement: &str) -> Result<(), SessionError>;

    /// Issue a role-elevation statement. At most once per session.
    async fn use_role(&mut self, role: &str) -> Result<(), SessionError>;

    /// Close cursor and connection. Idempotent; runs on every exit path.
    async fn close(&mut self);
}
