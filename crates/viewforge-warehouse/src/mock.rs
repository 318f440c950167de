//! Recording warehouse session for tests
//!
//! Stores every executed statement in order, can fail on a matching
//! statement and reports whether it was closed. No warehouse required.

use viewforge_sql::SqlFragment;

use crate::session::{SessionError, WarehouseSession};

/// Warehouse session stub recording executed statements.
pub struct MockSession {
    statements: Vec<String>,
    connected: bool,
    fail_on: Option<String>,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
            connected: true,
            fail_on: None,
        }
    }

    /// Fail any statement containing `needle`, simulating a warehouse
    /// rejection.
    pub fn with_failure_on(mut self, needle: impl Into<String>) -> Self {
        self.fail_on = Some(needle.into());
        self
    }

    /// Statements executed so far, in order.
    pub fn executed(&self) -> &[String] {
        &self.statements
    }

    pub fn is_closed(&self) -> bool {
        !self.connected
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WarehouseSession for MockSession {
    async fn execute(&mut self, statement: &str) -> Result<(), SessionError> {
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        if let Some(needle) = self.fail_on.as_deref() {
            if statement.contains(needle) {
                return Err(SessionError::Execution {
                    statement: statement.to_string(),
                    message: "simulated warehouse rejection".to_string(),
                });
            }
        }
        self.statements.push(statement.to_string());
        Ok(())
    }

    async fn use_role(&mut self, role: &str) -> Result<(), SessionError> {
        let role = SqlFragment::new(role)?;
        self.execute(&format!("USE ROLE {}", role)).await
    }

    async fn close(&mut self) {
        self.connected = false;
    }
}
