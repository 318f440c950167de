//! Warehouse collaborator
//!
//! One session per run, used sequentially: role elevation, injection-guarded
//! DDL execution, query tagging and idempotent close. [`SnowflakeSession`]
//! talks to the real warehouse; [`MockSession`] records statements for tests.

pub mod mock;
pub mod session;
pub mod snowflake;

pub use mock::MockSession;
pub use session::{SessionError, WarehouseSession};
pub use snowflake::SnowflakeSession;
