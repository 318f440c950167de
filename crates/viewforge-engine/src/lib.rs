//! Run orchestration
//!
//! Iterates buckets and tables, resolves naming and sources, assembles DDL
//! and executes it through one warehouse session per run. Strictly
//! sequential; a failed statement aborts the remaining iteration. All DDL is
//! `OR REPLACE` / `IF NOT EXISTS`, so rerunning after a partial run is safe.

pub mod run;

pub use run::{list_buckets, run, BucketOption, EngineError, RunSummary};
