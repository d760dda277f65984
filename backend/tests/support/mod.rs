//! Shared helpers for the database-backed integration suites.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{execute_sql, migrated_database, row_count};
