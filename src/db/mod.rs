pub mod connection;
pub mod error_context;
pub mod identifier;
pub mod sql_executor;
pub mod verify;

pub use connection::{DatabaseStatus, connect_to_target, ensure_database_exists};
pub use sql_executor::{ExecutionSummary, StatementFailure, execute_sql_file};
pub use verify::{VerificationReport, verify_installation};
