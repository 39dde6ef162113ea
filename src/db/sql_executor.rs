use anyhow::{Context, Result};
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use std::path::Path;
use tracing::{debug, info, warn};

use super::error_context::SqlErrorContext;
use crate::config::ErrorPolicy;

/// Split a SQL script on `;` into trimmed, non-empty statements
///
/// The split is naive: semicolons inside string literals, comments or
/// function bodies also terminate a statement.
pub fn split_statements(content: &str) -> Vec<&str> {
    content
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// A statement that failed and was skipped
#[derive(Debug, Clone)]
pub struct StatementFailure {
    /// 1-based position in the file
    pub index: usize,
    pub error: SqlErrorContext,
}

/// Result of running one SQL file
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    pub description: String,
    pub total: usize,
    pub failures: Vec<StatementFailure>,
}

impl ExecutionSummary {
    pub fn executed(&self) -> usize {
        self.total - self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute a SQL file statement by statement
pub async fn execute_sql_file(
    conn: &mut PgConnection,
    file_path: &Path,
    description: &str,
    policy: ErrorPolicy,
) -> Result<ExecutionSummary> {
    if !file_path.exists() {
        return Err(anyhow::anyhow!(
            "Archivo SQL no encontrado: {}",
            file_path.display()
        ));
    }

    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read SQL file {}", file_path.display()))?;

    execute_sql_content(conn, &content, description, policy).await
}

/// Execute SQL content inside one transaction, one savepoint per statement
///
/// With [`ErrorPolicy::ContinueOnError`] a failing statement is rolled back to
/// its savepoint and skipped; the remaining statements still commit. With
/// [`ErrorPolicy::Strict`] the first failure rolls back the whole batch.
pub async fn execute_sql_content(
    conn: &mut PgConnection,
    content: &str,
    description: &str,
    policy: ErrorPolicy,
) -> Result<ExecutionSummary> {
    let statements = split_statements(content);
    info!("Ejecutando {}: {} statements", description, statements.len());

    let mut tx = conn
        .begin()
        .await
        .with_context(|| format!("Failed to start transaction for {}", description))?;

    match run_statements(&mut tx, &statements, description, policy).await {
        Ok(failures) => {
            tx.commit()
                .await
                .with_context(|| format!("Failed to commit {}", description))?;
            info!("{} ejecutado exitosamente", description);

            Ok(ExecutionSummary {
                description: description.to_string(),
                total: statements.len(),
                failures,
            })
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback of {} failed: {}", description, rollback_err);
            }
            Err(e)
        }
    }
}

async fn run_statements(
    conn: &mut PgConnection,
    statements: &[&str],
    description: &str,
    policy: ErrorPolicy,
) -> Result<Vec<StatementFailure>> {
    let total = statements.len();
    let mut failures = Vec::new();

    for (i, statement) in statements.iter().enumerate() {
        let index = i + 1;

        // Nested begin on an open transaction issues a SAVEPOINT
        let mut savepoint = conn
            .begin()
            .await
            .with_context(|| format!("Failed to create savepoint for statement {}", index))?;

        match sqlx::raw_sql(statement).execute(&mut *savepoint).await {
            Ok(_) => {
                savepoint
                    .commit()
                    .await
                    .with_context(|| format!("Failed to release savepoint {}", index))?;
                debug!("Statement {}/{} ejecutado exitosamente", index, total);
            }
            Err(e) => {
                let error = SqlErrorContext::from_sqlx_error(&e, statement);
                savepoint
                    .rollback()
                    .await
                    .with_context(|| format!("Failed to roll back statement {}", index))?;

                match policy {
                    ErrorPolicy::ContinueOnError => {
                        warn!("Error en statement {}: {}", index, error);
                        failures.push(StatementFailure { index, error });
                    }
                    ErrorPolicy::Strict => {
                        return Err(anyhow::anyhow!(
                            "Statement {}/{} of {} failed: {}",
                            index,
                            total,
                            description,
                            error
                        ));
                    }
                }
            }
        }
    }

    Ok(failures)
}
