//! Rich error context extracted from PostgreSQL errors, used when a statement
//! of a schema or seed file fails.

use sqlx::postgres::{PgDatabaseError, PgErrorPosition};

#[derive(Debug, Clone)]
pub struct SqlErrorContext {
    /// The primary error message
    pub message: String,
    /// SQLSTATE code (e.g., "42P07" for duplicate_table)
    pub code: Option<String>,
    /// Line within the statement (converted from character position)
    pub line_number: Option<usize>,
    pub detail: Option<String>,
    pub hint: Option<String>,
}

impl SqlErrorContext {
    /// Uses structured data from PgDatabaseError - no string parsing needed.
    pub fn from_sqlx_error(error: &sqlx::Error, statement: &str) -> Self {
        if let Some(db_error) = error.as_database_error()
            && let Some(pg_error) = db_error.try_downcast_ref::<PgDatabaseError>()
        {
            let line_number = pg_error
                .position()
                .map(|pos| match pos {
                    PgErrorPosition::Original(p) => p,
                    PgErrorPosition::Internal { position, .. } => position,
                })
                .map(|p| position_to_line(statement, p));

            return Self {
                message: pg_error.message().to_string(),
                code: Some(pg_error.code().to_string()),
                line_number,
                detail: pg_error.detail().map(|s| s.to_string()),
                hint: pg_error.hint().map(|s| s.to_string()),
            };
        }

        // Fallback for non-PostgreSQL errors
        Self {
            message: error.to_string(),
            code: None,
            line_number: None,
            detail: None,
            hint: None,
        }
    }

    /// One-line rendering for log output
    pub fn summary(&self) -> String {
        let mut msg = match &self.code {
            Some(code) => format!("{} [{}]", self.message, code),
            None => self.message.clone(),
        };
        if let Some(line) = self.line_number {
            msg.push_str(&format!(" (line {})", line));
        }
        if let Some(detail) = &self.detail {
            msg.push_str(&format!("; detail: {}", detail));
        }
        if let Some(hint) = &self.hint {
            msg.push_str(&format!("; hint: {}", hint));
        }
        msg
    }
}

impl std::fmt::Display for SqlErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Convert 1-indexed character position to line number
pub fn position_to_line(content: &str, position: usize) -> usize {
    content
        .chars()
        .take(position.saturating_sub(1))
        .filter(|c| *c == '\n')
        .count()
        + 1
}
