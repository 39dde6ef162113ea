use anyhow::{Context, Result};
use sqlx::postgres::PgConnection;
use tracing::{error, info};

/// Existence of one expected table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCheck {
    pub name: String,
    pub found: bool,
}

/// Seed row counts; only taken when every expected table exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub users: i64,
    pub system_categories: i64,
    pub transactions: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub tables: Vec<TableCheck>,
    pub counts: Option<RowCounts>,
}

impl VerificationReport {
    pub fn missing_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| !t.found)
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Users and system categories are required, transactions are optional
    pub fn has_essential_data(&self) -> bool {
        self.counts
            .is_some_and(|c| c.users > 0 && c.system_categories > 0)
    }

    pub fn passed(&self) -> bool {
        self.missing_tables().is_empty() && self.has_essential_data()
    }
}

async fn table_exists(conn: &mut PgConnection, table: &str) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM information_schema.tables WHERE table_name = $1")
            .bind(table)
            .fetch_one(&mut *conn)
            .await
            .with_context(|| format!("Failed to look up table '{}'", table))?;
    Ok(count > 0)
}

async fn count_rows(conn: &mut PgConnection, sql: &str) -> Result<i64> {
    sqlx::query_scalar(sql)
        .fetch_one(&mut *conn)
        .await
        .with_context(|| format!("Failed to run '{}'", sql))
}

/// Check the expected tables and seed row counts, logging each result
///
/// Errors are reserved for query failures; a failed verification is reported
/// through [`VerificationReport::passed`].
pub async fn verify_installation(
    conn: &mut PgConnection,
    expected_tables: &[&str],
) -> Result<VerificationReport> {
    info!("Verificando instalación...");

    let mut tables = Vec::with_capacity(expected_tables.len());
    for table in expected_tables {
        let found = table_exists(conn, table).await?;
        if found {
            info!("✓ Tabla '{}' creada correctamente", table);
        } else {
            error!("Tabla '{}' no encontrada", table);
        }
        tables.push(TableCheck {
            name: table.to_string(),
            found,
        });
    }

    if tables.iter().any(|t| !t.found) {
        return Ok(VerificationReport {
            tables,
            counts: None,
        });
    }

    let counts = RowCounts {
        users: count_rows(conn, "SELECT COUNT(*) FROM users").await?,
        system_categories: count_rows(conn, "SELECT COUNT(*) FROM categories WHERE is_system = true")
            .await?,
        transactions: count_rows(conn, "SELECT COUNT(*) FROM transactions").await?,
    };

    info!("✓ Usuarios: {}", counts.users);
    info!("✓ Categorías del sistema: {}", counts.system_categories);
    info!("✓ Transacciones de prueba: {}", counts.transactions);

    let report = VerificationReport {
        tables,
        counts: Some(counts),
    };

    if report.has_essential_data() {
        info!("✅ Instalación verificada exitosamente");
    } else {
        error!("❌ Faltan datos esenciales");
    }

    Ok(report)
}
