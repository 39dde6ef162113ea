//! Top-level provisioning flow.
//!
//! `create database -> connect -> schema -> seed -> verify -> backup`. The
//! first five steps gate the run; the backup is best effort.

use crate::backup::create_backup;
use crate::config::Config;
use crate::constants::{DEMO_EMAIL, DEMO_PASSWORD, EXPECTED_TABLES};
use crate::db::{
    DatabaseStatus, VerificationReport, connect_to_target, ensure_database_exists,
    execute_sql_file, verify_installation,
};
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Gating steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    CreateDatabase,
    Connect,
    Schema,
    SeedData,
    Verify,
}

impl ProvisionStep {
    fn error_prefix(self) -> &'static str {
        match self {
            ProvisionStep::CreateDatabase => "Error al crear la base de datos",
            ProvisionStep::Connect => "Error al conectar a la base de datos",
            ProvisionStep::Schema => "Error ejecutando Esquema de base de datos",
            ProvisionStep::SeedData => "Error ejecutando Datos de prueba",
            ProvisionStep::Verify => "Error verificando instalación",
        }
    }
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ProvisionStep::CreateDatabase => "❌ Falló la creación de la base de datos",
            ProvisionStep::Connect => "❌ No se pudo conectar a la base de datos",
            ProvisionStep::Schema => "❌ Falló la creación del esquema",
            ProvisionStep::SeedData => "❌ Falló la inserción de datos de prueba",
            ProvisionStep::Verify => "❌ Falló la verificación de la instalación",
        };
        f.write_str(msg)
    }
}

pub const SCHEMA_DESCRIPTION: &str = "Esquema de base de datos";
pub const SEED_DESCRIPTION: &str = "Datos de prueba";

/// A gating step failed
#[derive(Debug)]
pub struct ProvisionFailure {
    pub step: ProvisionStep,
    pub error: anyhow::Error,
}

impl fmt::Display for ProvisionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.step, self.error)
    }
}

impl std::error::Error for ProvisionFailure {}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub database: DatabaseStatus,
    pub verification: VerificationReport,
    pub backup_file: Option<PathBuf>,
}

pub struct Provisioner {
    config: Config,
}

impl Provisioner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn fail(step: ProvisionStep, e: anyhow::Error) -> ProvisionFailure {
        error!("{}: {:#}", step.error_prefix(), e);
        error!("{}", step);
        ProvisionFailure { step, error: e }
    }

    /// Run every step; the target connection is closed on all exit paths
    pub async fn run(&self) -> Result<ProvisionReport, ProvisionFailure> {
        info!("🚀 Iniciando configuración de base de datos...");

        let database = ensure_database_exists(&self.config.database)
            .await
            .map_err(|e| Self::fail(ProvisionStep::CreateDatabase, e))?;

        let mut conn = connect_to_target(&self.config.database)
            .await
            .map_err(|e| Self::fail(ProvisionStep::Connect, e))?;

        let result = self.run_connected(&mut conn, database).await;

        if let Err(e) = conn.close().await {
            debug!("Error closing connection: {}", e);
        }

        if let Ok(report) = &result {
            log_summary(report);
        }
        result
    }

    async fn run_connected(
        &self,
        conn: &mut PgConnection,
        database: DatabaseStatus,
    ) -> Result<ProvisionReport, ProvisionFailure> {
        let policy = self.config.execution.error_policy;

        execute_sql_file(conn, &self.config.files.schema, SCHEMA_DESCRIPTION, policy)
            .await
            .map_err(|e| Self::fail(ProvisionStep::Schema, e))?;

        execute_sql_file(conn, &self.config.files.seed, SEED_DESCRIPTION, policy)
            .await
            .map_err(|e| Self::fail(ProvisionStep::SeedData, e))?;

        let verification = verify_installation(conn, EXPECTED_TABLES)
            .await
            .map_err(|e| Self::fail(ProvisionStep::Verify, e))?;

        if !verification.passed() {
            let missing = verification.missing_tables();
            let reason = if missing.is_empty() {
                anyhow::anyhow!("essential seed rows are missing")
            } else {
                anyhow::anyhow!("missing tables: {}", missing.join(", "))
            };
            error!("{}", ProvisionStep::Verify);
            return Err(ProvisionFailure {
                step: ProvisionStep::Verify,
                error: reason,
            });
        }

        let backup_file = if self.config.backup.enabled {
            let file = create_backup(&self.config.database, &self.config.backup).await;
            if file.is_none() {
                warn!("Backup no disponible; la configuración continúa");
            }
            file
        } else {
            info!("Backup omitido");
            None
        };

        Ok(ProvisionReport {
            database,
            verification,
            backup_file,
        })
    }
}

fn log_summary(report: &ProvisionReport) {
    info!("🎉 ¡Configuración de base de datos completada exitosamente!");
    info!("📊 Resumen:");
    match report.database {
        DatabaseStatus::Created => info!("   - Base de datos creada"),
        DatabaseStatus::AlreadyExists => info!("   - Base de datos existente"),
    }
    info!("   - Esquema instalado");
    info!("   - Datos de prueba insertados");
    info!("   - Instalación verificada");
    if let Some(file) = &report.backup_file {
        info!("   - Backup creado: {}", file.display());
    }

    info!("🔐 Credenciales de usuario demo:");
    info!("   Email: {}", DEMO_EMAIL);
    info!("   Password: {}", DEMO_PASSWORD);
}
