use crate::config::{Backup, ConnectionSettings};
use crate::constants::{BACKUP_FILENAME_PREFIX, BACKUP_TIMESTAMP_FORMAT};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// `backup_financial_app_<YYYYMMDD_HHMMSS>.sql`
pub fn backup_file_name(timestamp: &DateTime<Local>) -> String {
    format!(
        "{}{}.sql",
        BACKUP_FILENAME_PREFIX,
        timestamp.format(BACKUP_TIMESTAMP_FORMAT)
    )
}

/// Arguments for pg_dump; the password travels in PGPASSWORD instead
pub fn pg_dump_args(settings: &ConnectionSettings, output: &Path) -> Vec<OsString> {
    vec![
        "-h".into(),
        settings.host.clone().into(),
        "-p".into(),
        settings.port.to_string().into(),
        "-U".into(),
        settings.user.clone().into(),
        "-d".into(),
        settings.database.clone().into(),
        "-f".into(),
        output.as_os_str().to_owned(),
        "--no-password".into(),
    ]
}

async fn run_pg_dump(settings: &ConnectionSettings, program: &str, output: &Path) -> Result<()> {
    if let Some(dir) = output.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create backup directory {}", dir.display()))?;
    }

    let status = Command::new(program)
        .args(pg_dump_args(settings, output))
        .env("PGPASSWORD", &settings.password)
        .stdin(Stdio::null())
        .status()
        .await
        .with_context(|| format!("Failed to run {}", program))?;

    debug!("{} exited with {}", program, status);
    if !status.success() {
        warn!("{} terminó con {}", program, status);
    }
    Ok(())
}

/// Dump the provisioned database; returns the file whenever it was produced
///
/// The file's existence is the only success signal; a nonzero exit status is
/// logged as a warning. Never fails: a missing backup does not invalidate the
/// provisioning run.
pub async fn create_backup(settings: &ConnectionSettings, backup: &Backup) -> Option<PathBuf> {
    let path = backup.directory.join(backup_file_name(&Local::now()));
    info!("Creando backup: {}", path.display());

    match run_pg_dump(settings, &backup.pg_dump, &path).await {
        Ok(()) if path.exists() => {
            info!("✅ Backup creado exitosamente: {}", path.display());
            Some(path)
        }
        Ok(()) => {
            warn!("No se pudo crear el backup");
            None
        }
        Err(e) => {
            warn!("Error creando backup: {:#}", e);
            None
        }
    }
}
