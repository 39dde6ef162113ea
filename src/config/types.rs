use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub database: Option<DatabaseInput>,
    pub files: Option<FilesInput>,
    pub execution: Option<ExecutionInput>,
    pub backup: Option<BackupInput>,
    pub logging: Option<LoggingInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database: ConnectionSettings,
    pub files: Files,
    pub execution: Execution,
    pub backup: Backup,
    pub logging: Logging,
}

// Database connection configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseInput {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub admin_database: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database to provision
    pub database: String,
    /// Pre-existing database used to issue CREATE DATABASE
    pub admin_database: String,
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("admin_database", &self.admin_database)
            .finish()
    }
}

// SQL input files
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilesInput {
    pub schema_file: Option<PathBuf>,
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Files {
    pub schema: PathBuf,
    pub seed: PathBuf,
}

// Statement execution policy
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExecutionInput {
    pub continue_on_error: Option<bool>,
}

/// What the SQL executor does when a single statement fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Roll back only the failed statement and keep going
    #[default]
    ContinueOnError,
    /// Roll back the whole file on the first failure
    Strict,
}

impl ErrorPolicy {
    pub fn from_continue_on_error(continue_on_error: bool) -> Self {
        if continue_on_error {
            ErrorPolicy::ContinueOnError
        } else {
            ErrorPolicy::Strict
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Execution {
    pub error_policy: ErrorPolicy,
}

// Backup configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackupInput {
    pub enabled: Option<bool>,
    pub directory: Option<PathBuf>,
    pub pg_dump: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Backup {
    pub enabled: bool,
    pub directory: PathBuf,
    /// Dump program, looked up on PATH unless it contains a separator
    pub pg_dump: String,
}

// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingInput {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Logging {
    pub file: PathBuf,
}

// CLI argument groups
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    #[arg(long, help = "Database server host")]
    pub host: Option<String>,

    #[arg(long, help = "Database server port")]
    pub port: Option<u16>,

    #[arg(long, help = "Database user")]
    pub user: Option<String>,

    #[arg(long = "database", help = "Name of the database to provision")]
    pub name: Option<String>,

    #[arg(long, help = "Existing database used to create the target database")]
    pub admin_database: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FileArgs {
    #[arg(long, help = "Schema SQL file")]
    pub schema_file: Option<PathBuf>,

    #[arg(long, help = "Seed data SQL file")]
    pub seed_file: Option<PathBuf>,

    #[arg(long, help = "Roll back a whole file when any statement fails")]
    pub strict: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct BackupArgs {
    #[arg(long, help = "Do not run pg_dump after provisioning")]
    pub skip_backup: bool,

    #[arg(long, help = "Directory for the backup file")]
    pub backup_dir: Option<PathBuf>,

    #[arg(long, help = "pg_dump program to run")]
    pub pg_dump: Option<String>,
}

// Conversion functions from CLI args to config input
impl From<DatabaseArgs> for DatabaseInput {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            user: args.user,
            password: None, // Password comes from the environment or file only
            name: args.name,
            admin_database: args.admin_database,
        }
    }
}

impl From<FileArgs> for FilesInput {
    fn from(args: FileArgs) -> Self {
        Self {
            schema_file: args.schema_file,
            seed_file: args.seed_file,
        }
    }
}

impl From<FileArgs> for ExecutionInput {
    fn from(args: FileArgs) -> Self {
        Self {
            continue_on_error: if args.strict { Some(false) } else { None },
        }
    }
}

impl From<BackupArgs> for BackupInput {
    fn from(args: BackupArgs) -> Self {
        Self {
            enabled: if args.skip_backup { Some(false) } else { None },
            directory: args.backup_dir,
            pg_dump: args.pg_dump,
        }
    }
}
