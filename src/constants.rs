use std::time::Duration;

// Connection defaults, overridable through DB_* environment variables
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_DATABASE: &str = "financial_app";
pub const DEFAULT_ADMIN_DATABASE: &str = "postgres";

// Environment variable names
pub const ENV_HOST: &str = "DB_HOST";
pub const ENV_PORT: &str = "DB_PORT";
pub const ENV_USER: &str = "DB_USER";
pub const ENV_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DATABASE: &str = "DB_NAME";
pub const ENV_ADMIN_DATABASE: &str = "DB_ADMIN_DATABASE";

/// Variables whose absence is worth a warning before falling back to defaults
pub const RECOMMENDED_ENV_VARS: &[&str] = &[ENV_HOST, ENV_USER, ENV_PASSWORD];

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// Files
pub const CONFIG_FILENAME: &str = "dbprovision.yaml";
pub const SCRIPTS_DIR: &str = "scripts";
pub const SCHEMA_FILE_NAME: &str = "database-schema.sql";
pub const SEED_FILE_NAME: &str = "seed-data.sql";
pub const DEFAULT_LOG_FILE: &str = "database_setup.log";

// Backup
pub const DEFAULT_PG_DUMP: &str = "pg_dump";
pub const BACKUP_FILENAME_PREFIX: &str = "backup_financial_app_";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Tables the schema file must create
pub const EXPECTED_TABLES: &[&str] = &[
    "users",
    "accounts",
    "transactions",
    "categories",
    "budgets",
    "financial_goals",
    "notifications",
];

pub const DEMO_EMAIL: &str = "demo@financialapp.com";
pub const DEMO_PASSWORD: &str = "demo123";
