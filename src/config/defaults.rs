use crate::config::types::*;
use crate::constants::*;
use std::path::{Path, PathBuf};

/// Locate a shipped SQL script next to the running executable
///
/// Looks in the executable's directory and its `scripts/` subdirectory, then
/// falls back to the `scripts/` directory of the source tree.
pub fn default_script_path(file_name: &str) -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    exe_dir
        .into_iter()
        .flat_map(|dir| [dir.join(file_name), dir.join(SCRIPTS_DIR).join(file_name)])
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| {
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join(SCRIPTS_DIR)
                .join(file_name)
        })
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            admin_database: DEFAULT_ADMIN_DATABASE.to_string(),
        }
    }
}

impl Default for Files {
    fn default() -> Self {
        Self {
            schema: default_script_path(SCHEMA_FILE_NAME),
            seed: default_script_path(SEED_FILE_NAME),
        }
    }
}

impl Default for Backup {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("."),
            pg_dump: DEFAULT_PG_DUMP.to_string(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}
