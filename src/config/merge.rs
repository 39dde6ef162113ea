use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            database: match (self.database, other.database) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            files: match (self.files, other.files) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            execution: match (self.execution, other.execution) {
                (Some(a), Some(b)) => Some(ExecutionInput {
                    continue_on_error: a.continue_on_error.merge(b.continue_on_error),
                }),
                (a, b) => b.or(a),
            },
            backup: match (self.backup, other.backup) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            logging: self.logging.merge(other.logging),
        }
    }
}

// Custom merge implementations for complex types
impl DatabaseInput {
    pub fn merge_with(self, other: DatabaseInput) -> DatabaseInput {
        DatabaseInput {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            user: other.user.or(self.user),
            password: other.password.or(self.password),
            name: other.name.or(self.name),
            admin_database: other.admin_database.or(self.admin_database),
        }
    }
}

impl FilesInput {
    pub fn merge_with(self, other: FilesInput) -> FilesInput {
        FilesInput {
            schema_file: other.schema_file.or(self.schema_file),
            seed_file: other.seed_file.or(self.seed_file),
        }
    }
}

impl BackupInput {
    pub fn merge_with(self, other: BackupInput) -> BackupInput {
        BackupInput {
            enabled: other.enabled.or(self.enabled),
            directory: other.directory.or(self.directory),
            pg_dump: other.pg_dump.or(self.pg_dump),
        }
    }
}
