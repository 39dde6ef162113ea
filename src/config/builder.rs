use crate::config::{merge::Merge, types::*};
use crate::constants::*;
use std::collections::HashMap;

pub struct ConfigBuilder {
    config_input: ConfigInput,
    env: HashMap<String, String>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
            env: HashMap::new(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    /// Capture the DB_* variables from the process environment
    pub fn with_process_env(self) -> Self {
        let vars = [
            ENV_HOST,
            ENV_PORT,
            ENV_USER,
            ENV_PASSWORD,
            ENV_DATABASE,
            ENV_ADMIN_DATABASE,
        ]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)));
        self.with_env_vars(vars)
    }

    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    fn env_var(&self, key: &str) -> Option<String> {
        self.env.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn env_port(&self) -> Option<u16> {
        self.env_var(ENV_PORT).and_then(|p| p.trim().parse().ok())
    }

    /// Recommended variables that are not set and will fall back to defaults
    pub fn missing_env_vars(&self) -> Vec<&'static str> {
        RECOMMENDED_ENV_VARS
            .iter()
            .copied()
            .filter(|key| self.env_var(key).is_none())
            .collect()
    }

    /// Problems found while reading the environment that resolution papered over
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(port) = self.env_var(ENV_PORT)
            && self.env_port().is_none()
        {
            warnings.push(format!(
                "{} value '{}' is not a valid port, using {}",
                ENV_PORT, port, DEFAULT_PORT
            ));
        }
        warnings
    }

    pub fn resolve(&self) -> Config {
        let defaults = Config::default();

        Config {
            database: self.resolve_database(&defaults.database),
            files: self.resolve_files(&defaults.files),
            execution: self.resolve_execution(&defaults.execution),
            backup: self.resolve_backup(&defaults.backup),
            logging: self.resolve_logging(&defaults.logging),
        }
    }

    fn resolve_database(&self, defaults: &ConnectionSettings) -> ConnectionSettings {
        let db_input = self.config_input.database.as_ref();

        let string_setting = |input: Option<&String>, env_key: &str, default: &String| {
            input
                .cloned()
                .or_else(|| self.env_var(env_key))
                .unwrap_or_else(|| default.clone())
        };

        ConnectionSettings {
            host: string_setting(db_input.and_then(|d| d.host.as_ref()), ENV_HOST, &defaults.host),
            port: db_input
                .and_then(|d| d.port)
                .or_else(|| self.env_port())
                .unwrap_or(defaults.port),
            user: string_setting(db_input.and_then(|d| d.user.as_ref()), ENV_USER, &defaults.user),
            password: string_setting(
                db_input.and_then(|d| d.password.as_ref()),
                ENV_PASSWORD,
                &defaults.password,
            ),
            database: string_setting(
                db_input.and_then(|d| d.name.as_ref()),
                ENV_DATABASE,
                &defaults.database,
            ),
            admin_database: string_setting(
                db_input.and_then(|d| d.admin_database.as_ref()),
                ENV_ADMIN_DATABASE,
                &defaults.admin_database,
            ),
        }
    }

    fn resolve_files(&self, defaults: &Files) -> Files {
        let files_input = self.config_input.files.as_ref();

        Files {
            schema: files_input
                .and_then(|f| f.schema_file.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.schema.clone()),
            seed: files_input
                .and_then(|f| f.seed_file.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.seed.clone()),
        }
    }

    fn resolve_execution(&self, defaults: &Execution) -> Execution {
        let error_policy = self
            .config_input
            .execution
            .as_ref()
            .and_then(|e| e.continue_on_error)
            .map(ErrorPolicy::from_continue_on_error)
            .unwrap_or(defaults.error_policy);

        Execution { error_policy }
    }

    fn resolve_backup(&self, defaults: &Backup) -> Backup {
        let backup_input = self.config_input.backup.as_ref();

        Backup {
            enabled: backup_input
                .and_then(|b| b.enabled)
                .unwrap_or(defaults.enabled),
            directory: backup_input
                .and_then(|b| b.directory.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.directory.clone()),
            pg_dump: backup_input
                .and_then(|b| b.pg_dump.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.pg_dump.clone()),
        }
    }

    fn resolve_logging(&self, defaults: &Logging) -> Logging {
        Logging {
            file: self
                .config_input
                .logging
                .as_ref()
                .and_then(|l| l.file.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.file.clone()),
        }
    }
}
