use clap::Parser;
use console::style;
use dbprovision::Provisioner;
use dbprovision::config::{self, ConfigBuilder, ConfigInput, LoggingInput};
use dbprovision::constants::CONFIG_FILENAME;
use dbprovision::logging::{self, Verbosity};
use dotenv::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME)]
    config_file: String,

    /// Append log output to this file (default: database_setup.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    database_args: config::DatabaseArgs,

    #[command(flatten)]
    file_args: config::FileArgs,

    #[command(flatten)]
    backup_args: config::BackupArgs,
}

impl Cli {
    fn config_input(&self) -> ConfigInput {
        ConfigInput {
            database: Some(self.database_args.clone().into()),
            files: Some(self.file_args.clone().into()),
            execution: Some(self.file_args.clone().into()),
            backup: Some(self.backup_args.clone().into()),
            logging: self.log_file.clone().map(|file| LoggingInput { file: Some(file) }),
        }
    }
}

fn rule() -> String {
    "=".repeat(60)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    println!("{}", rule());
    println!(
        "{}",
        style("🏦 CONFIGURADOR DE BASE DE DATOS - FINANCIAL APP").bold()
    );
    println!("{}", rule());

    let file_config = match config::load_config(&cli.config_file) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error inesperado: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let builder = ConfigBuilder::new()
        .with_file(file_config)
        .with_cli_args(cli.config_input())
        .with_process_env();
    let config = builder.resolve();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose, cli.debug);
    let _log = match logging::init(&config.logging.file, verbosity) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error inesperado: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let missing = builder.missing_env_vars();
    if !missing.is_empty() {
        warn!("Variables de entorno faltantes: {:?}", missing);
        info!("Usando valores por defecto...");
    }
    for warning in builder.warnings() {
        warn!("{}", warning);
    }
    config.log_summary();

    let provisioner = Provisioner::new(config);

    let result = tokio::select! {
        result = provisioner.run() => result,
        _ = wait_for_shutdown_signal() => {
            info!("⏹️  Configuración cancelada por el usuario");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(_) => {
            println!();
            println!("{}", style("✅ CONFIGURACIÓN EXITOSA").green().bold());
            println!("La base de datos está lista para usar.");
            println!();
            println!("Próximos pasos:");
            println!("1. Configurar las variables de entorno en tu aplicación");
            println!("2. Ejecutar la aplicación Next.js");
            println!("3. Probar el login con las credenciales demo");
            ExitCode::SUCCESS
        }
        Err(_) => {
            println!();
            println!("{}", style("❌ CONFIGURACIÓN FALLIDA").red().bold());
            println!("Revisa los logs para más detalles.");
            ExitCode::FAILURE
        }
    }
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
