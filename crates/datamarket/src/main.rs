use anyhow::Result;
use clap::{Parser, Subcommand};
use datamarket_common::{config::ENV_PREFIX, logger, AppConfig};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "datamarket")]
#[command(about = "Datamarket - data catalog with semantic search", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Directory holding catalog.json and embeddings.json
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the effective configuration with secrets redacted
    CheckConfig,
}

async fn serve(config: AppConfig) -> Result<()> {
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("Datamarket starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Data: {}", config.data_dir.display());
    if config.api_key.is_none() {
        tracing::warn!("No provider API key configured; search and chat will fail");
    }

    println!("Server listening on http://{}", config.server_bind_address());

    datamarket_server::start_server(config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI overrides below are applied as environment variables, so .env
    // has to be read first
    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            data_dir,
        }) => {
            if let Some(host) = host {
                std::env::set_var(format!("{}_SERVER_HOST", ENV_PREFIX), host);
            }
            if let Some(port) = port {
                std::env::set_var(format!("{}_SERVER_PORT", ENV_PREFIX), port.to_string());
            }
            if let Some(dir) = data_dir {
                std::env::set_var(format!("{}_DATA_DIR", ENV_PREFIX), &dir);
            }

            serve(AppConfig::load()?).await?;
        }
        Some(Commands::CheckConfig) => {
            let config = AppConfig::load()?;
            logger::setup_console_logging(&config.log_level)?;

            tracing::info!("Configuration is valid");
            println!("{}", serde_json::to_string_pretty(&config.redacted())?);
        }
        None => {
            serve(AppConfig::load()?).await?;
        }
    }

    Ok(())
}
