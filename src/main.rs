use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use phone_recs::{
    api::{create_router, AppState},
    config::Config,
    console::Console,
    services::{load_bonus, load_catalog},
};

#[derive(Debug, Parser)]
#[command(
    name = "phone-recs",
    about = "Smartphone recommendations by usage, budget and OS",
    after_help = "Examples:\n  phone-recs serve\n  phone-recs console --catalog data/phones.csv"
)]
struct Cli {
    /// Phone catalog CSV (overrides CATALOG_PATH)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Bonus suggestions CSV (overrides BONUS_PATH)
    #[arg(long, global = true)]
    bonus: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Run the interactive console menu
    Console,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }
    if let Some(path) = cli.bonus {
        config.bonus_path = path;
    }

    let catalog = load_catalog(&config.catalog_path)?;
    let bonus = load_bonus(&config.bonus_path)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = create_router(AppState::new(catalog, bonus));

            let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
            tracing::info!(addr = %config.bind_addr(), "Server running");
            axum::serve(listener, app).await?;
        }
        Command::Console => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Console::new(catalog, &bonus, config.page_size, stdin.lock(), stdout.lock()).run()?;
        }
    }

    Ok(())
}
