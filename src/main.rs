use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use userdeck::core::{HttpSeedSource, NoSeed, SeedSource};
use userdeck::data::{AppStateStore, Database, StateStorage};
use userdeck::ui::install_panic_hook;
use userdeck::{util, App, Config};

/// Terminal dashboard for browsing and managing users
#[derive(Parser, Debug)]
#[command(name = "userdeck", version, about)]
struct Cli {
    /// Directory for the database, config and logs (default: ~/.userdeck)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Skip the first-run fetch of sample users
    #[arg(long)]
    offline: bool,

    /// Endpoint returning the sample user list as JSON
    #[arg(long, value_name = "URL")]
    seed_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir);

    // Initialize logging to file (~/.userdeck/logs/userdeck.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let mut config = Config::load();
    if let Some(url) = cli.seed_url {
        config = config.with_seed_url(url);
    }
    if cli.offline {
        config = config.with_seed_enabled(false);
    }

    let db = Database::open_default().context("Failed to open database")?;
    let storage: Arc<dyn StateStorage> = Arc::new(AppStateStore::new(db.connection()));

    let seed: Arc<dyn SeedSource> = if config.seed.enabled {
        Arc::new(HttpSeedSource::new(config.seed.url.clone(), config.seed.timeout)?)
    } else {
        Arc::new(NoSeed)
    };

    install_panic_hook();
    let mut app = App::new(&config, storage);
    app.run(seed).await
}
