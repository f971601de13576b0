use std::path::PathBuf;

use clap::Parser;
use tsmaint::{droprp, Config, DropRequest, FileMetaClient, ShardStore};

#[derive(Parser)]
#[command(name = "tsmaint-droprp")]
#[command(about = "Drop a retention policy from a stopped storage node")]
struct Cli {
    /// Database name
    #[arg(long)]
    database: String,

    /// Retention policy name
    #[arg(long)]
    rp: String,

    /// Config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut meta = FileMetaClient::open(&config.meta.dir)?;
    let mut store = ShardStore::new(&config.data);

    let request = DropRequest {
        database: cli.database,
        rp: cli.rp,
    };
    droprp::run(&mut meta, &mut store, &request)?;
    Ok(())
}
