use anyhow::Result;
use clap::Parser;
use tracing::info;

use zombie_detector::cli::{self, Cli, Command};
use zombie_detector::{build_client, load_config, run, RunOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    if let Some(Command::Version) = args.command {
        println!("{}", cli::version());
        return Ok(());
    }

    init_tracing();
    let cfg = load_config(&args)?;
    info!("threshold = {}, sink = {:?}", args.threshold.as_deref().unwrap_or_default(), cfg.sink());

    let client = build_client(&cfg).await?;

    match run(&client, &cfg).await? {
        RunOutcome::Published(zombies) => {
            info!("published {} zombie resources", zombies.len());
        }
        RunOutcome::Report { table, .. } => {
            println!("{}", table);
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
