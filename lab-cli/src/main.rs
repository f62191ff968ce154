//! Lab CLI - command line tool for the water-testing lab backend.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "lab-cli",
    version,
    about = "Water-testing lab statistics and catalog toolkit"
)]
struct Cli {
    #[command(flatten)]
    api: lab_cmd::ApiArgs,

    #[command(subcommand)]
    command: lab_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; flags and the process environment still apply.
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[LAB] samples api: {}", cli.api.config().samples_base_url);
    lab_cmd::run(&cli.api, cli.command).await
}
