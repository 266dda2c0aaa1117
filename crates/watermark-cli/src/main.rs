mod commands;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "watermark", about = "Watermark images through a watermark server")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image, watermark it on the server and save the result
    Process(commands::process::ProcessArgs),
    /// Print the file name a download would be saved under
    Filename(commands::filename::FilenameArgs),
    /// Print or save the default client config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Filename(args) => commands::filename::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
