use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands {
    automod::dir!(pub "src/commands");
}
mod util;

#[derive(Parser)]
#[command(name = "unicity", version, about = "Uniqueness checks for JSON documents")]
struct Cli {
    /// Log engine decisions to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check values in a JSON document for duplicates
    Check(commands::check::Args),
    /// Print every value a search path reaches
    Expand(commands::expand::Args),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Expand(args) => commands::expand::run(args),
    }
}
