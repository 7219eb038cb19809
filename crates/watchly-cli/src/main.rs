use clap::{ArgAction, Parser, Subcommand};
use commands::{catalog, config, detail};
use watchly_config::{Config, LoggingConfig, PathManager};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchly")]
#[command(about = "Watchly - browse movies and TV shows from the Watchmode catalog")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List movies and TV shows
    #[command(long_about = "Fetch the movie and TV series listings together. The screen only shows results when both lists load; if either request fails the whole load fails.")]
    Catalog {
        /// Retry a failed load this many times
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Show details for one title
    Detail {
        /// Title id as shown by `watchly catalog`
        id: u64,

        /// Retry a failed load this many times
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a starter config file
    Init {
        /// Watchmode API key to store
        #[arg(long)]
        api_key: Option<String>,

        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logging settings come from the config file when it is readable; the
    // commands themselves report a broken config.
    let paths = PathManager::default();
    let logging_config = Config::load_or_default(&paths.config_file())
        .map(|c| c.logging)
        .unwrap_or_else(|_| LoggingConfig::default());
    logging::init_logging(cli.verbose, cli.quiet, &logging_config, &paths)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Catalog { retries } => catalog::run_catalog(retries, &output).await,
        Commands::Detail { id, retries } => detail::run_detail(id, retries, &output).await,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Init { api_key, force } => config::run_init(api_key, force, &output),
            ConfigCommands::Show { full } => config::run_show(full, &output),
        },
    }
}
