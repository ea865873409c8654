use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cyclekeeper", version, about = "Cyclekeeper CLI")]
struct Cli {
    /// Log core decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record and list cycles
    Cycle {
        #[command(subcommand)]
        action: commands::cycle::CycleAction,
    },
    /// Predict the next period start date
    Predict {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recorded cycles on a month calendar
    Calendar {
        /// Month to show (YYYY-MM); defaults to the latest cycle's month
        #[arg(long)]
        month: Option<String>,
    },
    /// Local user accounts
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "cyclekeeper_core=debug,info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("CYCLEKEEPER_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Cycle { action } => commands::cycle::run(action),
        Commands::Predict { json } => commands::predict::run(json),
        Commands::Calendar { month } => commands::calendar::run(month.as_deref()),
        Commands::User { action } => commands::user::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "cyclekeeper", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
