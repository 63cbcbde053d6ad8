use clap::{Parser, Subcommand};
use gymhuntr_cli::cli::commands::{self, SweepArgs};

#[derive(Parser)]
#[command(name = "gymhuntr")]
#[command(author, version, about = "Sweep the GymHuntr API and persist discovered gyms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the coordinate grid and write gym batches
    Sweep(SweepArgs),
    /// Import a flushed batch file into the local gym store
    Import {
        /// Batch file produced by a sweep
        file: String,
        /// Database file path
        #[arg(long)]
        db: Option<String>,
    },
    /// Show gym store status
    Status {
        /// Database file path
        #[arg(long)]
        db: Option<String>,
    },
}

#[tokio::main]
async fn main() -> gymhuntr_cli::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sweep(args) => commands::sweep_run(args).await,
        Commands::Import { file, db } => commands::import(file, db).await,
        Commands::Status { db } => commands::status(db).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", gymhuntr_cli::error::format_user_error(&e));
        std::process::exit(1);
    }

    Ok(())
}
