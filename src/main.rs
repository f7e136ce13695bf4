//! lgtm-bot command line
//!
//! A minimal host around the library: each subcommand feeds one event or
//! query to the bot, the way a webhook receiver would.

mod cli;

use clap::{Parser, Subcommand};
use lgtm_bot::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lgtm-bot",
    version,
    about = "Approval labels and merge gate for pull requests"
)]
struct Cli {
    /// Path to the bot config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log platform calls
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle a PR comment as if it had just been posted
    Comment {
        /// Repository as owner/name
        #[arg(long)]
        repo: String,
        /// Pull request number
        #[arg(long)]
        pr: u64,
        /// Login of the commenter
        #[arg(long)]
        actor: String,
        /// Comment text, e.g. "/lgtm"
        #[arg(long)]
        body: String,
    },
    /// Evaluate the merge gate for a PR
    Check {
        /// Repository as owner/name
        #[arg(long)]
        repo: String,
        /// Pull request number
        #[arg(long)]
        pr: u64,
        /// Login the merge would be performed for
        #[arg(long)]
        actor: String,
        /// Comment the reasons or merge, like /check-pr
        #[arg(long)]
        merge: bool,
    },
    /// Show the freeze rule governing a branch
    Freeze {
        /// Repository as owner/name
        #[arg(long)]
        repo: String,
        /// Target branch
        #[arg(long)]
        branch: String,
        /// Report whether this login is blocked
        #[arg(long)]
        actor: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "lgtm_bot=debug" } else { "lgtm_bot=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Comment {
            repo,
            pr,
            actor,
            body,
        } => cli::run_comment(&cli.config, &repo, pr, &actor, &body).await?,
        Commands::Check {
            repo,
            pr,
            actor,
            merge,
        } => cli::run_check(&cli.config, &repo, pr, &actor, merge).await?,
        Commands::Freeze {
            repo,
            branch,
            actor,
        } => cli::run_freeze(&cli.config, &repo, &branch, actor.as_deref()).await?,
    }

    Ok(())
}
