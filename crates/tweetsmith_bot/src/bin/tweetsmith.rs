//! Tweetsmith - scheduled content bot for Twitter.
//!
//! `serve` runs every schedule until Ctrl-C, `run` executes one action and
//! exits, `check` probes the configured credentials.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{error, info, warn};
use tweetsmith_bot::{
    ActionKind, ActionOutcome, Bot, BotConfig, BotServer, Credentials, check_connections,
    init_tracing,
};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "tweetsmith")]
#[command(about = "Tweetsmith - AI-generated posts on a schedule")]
#[command(version)]
struct Args {
    /// Path to a configuration file layered over the defaults
    #[arg(short, long, global = true, env = "TWEETSMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Emit JSON logs
    #[arg(long, global = true)]
    json_logs: bool,

    /// Log posts instead of publishing them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every schedule until Ctrl-C
    Serve {
        /// Do not serve the health API
        #[arg(long)]
        no_api: bool,
    },
    /// Execute one action and exit
    Run {
        /// Action name (quote, news, poll, thread, engagement) or "random"
        action: String,
    },
    /// Verify Twitter and AI backend credentials
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.json_logs)?;

    let config = BotConfig::load(args.config.as_deref())?;
    config.validate()?;
    info!(
        bot = %config.bot.name,
        version = %config.bot.version,
        dry_run = args.dry_run,
        "Configuration loaded"
    );
    let credentials = Credentials::from_env();

    match args.command {
        Command::Check => {
            let checks = check_connections(&config, &credentials).await;
            let mut failed = 0;
            for check in &checks {
                match &check.result {
                    Ok(detail) => info!(target_service = %check.target, %detail, "Connection ok"),
                    Err(e) => {
                        failed += 1;
                        error!(target_service = %check.target, error = %e, "Connection failed");
                    }
                }
            }
            if failed > 0 {
                return Err(format!("{} of {} connection checks failed", failed, checks.len()).into());
            }
            Ok(())
        }
        Command::Run { action } => {
            let bot = Bot::from_config(config, &credentials, args.dry_run)?;
            let (name, outcome) = if action.eq_ignore_ascii_case("random") {
                bot.dispatcher.select_and_run().await
            } else {
                let kind = ActionKind::from_str(&action.to_lowercase())
                    .map_err(|_| format!("Unknown action '{}'", action))?;
                let outcome = bot
                    .dispatcher
                    .run_named(kind.as_str())
                    .await
                    .ok_or_else(|| format!("Action '{}' is not registered", kind))?;
                (kind.as_str().to_string(), outcome)
            };

            match outcome {
                ActionOutcome::Completed { published } => {
                    info!(action = %name, published, "Action completed");
                    Ok(())
                }
                ActionOutcome::Skipped(reason) => {
                    warn!(action = %name, %reason, "Action skipped");
                    Ok(())
                }
                ActionOutcome::Failed(reason) => {
                    Err(format!("Action '{}' failed: {}", name, reason).into())
                }
            }
        }
        Command::Serve { no_api } => {
            let bot = Bot::from_config(config, &credentials, args.dry_run)?;
            let server = BotServer::new(bot.config, bot.dispatcher);
            let server = if no_api { server.without_api() } else { server };
            info!("Bot server starting");
            server.start().await?;
            info!("Bot server stopped");
            Ok(())
        }
    }
}
