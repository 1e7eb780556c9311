//! `dialer` binary: operator commands for the outbound SIP calling pipeline.
//!
//! Loads the `.env` configuration, initializes structured logging and runs
//! one workflow against the LiveKit server.

use clap::{Parser, Subcommand};
use dialer_cli::commands;
use dialer_cli::config::{self, LoggingConfig};
use dialer_types::{PROBE_ROOM, QUICK_DIAL_ROOM};
use dialer_voice::env_file::DEFAULT_ENV_FILE;
use dialer_voice::probe::DEFAULT_PROBE_WAIT;
use dialer_voice::VoiceService;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dialer")]
#[command(about = "Outbound SIP calling through LiveKit")]
#[command(version)]
struct Cli {
    /// Configuration file with KEY=VALUE lines
    #[arg(long, global = true, env = "DIALER_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision a trunk and place a call in a fresh room
    Setup {
        /// Continue without asking when SIP credentials look unset
        #[arg(short, long)]
        yes: bool,
    },
    /// Create the SIP outbound trunk, or reuse an existing one
    SetupTrunk,
    /// Call the configured number through the configured trunk
    Call,
    /// List call rooms and their participants
    Diagnose,
    /// List call rooms
    Monitor,
    /// Create a test room and check whether an agent joins it
    TestAgent {
        /// Seconds to wait for the agent
        #[arg(long, default_value_t = DEFAULT_PROBE_WAIT.as_secs())]
        wait_secs: u64,
    },
    /// Start the agent host in dev mode
    RunAgent,
    /// Print a room-join token for an agent worker
    AgentToken {
        #[arg(long, default_value = QUICK_DIAL_ROOM)]
        room: String,
        #[arg(long, default_value = "agent-dialer")]
        identity: String,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

fn ask_to_continue() -> bool {
    print!("\nContinue anyway? (y/N): ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load_config(&cli.env_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);
    tracing::debug!(path = %cli.env_file.display(), "loaded configuration");

    let service = VoiceService::new(config.livekit.clone());

    match cli.command {
        Commands::Setup { yes } => {
            let done =
                commands::complete_setup(&config, &service, |_| yes || ask_to_continue()).await;
            if done {
                println!("\nAll done! The calling system is ready.");
            } else {
                println!("\nSetup did not complete. Please check the messages above.");
            }
        }
        Commands::SetupTrunk => {
            commands::setup_trunk(&config, &service).await;
        }
        Commands::Call => {
            commands::place_call(&config, &service).await;
        }
        Commands::Diagnose => {
            commands::diagnose(&config, &service).await;
        }
        Commands::Monitor => {
            commands::monitor(&config, &service).await;
        }
        Commands::TestAgent { wait_secs } => {
            commands::test_agent(&service, PROBE_ROOM, Duration::from_secs(wait_secs)).await;
        }
        Commands::RunAgent => {
            commands::run_agent(&config).await;
        }
        Commands::AgentToken { room, identity } => {
            commands::agent_token(&service, &room, &identity);
        }
    }

    ExitCode::SUCCESS
}
