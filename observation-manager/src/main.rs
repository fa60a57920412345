//! Single-call bus smoke test.
//!
//! Registers a client node on the middleware bus, issues one synchronous
//! atomic-action call against `/forward`, and prints a completion message
//! without inspecting the response. Any failure terminates the process
//! before the message is printed.

#![allow(clippy::print_stdout)] // diagnostic script intentionally uses stdout

use std::process::ExitCode;

use agent_comm::prelude::*;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Service the behaviour executor serves atomic actions on.
const FORWARD_SERVICE: &str = "/forward";

/// One-shot atomic-action call against the bus.
#[derive(Parser)]
#[command(name = "forward-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Websocket URL of the bridge endpoint
    #[arg(short, long, default_value = "ws://127.0.0.1:9090")]
    url: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("forward_check={level},agent_comm={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// One straight-line call, no branching.
async fn run(cli: &Cli) -> Result<()> {
    let node = Node::connect("test_node", &cli.url).await?;

    let request = AtomicActionRequest {
        input: "{\"vel\": 1.0}".to_owned(),
    };

    let client = node.service_client::<AtomicAction>(FORWARD_SERVICE);
    client.call(&request).await?;

    println!("Goodbye");
    Ok(())
}
