//! Deployment verification CLI for the bridge.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "Deployment verification CLI for the application bridge", long_about = None)]
struct Cli {
    /// Base URL of the bridge.
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    /// Request timeout in seconds.
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the bridge's health endpoint
    Health,
    /// Probe the proxied application's status endpoint
    Status {
        /// Status path to probe.
        #[arg(default_value = "/api/stats")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let base: Url = match cli.url.parse() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid URL '{}': {}", cli.url, e);
            return ExitCode::FAILURE;
        }
    };

    let path = match &cli.command {
        Commands::Health => "/health",
        Commands::Status { path } => path.as_str(),
    };
    let target = match base.join(path) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid path '{}': {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Checking {}", target);

    match client.get(target).send().await {
        Ok(res) => {
            let status = res.status();
            println!("Status: {}", status);
            match res.text().await {
                Ok(body) => print_body(&body),
                Err(e) => eprintln!("Failed to read response body: {}", e),
            }
            if status == StatusCode::OK {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Check failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_body(body: &str) {
    // Pretty-print JSON when the body parses as such.
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match serde_json::to_string_pretty(&json) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", body),
        },
        Err(_) => println!("{}", body),
    }
}
