use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;

use post_service::config::{LookupConfig, UserServiceConfig};
use post_service::lifecycle::{signals, Shutdown};
use post_service::observability::logging;
use post_service::{FailurePolicy, HttpUserDirectory, UserNameLookup};

#[derive(Parser)]
#[command(name = "post-cli")]
#[command(about = "Command-line client for the post service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the post listing from a running post service
    Posts {
        #[arg(short, long, default_value = "http://localhost:8082")]
        url: String,
    },
    /// Look up one user's display name directly against the user service
    User {
        id: i64,

        #[arg(short, long, env = "USERSERVICE_BASE_URL", default_value = "http://localhost:8081")]
        url: String,

        #[arg(short, long, default_value = "retry")]
        policy: FailurePolicy,

        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init("warn");

    match cli.command {
        Commands::Posts { url } => {
            let res = reqwest::Client::new()
                .get(format!("{}/posts", url.trim_end_matches('/')))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::User { id, url, policy, timeout_secs } => {
            let directory = HttpUserDirectory::new(&UserServiceConfig {
                base_url: url,
                timeout_secs,
            })?;
            let config = LookupConfig {
                policy,
                ..LookupConfig::default()
            };

            // Ctrl+C cuts a retry pause short.
            let shutdown = Shutdown::new();
            tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

            let lookup = UserNameLookup::new(Arc::new(directory), &config, shutdown);
            match lookup.user_name(id).await? {
                Some(name) => println!("{}", name),
                None => println!("(no name)"),
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: post service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
