use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::clients::user_api::UserApiClient;

#[derive(Parser)]
#[command(name = "user-mcp-gateway")]
#[command(about = "User MCP Gateway - Admin CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Health check the gateway
    Health {
        /// Gateway URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting the gateway
        #[arg(long)]
        validate: bool,
    },
    /// Show gateway status and configuration
    Status {
        /// Gateway URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Test user API connectivity
    TestUsers {
        /// User API base URL
        #[arg(short, long)]
        url: Option<String>,
        /// Optional name filter to query with
        #[arg(short, long)]
        name: Option<String>,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Gateway is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::TestUsers { url, name } => match test_users(url, name.as_deref()).await {
            Ok(_) => {
                println!("✅ User API test passed");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ User API test failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<(), Box<dyn std::error::Error>> {
    let config = crate::infra::config::Config::from_env();

    let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
    if !matches!(mode.as_str(), "server" | "stdio") {
        return Err(format!("Invalid MODE: {}. Must be 'server' or 'stdio'", mode).into());
    }

    if mode == "server" {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        if port == 0 {
            return Err("PORT cannot be 0".into());
        }
    }

    if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://") {
        return Err(format!(
            "Invalid USER_API_BASE_URL: {}. Must be an http(s) URL",
            config.api_base_url
        )
        .into());
    }

    Ok(())
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    // Health check
    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    // Try to get tools list through the RPC shim
    let tools_response = client
        .post(format!("{}/v1/tools", url))
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match tools_response {
        Ok(resp) if resp.status().is_success() => {
            println!("🔧 Tools: ✅ Available");
        }
        Ok(resp) => {
            println!("🔧 Tools: ❌ HTTP {}", resp.status());
        }
        Err(_) => {
            println!("🔧 Tools: ❌ Unavailable");
        }
    }

    // Configuration summary
    println!("\n📋 Configuration:");
    println!(
        "  Mode: {}",
        std::env::var("MODE").unwrap_or_else(|_| "server".into())
    );
    println!(
        "  Port: {}",
        std::env::var("PORT").unwrap_or_else(|_| "8080".into())
    );
    println!(
        "  Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );
    println!(
        "  User API: {}",
        std::env::var("USER_API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into())
    );

    Ok(())
}

async fn test_users(url: Option<String>, name: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let api_url = url
        .or_else(|| std::env::var("USER_API_BASE_URL").ok())
        .ok_or("No user API URL provided")?;

    let client = UserApiClient::new(api_url);

    if !client.health().await {
        return Err("user API health check failed".into());
    }

    let users = match name {
        Some(n) => client.list_users_by_name(n).await?,
        None => client.list_users().await?,
    };

    println!("👥 Found {} users:", users.len());
    for (i, user) in users.iter().enumerate() {
        println!("  {}. {} <{}> ({})", i + 1, user.name, user.email, user.id);
    }

    Ok(())
}
