use anyhow::Result;
use colored::Colorize;

use crate::app::{get_config_dir, init_config, load_config};

use super::Commands;

/// Handle CLI subcommands. Returns true when the command was terminal and
/// the chat interface should not start.
pub fn handle_command(command: &Commands) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing kbchat configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status()?;
            Ok(true)
        }
        Commands::Chat => Ok(false), // Continue to the chat interface
    }
}

/// Show version information
pub fn show_version() {
    println!("kbchat v{}", env!("CARGO_PKG_VERSION"));
    println!("   Terminal chat for Amazon Bedrock knowledge bases");
}

/// Report configuration and environment readiness
fn show_status() -> Result<()> {
    let config = load_config().unwrap_or_default();

    println!("kbchat status:");
    println!();

    print_identifier("BEDROCK_KB_ID", &config.kb_id);
    print_identifier("MODEL_ARN", &config.model_arn);
    println!("  Region: {}", config.region);
    if let Some(endpoint) = &config.endpoint {
        println!("  Endpoint override: {}", endpoint);
    }

    if std::env::var("AWS_BEARER_TOKEN_BEDROCK").is_ok() {
        println!("  {} AWS_BEARER_TOKEN_BEDROCK: Set", "[OK]".green());
    } else {
        println!(
            "  {} AWS_BEARER_TOKEN_BEDROCK: Not set (requests go out unsigned)",
            "[WARNING]".yellow()
        );
    }

    match get_config_dir() {
        Ok(dir) => {
            let config_path = dir.join("config.toml");
            if config_path.exists() {
                println!("  {} Configuration: {}", "[OK]".green(), config_path.display());
            } else {
                println!(
                    "  {} Configuration: Not found (using defaults)",
                    "[WARNING]".yellow()
                );
            }
        }
        Err(_) => println!("  {} Configuration directory unavailable", "[ERROR]".red()),
    }

    println!();
    Ok(())
}

fn print_identifier(name: &str, value: &str) {
    if value.is_empty() {
        println!("  {} {}: {}", "[ERROR]".red(), name, "Not Set".red());
    } else {
        println!("  {} {}: {}", "[OK]".green(), name, value);
    }
}
