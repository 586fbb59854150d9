use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use kbchat::{
    app::load_config,
    cli::{handle_command, Cli, OutputFormat},
    kb::{BedrockKbClient, QueryDispatcher},
    session::Conversation,
    tui::{run_ui, App},
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up BEDROCK_KB_ID / MODEL_ARN from a local .env if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Some(command) = &cli.command {
        if handle_command(command)? {
            return Ok(());
        }
    }

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        let toml_str = std::fs::read_to_string(config_path)?;
        toml::from_str(&toml_str)?
    } else {
        load_config()?
    };

    // CLI flags win over environment and config files
    if let Some(kb_id) = cli.kb_id.clone() {
        config.kb_id = kb_id;
    }
    if let Some(model_arn) = cli.model_arn.clone() {
        config.model_arn = model_arn;
    }

    if !config.has_required_ids() {
        warn!("BEDROCK_KB_ID or MODEL_ARN not set; queries will fail until configured");
    }

    let client = BedrockKbClient::new(&config)?;
    info!("Bedrock agent-runtime client ready at {}", client.endpoint());
    let dispatcher = Arc::new(QueryDispatcher::new(Arc::new(client), &config));

    if let Some(prompt) = cli.prompt.clone() {
        return run_non_interactive(dispatcher, prompt, cli.output_format).await;
    }

    run_ui(App::new(config, dispatcher)).await
}

/// Answer a single question and print the result
async fn run_non_interactive(
    dispatcher: Arc<QueryDispatcher>,
    prompt: String,
    output_format: OutputFormat,
) -> Result<()> {
    let mut conversation = Conversation::new(dispatcher);
    if !conversation.submit(&prompt).await {
        anyhow::bail!("Question must not be empty");
    }
    let answer = conversation.last_answer().unwrap_or_default().to_string();

    match output_format {
        OutputFormat::Text => println!("{}", answer),
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "question": prompt.trim(),
                "answer": answer,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
