//! Basic command-line chatbot.
//!
//! Reads one line of input, sends it to a chat-completions endpoint, prints
//! the reply.
//!
//! Usage:
//!     chatbot --api-key <key>
//!     chatbot --use-azure
//!
//! The Azure path reads AZURE_OPENAI_API_KEY, AZURE_OPENAI_ENDPOINT,
//! AZURE_OPENAI_DEPLOYMENT and optionally AZURE_OPENAI_API_VERSION.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chatbot::config::{AzureConfig, ConfigError, SarvamConfig};
use chatbot::llm::ChatClient;

/// Basic Sarvam AI chatbot.
#[derive(Parser, Debug)]
#[command(name = "chatbot", about = "Basic Sarvam AI chatbot", version)]
struct Cli {
    /// Your Sarvam AI API key.
    #[arg(long)]
    api_key: Option<String>,

    /// Use Azure OpenAI instead of Sarvam. Requires AZURE_OPENAI_API_KEY,
    /// AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_DEPLOYMENT environment
    /// variables.
    #[arg(long)]
    use_azure: bool,
}

fn build_client(args: Cli) -> Result<ChatClient, ConfigError> {
    if args.use_azure {
        let config = AzureConfig::from_env()?;
        info!(deployment = %config.deployment, "using Azure OpenAI provider");
        Ok(ChatClient::azure(config))
    } else {
        let api_key = args.api_key.ok_or(ConfigError::MissingApiKey)?;
        info!("using Sarvam provider");
        Ok(ChatClient::sarvam(SarvamConfig::new(api_key)))
    }
}

fn read_user_input() -> io::Result<String> {
    print!("You: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();

    // Credentials are resolved before prompting so a misconfigured
    // invocation fails without a network call.
    let client = match build_client(args) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("An error occurred: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Chatbot initialized. Enter your question.");
    let user_input = match read_user_input() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("An error occurred: {e}");
            return ExitCode::FAILURE;
        }
    };

    // An empty message is simply not sent.
    if user_input.is_empty() {
        return ExitCode::SUCCESS;
    }

    match client.complete(&user_input).await {
        Ok(reply) => {
            println!("Bot: {}", reply.text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("An error occurred: {e}");
            ExitCode::FAILURE
        }
    }
}
