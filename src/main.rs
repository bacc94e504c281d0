//! Pitchline CLI - interactive sales conversation loop.
//!
//! Reads one line of user input per turn, re-classifies the conversation
//! stage, and prints the agent's reply. Exits on `quit`, `exit`, or `bye`
//! (case-insensitive). The agent speaks first.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pitchline::adapters::ai::{AnthropicConfig, AnthropicProvider, OpenAiConfig, OpenAiProvider};
use pitchline::adapters::catalog::{FileCatalog, ProductSearchTool};
use pitchline::application::ConversationController;
use pitchline::config::{AiConfig, AiProvider, AppConfig, ValidationError};
use pitchline::domain::conversation::StageRegistry;
use pitchline::domain::tools::ToolRegistry;
use pitchline::ports::CompletionModel;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let model = build_provider(&config.ai)?;
    info!(
        provider = %model.provider_info().name,
        model = %model.provider_info().model,
        "provider ready"
    );

    let persona = config.agent.persona.clone();
    let registry = StageRegistry::default();

    let mut controller = if persona.tools_enabled {
        let path = persona
            .catalog_reference
            .clone()
            .ok_or(ValidationError::CatalogRequired)?;
        let catalog = Arc::new(FileCatalog::load(path)?);
        let tools = ToolRegistry::new().with_tool(Arc::new(ProductSearchTool::new(catalog)));
        ConversationController::with_tools(model, persona, registry, tools)
            .with_max_plan_steps(config.agent.max_tool_steps)
    } else {
        ConversationController::new(model, persona, registry)
    }
    .with_initial_stage(config.agent.initial_stage);

    controller.seed();

    println!(
        "{} from {} is on the line. Type quit, exit, or bye to hang up.",
        controller.persona().agent_name,
        controller.persona().company_name
    );
    println!("{}", "=".repeat(50));

    // The agent opens the call.
    let opening = controller.step().await?;
    println!("{}", opening.text());

    let stdin = io::stdin();
    loop {
        print!("User: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_word(input) {
            break;
        }

        controller.human_turn(input);
        controller.determine_stage().await?;
        let reply = controller.step().await?;
        println!("{}", reply.text());
    }

    Ok(())
}

/// Builds the configured completion model.
fn build_provider(config: &AiConfig) -> Result<Arc<dyn CompletionModel>, ValidationError> {
    match config.provider {
        AiProvider::Anthropic => {
            let key = config
                .anthropic_api_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("ANTHROPIC_API_KEY"))?;
            let mut provider_config =
                AnthropicConfig::new(key.expose_secret().clone()).with_timeout(config.timeout());
            if let Some(model) = &config.model {
                provider_config = provider_config.with_model(model.clone());
            }
            Ok(Arc::new(AnthropicProvider::new(provider_config)))
        }
        AiProvider::OpenAI => {
            let key = config
                .openai_api_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;
            let mut provider_config =
                OpenAiConfig::new(key.expose_secret().clone()).with_timeout(config.timeout());
            if let Some(model) = &config.model {
                provider_config = provider_config.with_model(model.clone());
            }
            Ok(Arc::new(OpenAiProvider::new(provider_config)))
        }
    }
}

/// Case-insensitive check for the words that end the conversation.
fn is_exit_word(input: &str) -> bool {
    ["quit", "exit", "bye"]
        .iter()
        .any(|word| input.eq_ignore_ascii_case(word))
}
