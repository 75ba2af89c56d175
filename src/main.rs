use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retrochat::commands::{InputLine, SlashCommand, get_help_text, parse_line};
use retrochat::{
    AssistantGateway, ChatWidget, Config, GeminiClient, KnowledgeBase, Message, Theme, WidgetState,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "retrochat")]
#[command(version)]
#[command(about = "Ask questions about a portfolio owner's resume and projects", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.retrochat/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Knowledge base JSON file with `resume` and `projects` keys
    #[arg(long, global = true)]
    knowledge: Option<PathBuf>,

    /// Colour palette token
    #[arg(long, global = true)]
    theme: Option<Theme>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session (default)
    Chat,
    /// Ask a single question and print the answer
    Ask { question: String },
    /// Print the system instruction that would be sent for a question
    Prompt { question: String },
}

fn load_knowledge(cli_path: Option<&Path>, config: &Config) -> Result<KnowledgeBase> {
    if let Some(path) = cli_path {
        return KnowledgeBase::load(path);
    }
    let path = config.knowledge_path();
    if path.exists() {
        KnowledgeBase::load(&path)
    } else {
        tracing::warn!(
            path = %path.display(),
            "No knowledge base found, the assistant will have nothing to answer from"
        );
        Ok(KnowledgeBase::empty())
    }
}

fn print_message(message: &Message) {
    println!("{}\n{}\n", message.role().label(), message.text());
}

async fn run_chat(widget: &mut ChatWidget) -> Result<()> {
    widget.open();
    print_message(&widget.messages()[0]);
    println!("{}", get_help_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        match parse_line(&line) {
            InputLine::Query(text) => {
                widget.set_draft(text);
                match widget.submit() {
                    Ok(()) => {
                        println!("PROCESSING QUERY...");
                        if let Some(reply) = widget.settle().await {
                            print_message(reply);
                        }
                    }
                    Err(err) if widget.state() == WidgetState::Closed => {
                        tracing::debug!(error = %err, "Submission ignored");
                        println!("Assistant is minimized. Type /open to resume.");
                    }
                    Err(err) => tracing::debug!(error = %err, "Submission ignored"),
                }
            }
            InputLine::Command(parsed) => match parsed.command {
                SlashCommand::Open => widget.open(),
                SlashCommand::Close => widget.close(),
                SlashCommand::Theme => match parsed.theme_target() {
                    Some(theme) => {
                        widget.set_theme(theme);
                        println!("Palette set to {}", theme);
                    }
                    None => println!("Usage: /theme <amber|pink|green|purple>"),
                },
                SlashCommand::History => {
                    for message in widget.messages() {
                        print_message(message);
                    }
                }
                SlashCommand::Help => println!("{}", get_help_text()),
                SlashCommand::Bye => break,
            },
            InputLine::UnknownCommand(keyword) => {
                println!("Unknown command /{}. Type /help for a list.", keyword);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let theme = cli.theme.unwrap_or(config.theme);
    let knowledge = Arc::new(load_knowledge(cli.knowledge.as_deref(), &config)?);

    if !config.has_api_key() {
        tracing::warn!("No API key configured; set GEMINI_API_KEY or api_key in config.toml");
    }

    let client = GeminiClient::from_config(&config).context("Failed to create HTTP client")?;
    let gateway = Arc::new(AssistantGateway::new(
        Arc::new(client),
        config.model.clone(),
        config.owner_name.clone(),
    ));

    tracing::info!(model = %config.model, theme = %theme, "Starting retrochat v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let mut widget = ChatWidget::new(gateway, knowledge, theme);
            run_chat(&mut widget).await?;
        }
        Commands::Ask { question } => {
            let mut widget = ChatWidget::new(gateway, knowledge, theme);
            widget.open();
            match widget.ask(&question).await {
                Ok(reply) => println!("{}", reply.text()),
                Err(err) => anyhow::bail!("Question rejected: {}", err),
            }
        }
        Commands::Prompt { question } => {
            println!("{}", gateway.context_for(question.trim(), &knowledge).system_instruction());
        }
    }

    Ok(())
}
