//! avia - terminal chat client for the aviation assistant

mod config;
mod ui;

use clap::Parser;
use std::sync::Arc;

use avia_chat::{ChatSession, HttpTransport, Sender, Submission};

/// avia - aviation assistant chat client
#[derive(Parser, Debug)]
#[command(name = "avia")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat endpoint URL (default: http://localhost:8080/api/chat)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Send a single message and print the reply
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("avia=debug")
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file
    let cfg = config::Config::load();

    // Merge config with CLI args (CLI takes precedence)
    let endpoint = args
        .endpoint
        .or(cfg.endpoint.clone())
        .unwrap_or_else(|| avia_client::DEFAULT_ENDPOINT.to_string());

    tracing::debug!("chat endpoint: {}", endpoint);

    let transport = Arc::new(HttpTransport::new(endpoint));
    let session = ChatSession::new(transport);

    // Non-interactive mode
    if let Some(message) = args.command {
        return run_command(&session, &message).await;
    }

    // TUI mode
    let use_tui = !args.no_tui && cfg.tui.unwrap_or(true);
    if use_tui {
        return ui::run_tui(session).await;
    }

    // Interactive mode (simple stdin/stdout)
    run_interactive(session).await
}

/// Send one message and print the reply
async fn run_command(session: &ChatSession, message: &str) -> anyhow::Result<()> {
    if session.submit(message).await == Submission::Ignored {
        anyhow::bail!("message is empty");
    }

    if let Some(reply) = session.messages().last() {
        println!("{}", reply.text);
    }
    Ok(())
}

/// Plain prompt/reply loop on stdin/stdout
async fn run_interactive(session: ChatSession) -> anyhow::Result<()> {
    use std::io::{self, Write};

    println!("Aviation Assistant");
    println!("==================");
    println!("Type 'exit' to quit\n");

    if let Some(welcome) = session.messages().first() {
        println!("Bot: {}\n", welcome.text);
    }

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }
        if input.is_empty() {
            continue;
        }

        session.submit(input).await;

        if let Some(reply) = session.messages().last() {
            if reply.sender == Sender::Bot {
                println!("\nBot: {}\n", reply.text);
            }
        }
    }

    Ok(())
}
