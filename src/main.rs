use std::path::PathBuf;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use campus_bot::domains::event::{ChatEvent, MessageHandle};
use campus_bot::domains::keyboard::{ButtonAction, Keyboard};
use campus_bot::error::{CampusBotError, Result};
use campus_bot::interfaces::transport::ChatTransport;
use campus_bot::{CampusBot, Config};

#[derive(Parser, Debug)]
#[command(name = "campus-bot")]
#[command(about = "College assistant bot, driven from a local console loop")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "cli_user")]
    user_id: String,

    #[arg(long, env = "CAMPUS_BOT_TOKEN")]
    token: Option<String>,
}

/// Console stand-in for the real chat transport: messages go to stdout,
/// keyboards print as `[label -> payload]` rows, and `:payload` input plays
/// back a button press on the last delivered message.
struct ConsoleTransport {
    next_id: AtomicI64,
}

impl ConsoleTransport {
    fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
        }
    }

    fn last_handle(&self) -> MessageHandle {
        MessageHandle(self.next_id.load(Ordering::SeqCst) - 1)
    }

    fn print(&self, text: &str, keyboard: Option<&Keyboard>) {
        println!("\n{}", text);
        if let Some(keyboard) = keyboard {
            for row in &keyboard.rows {
                let rendered: Vec<String> = row
                    .iter()
                    .map(|b| match &b.action {
                        ButtonAction::Callback(payload) => {
                            format!("[{} -> :{}]", b.label, payload)
                        }
                        ButtonAction::Url(url) => format!("[{} -> {}]", b.label, url),
                    })
                    .collect();
                println!("  {}", style(rendered.join(" ")).dim());
            }
        }
    }
}

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn send_message(
        &self,
        _user_id: &str,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<MessageHandle> {
        self.print(text, keyboard.as_ref());
        Ok(MessageHandle(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn edit_message(
        &self,
        _message: &MessageHandle,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()> {
        self.print(text, keyboard.as_ref());
        Ok(())
    }

    async fn ack_button(&self, _message: &MessageHandle, alert: Option<&str>) -> Result<()> {
        if let Some(alert) = alert {
            println!("{}", style(alert).red());
        }
        Ok(())
    }
}

fn parse_input(user_id: &str, line: &str, transport: &ConsoleTransport) -> Option<ChatEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(command) = line.strip_prefix('/') {
        return Some(ChatEvent::Command {
            user_id: user_id.to_string(),
            name: command.split_whitespace().next().unwrap_or("").to_string(),
            first_name: None,
        });
    }
    if let Some(payload) = line.strip_prefix(':') {
        return Some(ChatEvent::ButtonPress {
            user_id: user_id.to_string(),
            payload: payload.to_string(),
            message: transport.last_handle(),
        });
    }
    Some(ChatEvent::Text {
        user_id: user_id.to_string(),
        text: line.to_string(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.token.is_some() {
        config.token = cli.token.clone();
    }

    let transport = Arc::new(ConsoleTransport::new());
    let bot = CampusBot::with_in_memory_store(config, transport.clone());

    bot.handle_event(ChatEvent::Command {
        user_id: cli.user_id.clone(),
        name: "start".to_string(),
        first_name: None,
    })
    .await?;
    println!(
        "{}",
        style("(введите текст, /команду, :payload кнопки или exit)").dim()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = lines
            .next_line()
            .await
            .map_err(|e| CampusBotError::Runtime(e.to_string()))?;
        let Some(line) = line else { break };
        if line.trim() == "exit" || line.trim() == "quit" {
            break;
        }
        if let Some(event) = parse_input(&cli.user_id, &line, &transport) {
            bot.handle_event(event).await?;
        }
    }
    Ok(())
}
