// src/cli.rs

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::message::{Message, Role};
use crate::services::conversation::{Conversation, HttpTransport};

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

#[derive(Parser, Debug)]
#[command(name = "gemma-chat")]
#[command(about = "Chat proxy and terminal client for a Gemma model backend")]
#[command(
    long_about = "Runs the chat proxy that relays POST /api/chat to the model backend, \
or a terminal chat client that talks to a running proxy.\n\n\
Environment Variables:\n\
  BACKEND_API_URL   Model backend base URL (defaults to http://localhost:8000)\n\
  PORT              Port the proxy listens on (defaults to 3000)\n\
  RUST_LOG          Log filter (defaults to gemma_chat=info,tower_http=info)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the chat proxy (default)
    Serve {
        /// Model backend base URL, overrides BACKEND_API_URL
        #[arg(long, value_name = "URL")]
        backend_url: Option<String>,
        /// Listening port, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Chat with the model from the terminal
    Chat {
        /// Base URL of a running proxy
        #[arg(long, value_name = "URL", default_value = DEFAULT_PROXY_URL)]
        proxy_url: String,
    },
}

pub fn render_message(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "Vous",
        Role::Assistant => "Gemma",
    };
    format!("[{}] {}: {}", message.time_label(), speaker, message.content)
}

pub async fn run_chat(proxy_url: &str) -> anyhow::Result<()> {
    let transport = HttpTransport::new(proxy_url);
    tracing::info!(endpoint = transport.endpoint(), "starting terminal chat");

    let convo = Conversation::with_greeting(transport);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut shown = 0;

    loop {
        shown = print_new(&convo, shown, &mut stdout).await?;
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        let pending = convo.send(&line);
        tokio::pin!(pending);
        // Show the indicator only if the reply is not immediate.
        let outcome = tokio::select! {
            biased;
            outcome = &mut pending => outcome,
            _ = tokio::time::sleep(std::time::Duration::from_millis(150)) => {
                stdout.write_all("Gemma réfléchit...\n".as_bytes()).await?;
                stdout.flush().await?;
                pending.await
            }
        };

        tracing::debug!(?outcome, "send finished");
    }

    Ok(())
}

async fn print_new<T, W>(convo: &Conversation<T>, shown: usize, out: &mut W) -> anyhow::Result<usize>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let messages = convo.messages().await;
    for message in messages.iter().skip(shown) {
        out.write_all(render_message(message).as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await?;
    Ok(messages.len())
}
