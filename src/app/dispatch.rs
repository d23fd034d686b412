use crate::chat::ChatService;
use crate::cli::{Cli, Commands};
use anyhow::Result;
use tracing::info;

use crate::Config;
use crate::app::status::render_status;

/// One-shot question through the same flow the gateway uses.
async fn run_ask(config: &Config, question: &str, session: Option<&str>) -> Result<()> {
    let chat = ChatService::from_config(config)?;
    let answer = chat.ask(Some(question), session).await?;
    println!("{answer}");
    Ok(())
}

async fn run_clear(config: &Config, session: &str) -> Result<()> {
    let chat = ChatService::from_config(config)?;
    chat.clear(Some(session)).await?;
    println!("✓ Session '{session}' cleared");
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting CryptoBrain gateway on {host} (random port)");
            } else {
                info!("Starting CryptoBrain gateway on {host}:{port}");
            }
            crate::gateway::run_gateway(&host, port, config).await
        }

        Commands::Ask { question, session } => {
            run_ask(&config, &question, session.as_deref()).await
        }

        Commands::Clear { session } => run_clear(&config, &session).await,

        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}
