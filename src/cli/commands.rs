use clap::{Parser, Subcommand};

/// `CryptoBrain` - session-aware crypto chat relay built in Rust.
#[derive(Parser, Debug)]
#[command(name = "cryptobrain")]
#[command(version)]
#[command(about = "A session-aware crypto chat relay.", long_about = None)]
pub struct Cli {
    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway (chat API + static widget)
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Ask a single question and print the answer
    Ask {
        /// The question to send
        question: String,

        /// Session to read history from and record into
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Forget every turn stored for a session
    Clear {
        /// Session id to clear
        session: String,
    },

    /// Show the resolved configuration
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ask_with_session() {
        let cli = Cli::parse_from(["cryptobrain", "ask", "quais estão baratas?", "-s", "abc"]);
        match cli.command {
            Commands::Ask { question, session } => {
                assert_eq!(question, "quais estão baratas?");
                assert_eq!(session.as_deref(), Some("abc"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["cryptobrain", "serve", "--port", "0", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Serve {
                port: Some(0),
                host: None
            }
        ));
    }
}
