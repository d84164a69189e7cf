mod config;
mod display;
mod error;
mod form;
mod parser;
mod session;
mod store;
mod tracker;
mod web;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, Cli, Command};
use display::{format_score, format_server, print_log};
use form::LogActionRequest;
use session::MatchSession;
use store::LogStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Web mode
    if let Command::Web { port, bind } = cli.command {
        let config = AppConfig {
            log_dir: cli.log_dir,
            bind,
            port,
        };

        println!("Starting web server on port {}...", config.port);
        println!("Logs are stored in {}", config.log_dir.display());
        println!("Access the site at http://localhost:{}", config.port);

        web::start_server(config).await?;
        return Ok(());
    }

    // CLI mode
    let store = LogStore::open(&cli.log_dir)?;

    match cli.command {
        Command::Web { .. } => {}
        Command::List => {
            let logs = store.list()?;
            if logs.is_empty() {
                println!("No logs in {}", store.dir().display());
            }
            for name in logs {
                println!("{}", name);
            }
        }
        Command::New { name } => {
            let name = store.create(name.as_deref())?;
            println!("Created {}", store.dir().join(name).display());
        }
        Command::Show { name } => {
            let session = MatchSession::open(&store, &name)?;
            print_log(&session.log_name, &session.entries, &session.state);
        }
        Command::Log { name, timestamp, player, team, action, rotation } => {
            let mut active = None;
            session::select(&mut active, &store, &name)?;

            let req = LogActionRequest { timestamp, player, team, action, rotation };
            let record = session::log_action(&mut active, &store, &req)?;

            println!("Action logged! (rally {})", record.rally);
            if let Some(session) = &active {
                println!("Score: {}", format_score(&session.state));
                println!("Serving: {}", format_server(session.state.serve_team));
            }
        }
    }

    Ok(())
}
