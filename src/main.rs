use clap::{Parser, Subcommand};
use serde::Serialize;
use session_client::{AuthClient, AuthError, ClientConfig, ErrorCode, IdentityStore, SessionSentinel};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("health check failed")]
    Unhealthy,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "session-client", about = "Check and establish auth sessions")]
struct Cli {
    /// Overrides `SESSION_CLIENT_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `SESSION_CLIENT_SENTINEL` (`null`, `empty` or `null-or-empty`).
    #[arg(long)]
    sentinel: Option<SessionSentinel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Session,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SESSION_CLIENT_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(sentinel) = cli.sentinel {
        config = config.with_sentinel(sentinel);
    }

    let store = IdentityStore::new();
    let _watch = store.subscribe(|identity| {
        tracing::info!(email = ?identity.email, name = ?identity.name, "identity changed");
    });
    let client = AuthClient::new(config, store)?;

    let result = run(&client, cli.command).await;
    if let Err(CliError::Auth(err)) = &result {
        tracing::error!(code = err.error_code(), error = %err, "auth request failed");
    }
    result
}

async fn run(client: &AuthClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Ping => run_ping(client).await,
        Command::Session => {
            let identity = client.refresh_session().await?;
            print_json(&identity)
        }
        Command::Login { email, password } => {
            let reply = client.login(&email, &password).await?;
            print_json(&reply)?;
            print_json(&client.store().get())
        }
    }
}

async fn run_ping(client: &AuthClient) -> Result<(), CliError> {
    if !client.health().await? {
        return Err(CliError::Unhealthy);
    }
    println!("ok");
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
