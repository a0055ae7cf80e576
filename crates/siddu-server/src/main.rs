//! siddu-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `SIDDU_*` environment variables, opens the SQLite store, and serves the
//! JSON API over HTTP.
//!
//! # Operator helpers
//!
//! ```text
//! siddu-server --generate-secret            # print a fresh jwt_secret
//! siddu-server --promote-admin me@example.com
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use rand_core::{OsRng, RngCore};
use siddu_core::{store::VerseStore, user::{Role, normalize_email}};
use siddu_server::{AppState, ServerConfig, token::TokenService};
use siddu_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Siddu Verse API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print a random 256-bit signing secret as hex and exit.
  #[arg(long)]
  generate_secret: bool,

  /// Grant the admin role to the account with this email and exit.
  #[arg(long, value_name = "EMAIL")]
  promote_admin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.generate_secret {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    println!("{}", hex::encode(bytes));
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SIDDU"))
    .build()
    .context("failed to read configuration")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if let Some(email) = cli.promote_admin {
    return promote_admin(&store, &email).await;
  }

  let secret = server_cfg
    .signing_secret()
    .context("refusing to start without a usable signing secret")?;
  let ttl = server_cfg
    .token_ttl()
    .context("invalid token lifetime")?;
  let tokens = TokenService::new(secret.as_bytes(), ttl);

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let state = AppState {
    store:  Arc::new(store),
    tokens: Arc::new(tokens),
  };
  let app = siddu_server::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn promote_admin(store: &SqliteStore, email: &str) -> anyhow::Result<()> {
  let user = store
    .get_user_by_email(normalize_email(email))
    .await
    .context("failed to look up user")?
    .with_context(|| format!("no account registered with email {email}"))?;

  store
    .set_user_role(user.id, Role::Admin)
    .await
    .context("failed to update role")?;
  tracing::info!(user = %user.id, username = %user.username, "promoted to admin");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
