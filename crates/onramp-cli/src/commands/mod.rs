//! Command implementations.

pub mod attempts;
pub mod platforms;
pub mod routes;
pub mod signup;

use std::sync::Arc;

use anyhow::Context;
use onramp_client::memory::{MemoryAuth, MemoryTable};
use onramp_client::{BackendClient, GoTrueAuth, PostgrestTable, SessionProvider, SignupStore};

use crate::cli::{BackendArgs, Cli, Command};
use crate::config::OnrampConfig;
use crate::config_handlers;

/// Runs a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Platforms => {
            print!("{}", platforms::render());
            Ok(())
        }
        Command::Routes => {
            print!("{}", routes::render());
            Ok(())
        }
        Command::Signup(args) => {
            let config = OnrampConfig::load(cli.config.as_deref())?;
            signup::run(&config, &args).await
        }
        Command::Attempts { action } => {
            let config = OnrampConfig::load(cli.config.as_deref())?;
            attempts::run(&config, action).await
        }
        Command::Config { action } => {
            config_handlers::handle_config_command(cli.config.as_deref(), action)?;
            Ok(())
        }
    }
}

/// Opens the signup store selected by the backend flags.
///
/// With credentials the session belongs to that account; otherwise the
/// first persistence call runs under an anonymous session.
pub async fn open_store(config: &OnrampConfig, backend: &BackendArgs) -> anyhow::Result<SignupStore> {
    if backend.offline {
        tracing::debug!("Using in-memory backends");
        let auth = match backend.credentials() {
            Some((user, _)) => MemoryAuth::authenticated(user),
            None => MemoryAuth::new(),
        };
        return Ok(SignupStore::new(
            SessionProvider::new(Arc::new(auth)),
            Arc::new(MemoryTable::new()),
        ));
    }

    let client = BackendClient::new(&config.backend).context("Invalid backend configuration")?;
    tracing::debug!(url = %client.base_url(), "Using hosted backend");

    let auth = Arc::new(GoTrueAuth::new(client.clone()));
    if let Some((user, password)) = backend.credentials() {
        auth.sign_in_with_password(user, password)
            .await
            .with_context(|| format!("Failed to sign in as {user}"))?;
    }

    let table = Arc::new(PostgrestTable::new(client, auth.clone()));
    Ok(SignupStore::new(SessionProvider::new(auth), table))
}
