//! Application state shared by the command handlers

use crate::cli::{Cli, OutputFormat};
use anyhow::Context;
use loyalty_engine::FormPolicies;
use loyalty_networking::LoyaltyClient;
use loyalty_persistence::{ClientStore, Database};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Everything a command needs: the backend client, the client store and output settings
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: LoyaltyClient,
    pub store: ClientStore,
    pub policies: FormPolicies,
    pub data_dir: PathBuf,
    pub format: OutputFormat,
    /// Emit 24-bit ANSI colour in table output
    pub colour: bool,
}

impl AppState {
    /// Build the client and open the client store under the data directory
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
        let db_path = data_dir.join("console.db");
        let db = Database::connect(&db_path)
            .await
            .with_context(|| format!("failed to open client store at {}", db_path.display()))?;

        let client = LoyaltyClient::new(&cli.api_url)
            .with_context(|| format!("invalid API url '{}'", cli.api_url))?;

        tracing::debug!("Client store at {}", db_path.display());

        Ok(Self {
            client,
            store: ClientStore::new(&db),
            policies: cli.policies(),
            data_dir,
            format: cli.format,
            colour: cli.format == OutputFormat::Table
                && std::io::stdout().is_terminal()
                && std::env::var_os("NO_COLOR").is_none(),
        })
    }

    /// State over an existing store, without colour
    pub fn with_parts(client: LoyaltyClient, store: ClientStore, format: OutputFormat) -> Self {
        Self {
            client,
            store,
            policies: FormPolicies::default(),
            data_dir: PathBuf::from("."),
            format,
            colour: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .map(|p| p.join("LoyaltyConsole"))
        .unwrap_or_else(|| PathBuf::from("."))
}
