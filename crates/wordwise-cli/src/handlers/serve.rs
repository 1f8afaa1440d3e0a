//! Serve command handler

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use crate::server::{self, AppState, RouterSettings};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};
use wordwise_core::{DictionaryClient, JsonFileStore};

/// Server settings after command-line flags are laid over the config
#[derive(Debug, Clone, PartialEq)]
struct ServeSettings {
    bind: String,
    port: u16,
    static_dir: PathBuf,
    saved_words: PathBuf,
    allowed_origins: Vec<String>,
}

impl ServeSettings {
    fn resolve(args: &ServeArgs, config: &Config) -> Self {
        Self {
            bind: args.bind.clone().unwrap_or_else(|| config.server.bind.clone()),
            port: args.port.unwrap_or(config.server.port),
            static_dir: args
                .static_dir
                .clone()
                .unwrap_or_else(|| config.server.static_dir.clone()),
            saved_words: args
                .saved_words
                .clone()
                .unwrap_or_else(|| config.storage.saved_words_file.clone()),
            allowed_origins: if args.allowed_origins.is_empty() {
                config.server.allowed_origins.clone()
            } else {
                args.allowed_origins.clone()
            },
        }
    }

    fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Handle the serve command
#[instrument(skip_all)]
pub async fn handle_serve(args: ServeArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let settings = ServeSettings::resolve(&args, config);
    let client = DictionaryClient::new(config.dictionary_config(args.api_key.as_deref())?)?;
    let store = JsonFileStore::new(&settings.saved_words);

    let app = server::router(
        AppState::new(Arc::new(client), Arc::new(store)),
        &RouterSettings {
            allowed_origins: settings.allowed_origins.clone(),
            static_dir: settings.static_dir.clone(),
        },
    )?;

    let address = settings.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| Error::server(format!("Failed to bind {}: {}", address, e)))?;

    info!(
        address = %address,
        saved_words = %settings.saved_words.display(),
        static_dir = %settings.static_dir.display(),
        origins = ?settings.allowed_origins,
        "Starting server"
    );
    output.success(&format!("Server starting on {}", address))?;

    server::serve(listener, app).await?;
    output.info("Server stopped")?;
    Ok(())
}
