//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{ClientConfig, ConfigFile};
use crate::error::Result;
use crate::http::RateLimitedClient;
use crate::pagination::PaginatedCollector;
use crate::resources::FrontApi;
use futures::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = Arc::new(self.client_config()?);

        match &self.cli.command {
            Commands::Fetch {
                urls,
                lenient,
                count,
            } => self.fetch(config, urls, *lenient, *count).await,
            Commands::Get { url } => self.get(config, url).await,
            Commands::Inboxes => self.inboxes(config).await,
        }
    }

    /// Merge the config file with flags and environment
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut file = match &self.cli.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        if let Some(key) = &self.cli.api_key {
            file.api_key = Some(key.clone());
        }
        if let Some(base_url) = &self.cli.base_url {
            file.base_url = Some(base_url.clone());
        }
        if let Some(secs) = self.cli.timeout_secs {
            file.timeout_secs = Some(secs);
        }
        if let Some(retries) = self.cli.max_rate_limit_retries {
            file.max_rate_limit_retries = Some(retries);
        }

        file.into_config()
    }

    /// Collect each collection concurrently; items are printed in argument order
    async fn fetch(
        &self,
        config: Arc<ClientConfig>,
        urls: &[String],
        lenient: bool,
        count: bool,
    ) -> Result<()> {
        let client = RateLimitedClient::new(config)?;
        let collector = PaginatedCollector::new(client).fail_on_error_status(!lenient);

        let results = try_join_all(
            urls.iter()
                .map(|url| collector.collect_all::<Value>(url)),
        )
        .await?;

        let mut out = std::io::stdout().lock();
        for (url, items) in urls.iter().zip(results) {
            info!("{}: {} items", url, items.len());
            if count {
                writeln!(out, "{url}\t{}", items.len())?;
            } else {
                write_json_lines(&mut out, &items)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    async fn get(&self, config: Arc<ClientConfig>, url: &str) -> Result<()> {
        let client = RateLimitedClient::new(config)?;
        let body = client.get_bytes(url).await?;

        let mut out = std::io::stdout().lock();
        out.write_all(&body)?;
        out.flush()?;
        Ok(())
    }

    async fn inboxes(&self, config: Arc<ClientConfig>) -> Result<()> {
        let api = FrontApi::new(config)?;
        let inboxes = api.list_inboxes().await?;

        let mut out = std::io::stdout().lock();
        write_json_lines(&mut out, &inboxes)?;
        out.flush()?;
        Ok(())
    }
}

/// Write one JSON document per line
pub fn write_json_lines<W: Write, T: Serialize>(out: &mut W, items: &[T]) -> Result<()> {
    for item in items {
        serde_json::to_writer(&mut *out, item)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
