use crate::gateway::ConsoleGateway;
use crate::settings::Settings;
use anyhow::{bail, Context};
use hunt_core::command::HuntBot;
use hunt_core::lookup::PokeApiClient;
use hunt_core::registry::Registry;
use hunt_core::store::JsonFileStore;
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct ServeOptions {
    pub token: Option<String>,
    pub port: Option<u16>,
    pub no_keepalive: bool,
}

pub fn run(settings: Settings, opts: ServeOptions) -> anyhow::Result<()> {
    let Some(token) = opts.token.filter(|t| !t.trim().is_empty()) else {
        bail!("DISCORD_TOKEN is not set; pass --token or export DISCORD_TOKEN");
    };
    tracing::debug!(token_len = token.len(), "bot token present");

    // Commands run one at a time on a single thread.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        let config = settings.config;

        if config.keepalive.enabled && !opts.no_keepalive {
            let port = opts.port.unwrap_or(config.keepalive.port);
            tokio::spawn(async move {
                if let Err(e) = hunt_server::serve(port).await {
                    tracing::error!(error = %e, "keep-alive listener stopped");
                }
            });
        }

        let lookup =
            PokeApiClient::new(&config.lookup).context("failed to build lookup client")?;
        tracing::info!(data_file = %settings.data_file.display(), "opening hunt registry");
        let registry = Registry::open(JsonFileStore::new(&settings.data_file));
        let mut bot = HuntBot::new(registry, lookup, config.prefix.clone(), config.random_pool);
        let mut gateway = ConsoleGateway::new(config.prefix, &config.admins);

        tracing::info!("shinybot ready, reading commands from stdin");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match gateway.dispatch(&mut bot, &line).await {
                Ok(Some(reply)) => println!("{reply}"),
                Ok(None) => {}
                Err(e) => tracing::warn!("skipping line: {e:#}"),
            }
        }
        tracing::info!("stdin closed, shutting down");
        Ok::<(), anyhow::Error>(())
    })
}
