mod cmd;
mod gateway;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use cmd::serve::ServeOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shinybot",
    about = "Shiny hunt tracker bot: per-user hunt lists with type lookup",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ./shinybot.yaml when present)
    #[arg(long, global = true, env = "SHINYBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Hunt data file (overrides `data_file` from the config)
    #[arg(long, global = true, env = "SHINYBOT_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot: keep-alive listener plus commands read from stdin
    Serve {
        /// Bot token
        #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Keep-alive port (overrides `keepalive.port`)
        #[arg(long)]
        port: Option<u16>,

        /// Don't start the keep-alive listener
        #[arg(long)]
        no_keepalive: bool,
    },

    /// Print every stored hunt list as JSON
    Export,

    /// Summarize stored users and their hunt counts
    Users,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = settings::resolve(cli.config.as_deref(), cli.data_file.as_deref()).and_then(
        |settings| match cli.command {
            Commands::Serve {
                token,
                port,
                no_keepalive,
            } => cmd::serve::run(
                settings,
                ServeOptions {
                    token,
                    port,
                    no_keepalive,
                },
            ),
            Commands::Export => cmd::export::run(&settings.data_file),
            Commands::Users => cmd::users::run(&settings.data_file, cli.json),
        },
    );

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
