mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hubview_core::{
    config::{self, Config},
    github::{GraphQLProvider, HttpGraphQLClient},
    state::AppState,
};
use hubview_tui::Theme;
use std::{path::PathBuf, process::ExitCode, sync::Arc};

#[derive(Parser)]
#[command(version, about = "Browse the latest issues of a GitHub repository")]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial ORG/REPO shown in the search field
    #[arg(short, long)]
    path: Option<String>,

    /// GraphQL endpoint to query instead of the configured one
    #[arg(long)]
    endpoint: Option<String>,

    /// Log file verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest issues once and print them
    Fetch {
        /// ORG/REPO to query (default: --path or the configured default)
        path: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_errors = matches!(cli.command, Some(Commands::Fetch { json: true, .. }));

    if let Err(e) = logging::setup_logging(cli.log_level) {
        eprintln!("warning: logging disabled: {e}");
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            log::error!("failed to load config: {error:#}");
            let cli_error = cli::CliError::system(format!("{error:#}"));
            cli::print_error(&cli_error, json_errors);
            return ExitCode::from(cli_error.code());
        }
    };

    let result = match &cli.command {
        Some(Commands::Fetch { path, json }) => build_provider(&config, &cli)
            .map_err(cli::CliError::from)
            .and_then(|provider| {
                let path = path
                    .as_deref()
                    .or(cli.path.as_deref())
                    .unwrap_or(&config.default_path);
                cli::cmd_fetch(provider.as_ref(), path, *json)
            })
            .map(cli::FetchStatus::exit_code),
        None => run_tui(&config, &cli).map(|()| 0).map_err(cli::CliError::from),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            cli::print_error(&error, json_errors);
            ExitCode::from(error.code())
        }
    }
}

/// One client for the whole process, configured from file, CLI and environment.
fn build_provider(config: &Config, cli: &Cli) -> Result<Arc<dyn GraphQLProvider>> {
    let mut client_config = config.client_config();
    if let Some(endpoint) = &cli.endpoint {
        client_config.base_url.clone_from(endpoint);
    }
    log::info!("using endpoint {}", client_config.base_url);
    let client = HttpGraphQLClient::new(client_config).context("failed to build GitHub client")?;
    Ok(Arc::new(client))
}

fn run_tui(config: &Config, cli: &Cli) -> Result<()> {
    let provider = build_provider(config, cli)?;
    let initial_path = cli.path.clone().unwrap_or_else(|| config.default_path.clone());
    let mut state = AppState::new(initial_path);
    let theme = Theme::from_config(&config.theme);

    let mut terminal = ratatui::init();
    let result = hubview_tui::run(&mut terminal, &mut state, &provider, &theme, &config.keys);
    ratatui::restore();

    result
}
