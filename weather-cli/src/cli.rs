use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use weather_core::{
    Config, ForecastClient, GeocodingClient, Orchestrator, SearchState, View, clients_from_config,
};

use crate::terminal::TerminalView;

type OpenMeteoSearch = Orchestrator<GeocodingClient, ForecastClient>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search repeatedly, starting with the default city.
    Interactive,

    /// Show the current weather for one city.
    Show {
        /// City name; the configured default city when absent.
        city: Vec<String>,
    },

    /// Set the default city and geocoding language.
    Configure,

    /// Print the location of the configuration file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        self.run_with(Config::load).await
    }

    /// Config is only loaded by the commands that use it, so `config-path`
    /// still works when the file is broken.
    async fn run_with(
        self,
        load_config: impl Fn() -> anyhow::Result<Config>,
    ) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => {
                let config = load_config()?.with_env_overrides();
                let orchestrator = orchestrator(&config);
                interactive(&orchestrator, &TerminalView::stdout(), config.default_city()).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city } => {
                let config = load_config()?.with_env_overrides();
                let query = city.join(" ");
                let query = initial_query(&query, config.default_city());
                let state = orchestrator(&config)
                    .submit(query, &TerminalView::stdout())
                    .await;

                Ok(match state {
                    SearchState::Displaying(_) => ExitCode::SUCCESS,
                    _ => ExitCode::FAILURE,
                })
            }
            Command::Configure => {
                // The file config, without environment overrides, is what gets saved.
                let mut config = load_config()?;
                configure(&mut config).await?;
                let path = config.save()?;
                println!("Configuração salva em {}", path.display());
                Ok(ExitCode::SUCCESS)
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn orchestrator(config: &Config) -> OpenMeteoSearch {
    let (geocoder, weather) = clients_from_config(config);
    Orchestrator::new(geocoder, weather)
}

/// An empty query is replaced by the default city.
fn initial_query<'a>(query: &'a str, default_city: &'a str) -> &'a str {
    if query.trim().is_empty() { default_city } else { query }
}

/// Search the default city once, then prompt until the user cancels.
async fn interactive(
    orchestrator: &OpenMeteoSearch,
    view: &dyn View,
    default_city: &str,
) -> anyhow::Result<()> {
    let mut query = initial_query("", default_city).to_string();

    loop {
        orchestrator.submit(&query, view).await;

        let answer = prompt(|| {
            Text::new("Cidade:")
                .with_help_message("Enter para buscar, Esc para sair")
                .prompt()
        })
        .await?;

        match answer {
            Ok(next) => query = next,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to read city from prompt"),
        }
    }
}

/// Run a blocking `inquire` prompt off the async worker threads.
async fn prompt<T, F>(ask: F) -> anyhow::Result<Result<T, InquireError>>
where
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(ask)
        .await
        .context("Prompt task panicked")
}

async fn configure(config: &mut Config) -> anyhow::Result<()> {
    let current_city = config.default_city().to_string();
    let city = prompt(move || {
        Text::new("Cidade padrão:")
            .with_default(&current_city)
            .prompt()
    })
    .await?
    .context("Failed to read default city")?;
    config.set_default_city(&city);

    let current_language = config.language().to_string();
    let language = prompt(move || {
        Text::new("Idioma da busca:")
            .with_default(&current_language)
            .with_help_message("Código de idioma enviado ao serviço de geocodificação, ex.: pt, en")
            .prompt()
    })
    .await?
    .context("Failed to read language")?;
    config.set_language(&language);

    Ok(())
}
