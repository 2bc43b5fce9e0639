//! LazyTable - table pagination, filtering, and multi-select delete in the terminal.
//!
//! Two tables share one dataset: a paginated table with search and sorting,
//! and a multi-select table whose deletes must be confirmed by typing.

mod app;
mod config;
mod data;
mod error;
mod events;
mod logging;
mod selection;
mod table;
mod tasks;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};

use crate::app::App;
use crate::config::{Config, Settings};
use crate::data::Row;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::tasks::{create_task_channel, TaskMessage};
use crate::ui::{init_theme, Theme};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "lazytable", version, about)]
struct Cli {
    /// Use this configuration file instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Load rows from a JSON file instead of the built-in sample data.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Initial page size for the paginated table.
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Simulated network latency for deletes, in milliseconds.
    #[arg(long, value_name = "MS")]
    delete_delay_ms: Option<u64>,

    /// Number of rows seeded into the multi-select table.
    #[arg(long, value_name = "N")]
    multi_select_rows: Option<usize>,

    /// Write the effective settings to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file settings.
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size.max(1);
        }
        if let Some(delay) = self.delete_delay_ms {
            settings.delete_delay_ms = delay;
        }
        if let Some(rows) = self.multi_select_rows {
            settings.multi_select_rows = rows;
        }
    }
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let (settings, dataset) = match load_startup(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, critical = e.is_critical(), "Startup failed");
            anyhow::bail!(e.user_message());
        }
    };

    if cli.write_config {
        return match write_config(&cli, &settings) {
            Ok(path) => {
                println!("Wrote configuration to {}", path.display());
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Writing configuration failed");
                anyhow::bail!(e.user_message())
            }
        };
    }

    init_theme(Theme::dark());

    let (task_rx, spawner) = create_task_channel();
    let mut app = App::new(&settings, dataset, spawner);
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    let mut terminal = setup_terminal().context("Failed to set up terminal")?;
    let result = run(&mut terminal, &mut app, &events, task_rx);
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    logging::shutdown();
    result.context("Application error")
}

/// Load settings and the dataset, applying command-line overrides.
fn load_startup(cli: &Cli) -> error::Result<(Settings, Vec<Row>)> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut settings = config.settings;
    cli.apply_overrides(&mut settings);

    let dataset = match &cli.data {
        Some(path) => data::load_rows(path)?,
        None => data::sample_rows(),
    };
    if dataset.is_empty() {
        warn!("Dataset is empty");
    }

    info!(
        rows = dataset.len(),
        page_size = settings.page_size,
        delete_delay_ms = settings.delete_delay_ms,
        "Startup complete"
    );
    Ok((settings, dataset))
}

/// Save `settings` to `--config` or the default config path.
fn write_config(cli: &Cli, settings: &Settings) -> error::Result<PathBuf> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let config = Config {
        settings: settings.clone(),
    };
    config.save_to(&path)?;
    info!(path = %path.display(), "Wrote configuration");
    Ok(path)
}

fn setup_terminal() -> Result<Tui, AppError> {
    enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| AppError::terminal(e.to_string()))?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| AppError::terminal(e.to_string()))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Main event loop: draw, apply finished background tasks, then wait for input.
fn run(
    terminal: &mut Tui,
    app: &mut App,
    events: &EventHandler,
    mut task_rx: UnboundedReceiver<TaskMessage>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.view(frame))?;

        while let Ok(message) = task_rx.try_recv() {
            app.handle_task_message(message);
        }

        let event = events.next()?;
        app.update(event);

        if app.should_quit() {
            info!("Exiting main loop");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_cli_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "lazytable",
            "--config",
            "/tmp/lazytable.toml",
            "--data",
            "rows.json",
            "--page-size",
            "20",
            "--delete-delay-ms",
            "0",
            "--multi-select-rows",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/lazytable.toml")));
        assert_eq!(cli.data, Some(PathBuf::from("rows.json")));
        assert!(!cli.write_config);

        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.delete_delay_ms, 0);
        assert_eq!(settings.multi_select_rows, 5);
    }

    #[test]
    fn test_no_flags_keeps_settings() {
        let cli = Cli::try_parse_from(["lazytable"]).unwrap();
        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_startup_with_files() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[settings]\ndelete_delay_ms = 50\n").unwrap();
        let data_path = dir.path().join("rows.json");
        std::fs::write(
            &data_path,
            r#"[{"id": "1", "name": "Only Row", "category": "Test"}]"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "lazytable",
            "--config",
            config_path.to_str().unwrap(),
            "--data",
            data_path.to_str().unwrap(),
        ])
        .unwrap();

        let (settings, rows) = load_startup(&cli).unwrap();
        assert_eq!(settings.delete_delay_ms, 50);
        assert_eq!(rows, vec![Row::new("1", "Only Row", "Test")]);
    }

    #[test]
    fn test_write_config_saves_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        let cli = Cli::try_parse_from([
            "lazytable",
            "--config",
            config_path.to_str().unwrap(),
            "--page-size",
            "20",
            "--write-config",
        ])
        .unwrap();
        assert!(cli.write_config);

        let (settings, _) = load_startup(&cli).unwrap();
        let written = write_config(&cli, &settings).unwrap();
        assert_eq!(written, config_path);

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded.settings.page_size, 20);
        assert_eq!(loaded.settings, settings);
    }

    #[test]
    fn test_write_config_rejects_invalid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let cli = Cli::try_parse_from([
            "lazytable",
            "--config",
            config_path.to_str().unwrap(),
            "--page-size",
            "7",
        ])
        .unwrap();

        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        let err = write_config(&cli, &settings).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::ValidationError(_))));
        assert!(!config_path.exists());
    }

    #[test]
    fn test_load_startup_bad_dataset_is_critical() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("rows.json");
        std::fs::write(&data_path, "not json").unwrap();

        let cli = Cli::try_parse_from([
            "lazytable",
            "--config",
            dir.path().join("missing.toml").to_str().unwrap(),
            "--data",
            data_path.to_str().unwrap(),
        ])
        .unwrap();

        let err = load_startup(&cli).unwrap_err();
        assert!(err.is_critical());
        assert!(matches!(err, AppError::Data(_)));
    }
}
