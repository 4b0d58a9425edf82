//! # Dispatch
//!
//! `run` wires the parsed arguments into a store and hands the command to
//! [`dispatch`], which returns the text to print. `dispatch` is generic over
//! the backend so it is tested against an in-memory store.

use super::render;
use super::setup::{parse_cli, parse_value, Cli, Commands};
use anyhow::{bail, Context, Result};
use dotprefs::{Prefs, PrefsBackend, PrefsOptions, UserDataDir};
use serde_json::Value;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose)?;

    let mut prefs = open_store(&cli);
    debug!(path = %prefs.file_path().display(), "Opened preferences");

    let output = dispatch(&mut prefs, &cli.command)?;
    print!("{}", output);
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        match std::env::var("LOG_LEVEL")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_options(cli: &Cli) -> PrefsOptions {
    let mut options = PrefsOptions::new().with_file_name(&cli.file_name);
    if let Some(dir) = &cli.dir {
        options = options.with_file_path(dir.clone());
    }
    if let Some(defaults) = &cli.defaults {
        options = options.with_defaults(defaults.clone());
    }
    options
}

fn open_store(cli: &Cli) -> Prefs {
    Prefs::for_app(&UserDataDir::new(&cli.app), build_options(cli))
}

pub fn dispatch<B: PrefsBackend>(prefs: &mut Prefs<B>, command: &Commands) -> Result<String> {
    let output = match command {
        Commands::Get { key: Some(key) } => match prefs.get(key) {
            Some(value) => render::json(&value),
            None => bail!("No value stored at '{}'", key),
        },
        Commands::Get { key: None } => render::json(&prefs.get_all()),
        Commands::Set { key, value } => {
            prefs
                .set(key, parse_value(value))
                .with_context(|| format!("Failed to set '{}'", key))?;
            String::new()
        }
        Commands::Delete { key } => {
            prefs
                .delete(key)
                .with_context(|| format!("Failed to delete '{}'", key))?;
            String::new()
        }
        Commands::Has { key } => render::line(prefs.has(key)),
        Commands::List { json: true } => {
            let flat: serde_json::Map<String, Value> = prefs.entries().into_iter().collect();
            render::json(&Value::Object(flat))
        }
        Commands::List { json: false } => render::entries(prefs.iter()),
        Commands::Clear => {
            prefs.clear().context("Failed to clear preferences")?;
            String::new()
        }
        Commands::Size => render::line(prefs.size()),
        Commands::Path => render::line(prefs.backend().location()),
    };
    Ok(output)
}
