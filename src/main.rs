use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cogbot::application::errors::{BotError, TransportError};
use cogbot::application::messaging::{DispatchTable, MessageDispatcher};
use cogbot::application::services::MessageService;
use cogbot::domain::entities::Command;
use cogbot::domain::traits::Bot;
use cogbot::infrastructure::adapters::ConsoleAdapter;
use cogbot::infrastructure::config::Config;
use cogbot::infrastructure::storage::open_store;
use cogbot::plugins::{self, Composition};

#[derive(Parser)]
#[command(name = "cogbot")]
#[command(about = "A plugin-based chat command bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Compose the plugins, print the command table and lint findings
    Check,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .init();

    let result = match cli.command {
        Commands::Run => load_config(&cli.config).and_then(run_bot),
        Commands::Check => load_config(&cli.config).and_then(|config| check(&config)),
        Commands::Version => {
            println!("cogbot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// INFO unless `RUST_LOG` says otherwise; `--verbose` always enables DEBUG
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(rust_log.unwrap_or_default());
    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}

fn load_config(path: &str) -> Result<Config, BotError> {
    let mut config = if Path::new(path).exists() {
        Config::load(path)?
    } else {
        tracing::warn!("Config {} not found, using defaults", path);
        Config::default()
    };
    config.apply_env()?;
    Ok(config)
}

/// Composition runs once, before any message is dispatched
fn compose(config: &Config) -> Result<Composition, BotError> {
    let selected = plugins::selected(config.plugins.enabled.as_deref());
    if let Some(enabled) = &config.plugins.enabled {
        for name in enabled {
            if !selected.iter().any(|p| p.name() == name) {
                tracing::warn!("Unknown plugin in config: {}", name);
            }
        }
    }
    Ok(plugins::compose(selected)?)
}

fn run_bot(config: Config) -> Result<(), BotError> {
    tracing::info!("Starting {}", config.bot.name);
    let table = Arc::new(compose(&config)?.table);

    let rt = tokio::runtime::Runtime::new().map_err(TransportError::from)?;
    rt.block_on(async move {
        let store = open_store(&config.storage).await?;
        let bot = Arc::new(ConsoleAdapter::new(&config.bot.name, &config.console));
        bot.start().await?;

        let dispatcher = MessageDispatcher::new(table, config.bot.prefix.clone());
        let service = Arc::new(
            MessageService::new(bot.clone(), dispatcher, store)
                .with_rich_errors(config.reporting.rich),
        );

        let (tx, rx) = mpsc::channel(64);
        let worker = tokio::spawn(service.run(rx));
        let listened = bot.listen(tx).await;
        if let Err(e) = worker.await {
            tracing::warn!("Message loop ended abnormally: {}", e);
        }
        listened?;
        Ok::<(), BotError>(())
    })
}

fn check(config: &Config) -> Result<(), BotError> {
    let composition = compose(config)?;
    print_table(&composition.table);
    if composition.warnings.is_empty() {
        println!("\nNo lint findings.");
    } else {
        println!("\nLint findings:");
        for warning in &composition.warnings {
            println!("  - {}", warning);
        }
    }
    Ok(())
}

fn print_table(table: &DispatchTable) {
    println!("Plugins: {}", table.plugins().join(", "));
    println!("Commands:");
    for entry in table.commands() {
        print_command(&entry.plugin, &entry.command, 1);
    }
    println!("Help pages:");
    for (depth, page) in table.help().walk(true) {
        println!("{}{} - {}", "  ".repeat(depth + 1), page.name, page.short_description);
    }
}

fn print_command(plugin: &str, command: &Command, depth: usize) {
    let aliases = if command.aliases.is_empty() {
        String::new()
    } else {
        format!(" (aliases: {})", command.aliases.join(", "))
    };
    println!("{}{}{} [{}]", "  ".repeat(depth), command.name, aliases, plugin);
    for sub in &command.subcommands {
        print_command(plugin, sub, depth + 1);
    }
}

fn init_config(path: &str) -> Result<(), BotError> {
    if Path::new(path).exists() {
        println!("Config file already exists: {}", path);
        return Ok(());
    }
    Config::default().save(path)?;
    println!("Created default config: {}", path);
    Ok(())
}
