use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docspy::{commands, config, tui};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "docspy")]
#[command(about = "Read long documents with a navigation menu that follows along", long_about = None)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a document in the viewer
    View {
        /// Document to read
        file: PathBuf,
    },
    /// Print the section outline of a document
    Outline {
        /// Document to read
        file: PathBuf,
    },
    /// Replay scroll offsets and print the active section after each
    Trace {
        /// Document to read
        file: PathBuf,

        /// Height of the content pane in rows
        #[arg(short = 'H', long, default_value_t = 24)]
        height: u16,

        /// Scroll offsets, in order
        #[arg(required = true, num_args = 1..)]
        offsets: Vec<u16>,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command(cfg: &config::Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("scroll_lines: {}", cfg.scroll_lines);
    println!("menu_width: {}", cfg.menu_width);
    println!();
    println!("[spy]");
    let thresholds = cfg.spy.thresholds();
    println!("down_threshold: {}", thresholds.down());
    println!("up_threshold: {}", thresholds.up());
    println!("smooth_menu: {}", cfg.spy.smooth_menu);
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("heading_fg: {:?}{}",
        cfg.theme.heading_fg(),
        if cfg.theme.heading_fg.is_none() { " (auto: selection_fg)" } else { "" }
    );
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Execute a CLI command by routing it to the appropriate command handler
fn execute_command(command: Commands, config: config::Config) -> anyhow::Result<()> {
    match command {
        Commands::View { file } => {
            let document = commands::load_document(&file)?;
            tui::run(document, config)?;
            Ok(())
        }
        Commands::Outline { file } => commands::outline::run(&file),
        Commands::Trace { file, height, offsets } => {
            commands::trace::run(&file, height, &offsets, config.spy.thresholds())
        }
        Commands::Config => {
            handle_config_command(&config);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = config::read();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    if let Err(e) = execute_command(cli.command, config) {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
