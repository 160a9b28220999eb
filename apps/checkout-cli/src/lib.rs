//! # Checkout CLI Library
//!
//! Terminal front end for the cart engine. Reads one command per line from
//! stdin and prints the result.
//!
//! ## Module Organization
//! ```text
//! checkout_cli/
//! ├── lib.rs          ◄─── You are here (startup & input loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── config.rs   ◄─── CheckoutConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing & dispatch
//! │   ├── catalog.rs  ◄─── list / search / sort / reload
//! │   ├── cart.rs     ◄─── set / add / remove / clear / save / forget
//! │   └── coupon.rs   ◄─── coupon / total
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use checkout_engine::{CartEngine, CatalogLoader, JsonFileLoader};
use checkout_store::{FileStore, KeyValueStore};

use commands::{Command, Outcome};
use error::ApiError;
use state::CheckoutConfig;

// =============================================================================
// Command-Line Arguments
// =============================================================================

pub const USAGE: &str = "\
Checkout - shopping cart calculator

Usage: checkout [OPTIONS]

Options:
  -c, --config <PATH>     Config file (default: platform config dir/checkout.toml)
      --catalog <PATH>    Catalog JSON file (overrides config)
  -h, --help              Show this help message";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ApiError> {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ApiError::validation("--config needs a path"))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--catalog" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ApiError::validation("--catalog needs a path"))?;
                    parsed.catalog = Some(PathBuf::from(path));
                }
                "--help" | "-h" => parsed.help = true,
                other => {
                    return Err(ApiError::validation(format!("Unknown argument '{}'", other)))
                }
            }
        }

        Ok(parsed)
    }
}

// =============================================================================
// Startup
// =============================================================================

/// Runs the checkout shell until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments                                                     │
/// │  2. Load CheckoutConfig (file → env → validate)                        │
/// │  3. Initialize logging (RUST_LOG, else logging.filter)                 │
/// │  4. Build CartEngine<JsonFileLoader, FileStore>                        │
/// │  5. initialize() with a loading notice while the catalog is fetched    │
/// │  6. Read commands from stdin                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: impl IntoIterator<Item = String>) -> Result<(), ApiError> {
    let args = CliArgs::parse(args)?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config = CheckoutConfig::load(args.config)?;
    if let Some(catalog) = args.catalog {
        config.catalog.path = catalog;
    }

    init_tracing(&config);
    info!(catalog = ?config.catalog.path, data_dir = ?config.data_dir(), "Starting checkout");

    let loader = JsonFileLoader::new(&config.catalog.path).with_latency(config.catalog_latency());
    let store = FileStore::new(config.data_dir());
    let mut engine = CartEngine::new(loader, store).with_quota(config.storage.quota_bytes);

    start_session(&mut engine, &config).await;
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(ApiError::internal(format!("Failed to read input: {}", e))),
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = match line.parse::<Command>() {
            Ok(command) => commands::execute(&mut engine, &config, command).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Outcome::Print(text)) => println!("{}", text),
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("{}", e),
        }
    }

    info!(session_id = %engine.session_id(), "Checkout closed");
    Ok(())
}

/// Initializes the session, printing a notice while the catalog loads.
///
/// A catalog failure is reported but does not end the shell; `reload`
/// can try again.
async fn start_session<L, S>(engine: &mut CartEngine<L, S>, config: &CheckoutConfig)
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let mut loading = engine.subscribe_loading();
    let loading_started = async move {
        let _ = loading.wait_for(|is_loading| *is_loading).await;
    };

    let result = {
        let init = engine.initialize();
        tokio::pin!(init);

        let settled = tokio::select! {
            biased;
            result = &mut init => Some(result),
            () = loading_started => None,
        };

        match settled {
            Some(result) => result,
            None => {
                println!("Loading products...");
                init.await
            }
        }
    };

    match result {
        Ok(report) => {
            println!("{}", commands::catalog::describe_report(&report));
            println!("{}", commands::catalog::list(engine, config));
        }
        Err(e) => {
            warn!(error = %e, "Starting without a catalog");
            eprintln!("{}", ApiError::from(e));
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=checkout_engine=trace` - Trace the engine only
/// - Default: `logging.filter` from config (`info,checkout=debug`)
///
/// Logs go to stderr so command output stays readable.
fn init_tracing(config: &CheckoutConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
