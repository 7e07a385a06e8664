//! # Satchel Storefront
//!
//! Runs a shopper session: loads configuration and the catalog, replays a
//! script of shopper commands, and prints the resulting cart, wishlist and
//! totals as JSON.
//!
//! ## Module Organization
//! ```text
//! satchel_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── TOML config + SATCHEL_* overrides
//! ├── catalog.rs      ◄─── Catalog file or embedded seed catalog
//! ├── session.rs      ◄─── Session: history, catalog, pricing, dispatch
//! ├── script.rs       ◄─── JSON-lines shopper command replay
//! └── error.rs        ◄─── AppError
//! ```
//!
//! ## Usage
//! ```text
//! satchel-storefront [SCRIPT]      # reads stdin when SCRIPT is omitted
//!
//! RUST_LOG=satchel=trace           # more logging (logs go to stderr)
//! SATCHEL_CONFIG=./satchel.toml    # explicit config file
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod script;
pub mod session;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::StorefrontConfig;
use error::AppResult;
use script::ReplayReport;
use session::{Session, SessionSnapshot};

/// What the binary prints when a replay finishes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub store: String,
    pub session: SessionSnapshot,
    pub replay: ReplayReport,
}

/// Runs the storefront.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging        tracing-subscriber, RUST_LOG override     │
/// │  2. Load Config               file + environment, validated             │
/// │  3. Load Catalog              catalog_path or embedded seed             │
/// │  4. Start Session             empty cart, bounded undo history          │
/// │  5. Replay Script             file argument or stdin                    │
/// │  6. Print Summary             JSON on stdout                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting Satchel storefront");

    let config = StorefrontConfig::load(None)?;
    info!(
        store = %config.store.name,
        tax_rate_bps = config.pricing.tax_rate_bps,
        history_limit = config.history_limit(),
        "Configuration loaded"
    );

    let catalog = catalog::load_catalog(config.catalog_path().map(PathBuf::as_path))?;
    let mut session = Session::from_config(&config, catalog);

    let report = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(?path, "Replaying script");
            script::replay(&mut session, BufReader::new(File::open(&path)?))?
        }
        None => {
            info!("Replaying script from stdin");
            script::replay(&mut session, io::stdin().lock())?
        }
    };

    info!(
        session_id = %session.id(),
        applied = report.applied,
        rejected = report.rejected.len(),
        "Replay complete"
    );

    let summary = RunSummary {
        store: config.store.name.clone(),
        session: session.snapshot(),
        replay: report,
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &summary)?;
    writeln!(stdout)?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=satchel=trace` - Show trace for satchel crates only
/// - Default: INFO, DEBUG for satchel crates
///
/// Logs go to stderr so stdout carries only the JSON summary.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,satchel=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
