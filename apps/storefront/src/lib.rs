//! # Grocery Hub Storefront Library
//!
//! The terminal storefront around `grocery-core`.
//!
//! ## Module Organization
//! ```text
//! grocery_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── console.rs      ◄─── Command parsing, session loop, rendering
//! ├── share.rs        ◄─── WhatsApp share link
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── StoreConfig (file + env layering)
//! │   └── session.rs  ◄─── Session (cart, browse query, render flag)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Browse, search, filter, stats
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── order.rs    ◄─── Preview, share, checkout
//! └── error.rs        ◄─── AppError and ConfigError
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod share;
pub mod state;

use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

use console::Console;
use error::AppResult;
use state::StoreConfig;

/// Runs the storefront on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: warn, info for this crate; RUST_LOG overrides            │
/// │                                                                         │
/// │  2. Load StoreConfig ─────────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → GROCERY_HUB_* env vars               │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • catalog_path JSON if configured, else the built-in catalog        │
/// │                                                                         │
/// │  4. Run Console ──────────────────────────────────────────────────────► │
/// │     • one Session, until `quit` or end of input                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Errors
/// Config and catalog failures (`CONFIG_ERROR`) and console I/O failures
/// (`INTERNAL`). Command errors are handled inside the session.
pub fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting Grocery Hub storefront");

    let config = StoreConfig::load(None)?;
    info!(
        store_name = %config.store_name,
        tax_rate = %config.tax_rate(),
        "Configuration loaded"
    );

    let catalog = config.load_catalog()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&catalog, &config).run(stdin.lock(), &mut stdout.lock())?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command
/// - `RUST_LOG=grocery_storefront=trace` - Trace this crate only
/// - Default: WARN, INFO for the storefront
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,grocery_storefront=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
