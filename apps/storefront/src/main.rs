//! # Grocery Hub Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocery Hub Storefront                           │
//! │                                                                         │
//! │  main.rs ────► calls lib::run, maps a startup failure to exit code 1   │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, catalog, console                       │
//! │                                                                         │
//! │  console.rs ─► stdin lines → commands → stdout                         │
//! │                                                                         │
//! │  commands/ ──► browse, add, qty, preview, share, checkout              │
//! │                                                                         │
//! │  state/ ─────► StoreConfig, Session                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match grocery_storefront::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("grocery-hub: {}", err.message);
            ExitCode::FAILURE
        }
    }
}
