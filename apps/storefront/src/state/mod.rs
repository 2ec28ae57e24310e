//! # State Module
//!
//! State the storefront holds while it runs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │   StoreConfig    │  │     Catalog      │  │      Session         │  │
//! │  │                  │  │  (grocery-core)  │  │                      │  │
//! │  │  store_name      │  │                  │  │  id (UUID)           │  │
//! │  │  tax_rate_bps    │  │  categories      │  │  cart                │  │
//! │  │  catalog_path    │  │  → items → price │  │  browse query        │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  StoreConfig, Catalog: read-only after startup, borrowed by commands   │
//! │  Session: one per customer, owned by the console, passed &mut          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{StoreConfig, CONFIG_PATH_ENV};
pub use session::{LineRef, Session};
