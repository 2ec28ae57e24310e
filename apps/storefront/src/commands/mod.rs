//! # Commands Module
//!
//! Everything the console can ask the storefront to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Browse, search, category filter, stats
//! ├── cart.rs     ◄─── Cart manipulation
//! └── order.rs    ◄─── Preview, share link, checkout
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  "add 3.1"  ──► Command::Add(ItemCode{3,1})   (console.rs)              │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  commands::cart::add_catalog_item(                                      │
//! │      catalog: &Catalog,      ◄── read-only, shared                      │
//! │      session: &mut Session,  ◄── this customer's cart                   │
//! │      code: ItemCode,         ◄── parsed argument                        │
//! │  ) -> AppResult<LineChange>                                             │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  console renders the response, then the cart status if it changed      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only what it needs. Commands that stamp a time take
//! it as an argument, so nothing here reads the clock.

pub mod cart;
pub mod catalog;
pub mod order;
