//! # Console
//!
//! The line-oriented storefront: read a command, run it, print the result.
//!
//! ## Session Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  banner                                                                 │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  > line ──► Command::from_str ──┬── Err ──► "⚠️ message"                │
//! │                                 │                                       │
//! │                                 └── Ok ───► execute ──► render result   │
//! │                                                │                        │
//! │                          session.take_render_request()?                 │
//! │                                                │                        │
//! │                                   yes ──► "🛍️ Cart: …" status line      │
//! │    ▲                                           │                        │
//! │    └───────────────────────────────────────────┘   until quit / EOF     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Command errors never end the session, and neither does a line that is
//! not valid UTF-8. Only I/O errors on the console streams themselves do.

use chrono::{DateTime, FixedOffset, Local};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info, warn};

use grocery_core::{Catalog, ItemCode};

use crate::commands::catalog::{BrowseResponse, CategorySelection};
use crate::commands::{cart, catalog, order};
use crate::error::{AppError, AppResult};
use crate::state::{LineRef, Session, StoreConfig};

const HELP: &str = "\
Commands:
  browse                      show the catalog (current search and filter)
  search [term]               filter items by name; no term clears the search
  filter all|<n>[,<n>...]     show only the numbered categories
  add <code>                  add one of an item, e.g. add 3.1
  custom <price> <name>       add an item that is not in the catalog
  cart                        show your cart
  json                        show your cart as JSON
  qty <line> <n>              set a quantity (exact name, else line number); 0 removes
  remove <line>               remove a line (exact name, else line number)
  clear                       empty the cart
  preview                     show the order message
  share <phone>               get a WhatsApp link with the order message
  checkout                    place the order
  stats                       quick stats
  quit                        leave the store";

// =============================================================================
// Command Parsing
// =============================================================================

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Browse,
    Search(String),
    Filter(CategorySelection),
    Add(ItemCode),
    Custom { price: String, name: String },
    Cart,
    Json,
    Qty { line: LineRef, quantity: i64 },
    Remove(LineRef),
    Clear,
    Preview,
    Share(String),
    Checkout,
    Stats,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (s, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "browse" => Command::Browse,
            "search" => Command::Search(rest.to_string()),
            "filter" => Command::Filter(parse_selection(rest)?),
            "add" => Command::Add(required(rest, "add <code>")?.parse()?),
            "custom" => {
                let (price, name) = required(rest, "custom <price> <name>")?
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("custom <price> <name>"))?;
                Command::Custom {
                    price: price.to_string(),
                    name: name.trim_start().to_string(),
                }
            }
            "cart" => Command::Cart,
            "json" => Command::Json,
            "qty" => {
                let (line, quantity) = required(rest, "qty <line> <n>")?
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| usage("qty <line> <n>"))?;
                let quantity = quantity
                    .parse()
                    .map_err(|_| AppError::validation(format!("'{}' is not a whole number", quantity)))?;
                Command::Qty {
                    line: LineRef::from(line),
                    quantity,
                }
            }
            "remove" => Command::Remove(LineRef::from(required(rest, "remove <line>")?)),
            "clear" => Command::Clear,
            "preview" => Command::Preview,
            "share" => Command::Share(required(rest, "share <phone>")?.to_string()),
            "checkout" => Command::Checkout,
            "stats" => Command::Stats,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(AppError::validation(format!(
                    "Unknown command: '{}'. Type `help` for the list.",
                    other
                )))
            }
        };

        Ok(command)
    }
}

fn usage(form: &str) -> AppError {
    AppError::validation(format!("Usage: {}", form))
}

fn required<'s>(rest: &'s str, form: &str) -> AppResult<&'s str> {
    if rest.is_empty() {
        Err(usage(form))
    } else {
        Ok(rest)
    }
}

fn parse_selection(rest: &str) -> AppResult<CategorySelection> {
    let rest = required(rest, "filter all|<n>[,<n>...]")?;
    if rest.eq_ignore_ascii_case("all") {
        return Ok(CategorySelection::All);
    }

    rest.split(',')
        .map(|n| {
            n.trim()
                .parse::<usize>()
                .map_err(|_| AppError::validation(format!("'{}' is not a category number", n.trim())))
        })
        .collect::<AppResult<Vec<_>>>()
        .map(CategorySelection::Positions)
}

// =============================================================================
// Console
// =============================================================================

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// One customer's storefront session over a pair of streams.
pub struct Console<'a> {
    catalog: &'a Catalog,
    config: &'a StoreConfig,
    session: Session,
    clock: fn() -> DateTime<FixedOffset>,
}

impl<'a> Console<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a StoreConfig) -> Self {
        Console {
            catalog,
            config,
            session: Session::new(),
            clock: local_now,
        }
    }

    /// Replaces the clock used to stamp order messages.
    pub fn with_clock(mut self, clock: fn() -> DateTime<FixedOffset>) -> Self {
        self.clock = clock;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the session until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        info!(session_id = %self.session.id(), "Session started");
        self.render_banner(out)?;
        prompt(out)?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let flow = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line, out)?,
                Err(err) => {
                    warn!(session_id = %self.session.id(), %err, "Skipping non UTF-8 input line");
                    render_error(out, &AppError::validation("That line is not valid text, ignored."))?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
            prompt(out)?;
        }

        let minutes = (chrono::Utc::now() - self.session.started_at()).num_minutes();
        info!(session_id = %self.session.id(), minutes, "Session ended");
        Ok(())
    }

    /// Parses and runs one input line, then prints the status line if the
    /// cart changed.
    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let flow = match line.parse::<Command>() {
            Ok(command) => self.execute(command, out)?,
            Err(err) => {
                render_error(out, &err)?;
                Flow::Continue
            }
        };

        if self.session.take_render_request() {
            self.render_status(out)?;
        }

        Ok(flow)
    }

    /// Runs one command and prints its result or error.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        debug!(session_id = %self.session.id(), ?command, "Executing command");

        match self.dispatch(command, out) {
            Ok(flow) => Ok(flow),
            Err(err) => {
                render_error(out, &err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch<W: Write>(&mut self, command: Command, out: &mut W) -> AppResult<Flow> {
        let catalog = self.catalog;
        let config = self.config;
        let now = self.clock;
        let session = &mut self.session;

        match command {
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Browse => render_browse(out, &catalog::browse(catalog, session))?,
            Command::Search(term) => {
                let term = catalog::search(session, &term)?;
                if term.is_empty() {
                    writeln!(out, "🔍 Search cleared")?;
                } else {
                    writeln!(out, "🔍 Searching for '{}'", term)?;
                }
                render_browse(out, &catalog::browse(catalog, session))?;
            }
            Command::Filter(selection) => {
                let selected = catalog::filter(catalog, session, selection)?;
                writeln!(out, "Showing: {}", selected.join(", "))?;
                render_browse(out, &catalog::browse(catalog, session))?;
            }
            Command::Add(code) => {
                let added = cart::add_catalog_item(catalog, session, code)?;
                writeln!(out, "✅ Added {} to cart! (x{})", added.item_name, added.quantity)?;
            }
            Command::Custom { price, name } => {
                let added = cart::add_custom_item(session, &name, &price)?;
                writeln!(out, "✅ Added custom item: {} (x{})", added.item_name, added.quantity)?;
            }
            Command::Cart => render_cart(out, &cart::get_cart(session, config.tax_rate()))?,
            Command::Json => {
                let response = cart::get_cart(session, config.tax_rate());
                writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
            }
            Command::Qty { line, quantity } => {
                let change = cart::update_quantity(session, &line, quantity)?;
                if change.quantity == 0 {
                    writeln!(out, "🗑️ Removed {}", change.item_name)?;
                } else {
                    writeln!(out, "✏️ {} quantity set to {}", change.item_name, change.quantity)?;
                }
            }
            Command::Remove(line) => {
                let change = cart::remove_from_cart(session, &line)?;
                writeln!(out, "🗑️ Removed {}", change.item_name)?;
            }
            Command::Clear => {
                if cart::clear_cart(session) {
                    writeln!(out, "🧹 Cart cleared")?;
                } else {
                    writeln!(out, "Your cart is already empty.")?;
                }
            }
            Command::Preview => writeln!(out, "{}", order::preview(session, config, now()))?,
            Command::Share(phone) => {
                let link = order::share(session, config, &phone, now())?;
                writeln!(out, "📱 Open this link to send your order:")?;
                writeln!(out, "{}", link.url)?;
            }
            Command::Checkout => {
                let placed = order::checkout(session, config, now())?;
                writeln!(out, "🎉 Order placed successfully!")?;
                writeln!(out, "  Reference: {}", placed.reference)?;
                writeln!(out, "  Total: {}", placed.summary.total)?;
            }
            Command::Stats => {
                let stats = catalog::stats(catalog, session);
                writeln!(out, "📊 Quick Stats")?;
                writeln!(out, "  Categories: {}", stats.categories)?;
                writeln!(out, "  Products: {}", stats.products)?;
                writeln!(out, "  In cart: {} items ({} units)", stats.cart_lines, stats.cart_units)?;
                writeln!(out, "  Subtotal: {}", stats.cart_subtotal)?;
            }
            Command::Quit => {
                writeln!(out, "👋 Thanks for visiting {}!", config.store_name)?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_banner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "🛒 {}", self.config.store_name)?;
        writeln!(out, "Your One-Stop Shopping Experience")?;
        writeln!(out, "Type `help` to see what you can do.")
    }

    fn render_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let cart = self.session.cart();
        writeln!(
            out,
            "🛍️ Cart: {} items, {} units, subtotal {}",
            cart.line_count(),
            cart.total_units(),
            cart.subtotal()
        )
    }
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn render_error<W: Write>(out: &mut W, err: &AppError) -> io::Result<()> {
    debug!(code = ?err.code, message = %err.message, "Command failed");
    writeln!(out, "⚠️ {}", err.message)
}

fn render_browse<W: Write>(out: &mut W, view: &BrowseResponse) -> io::Result<()> {
    if view.categories.is_empty() {
        return writeln!(out, "No products match your search.");
    }

    for category in &view.categories {
        writeln!(out)?;
        writeln!(out, "### {} ({})", category.category, category.position)?;
        for item in &category.items {
            write!(out, "  {:<6} {} - {}", item.code.to_string(), item.name, item.price)?;
            if item.in_cart > 0 {
                write!(out, "  ✓ x{}", item.in_cart)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render_cart<W: Write>(out: &mut W, response: &cart::CartResponse) -> io::Result<()> {
    if response.lines.is_empty() {
        return writeln!(out, "Your cart is empty. Start shopping with `browse`!");
    }

    writeln!(out, "🛍️ Your Cart")?;
    for (i, line) in response.lines.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} [{}]  {} x{} = {}",
            i + 1,
            line.item_name,
            line.category,
            line.unit_price,
            line.quantity,
            line.line_total()
        )?;
    }

    let totals = &response.totals;
    writeln!(out, "  Subtotal: {}", totals.subtotal)?;
    writeln!(out, "  Tax ({}): {}", totals.tax_rate, totals.tax)?;
    writeln!(out, "  Total: {}", totals.total)
}
