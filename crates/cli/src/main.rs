//! The Bharat Collections CLI - browse products, manage the cart, place orders.
//!
//! # Usage
//!
//! ```bash
//! # Is the backend up?
//! bharat status
//!
//! # List products, filtered and sorted locally
//! bharat products --filter mens --filter womens --sort price-low
//!
//! # Add two medium tees to the cart, then check out
//! bharat cart add BHRT-001-M --quantity 2 --size M
//! bharat order submit -e asha@example.com --name "Asha Rao" --line1 "12 MG Road" \
//!     --city Bengaluru --state KA --postal-code 560001
//!
//! # Fill a page shell with the navbar, footer and product grid
//! bharat page shop.html -o dist/shop.html
//! ```
//!
//! Cart and wishlist persist in `BHARAT_STORAGE_DIR` between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bharat_storefront::StorefrontError;
use bharat_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "bharat")]
#[command(author, version, about = "The Bharat Collections storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the backend and fulfillment connections
    Status,
    /// List products
    Products(commands::products::ListArgs),
    /// Show one product
    Product {
        /// Product SKU
        sku: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Place and track orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Send a message through the contact form
    Contact(commands::contact::ContactArgs),
    /// Inject shared components and the product grid into an HTML file
    Page(commands::page::PageArgs),
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add(commands::cart::AddArgs),
    /// Remove a cart entry by id
    Remove {
        /// Cart entry id (see `bharat cart list`)
        id: String,
    },
    /// Show the cart
    List,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a product to the wishlist
    Add {
        /// Product SKU
        sku: String,
    },
    /// Remove a product from the wishlist
    Remove {
        /// Product SKU
        sku: String,
    },
    /// Show the wishlist
    List,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Submit the current cart as an order
    Submit(commands::order::SubmitArgs),
    /// Look up an order
    Status {
        /// Order id
        order_id: String,
    },
    /// Look up fulfillment progress for an order
    Fulfillment {
        /// Order id
        order_id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration is needed for Sentry, which must start before tracing
    let config = StorefrontConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bharat_storefront=info,bharat_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        e.capture();
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), StorefrontError> {
    let mut ctx = commands::Context::open(config)?;

    match cli.command {
        Commands::Status => commands::products::status(&mut ctx).await?,
        Commands::Products(args) => commands::products::list(&mut ctx, &args).await?,
        Commands::Product { sku } => commands::products::show(&ctx, &sku).await?,
        Commands::Cart { action } => match action {
            CartAction::Add(args) => commands::cart::add(&mut ctx, &args).await?,
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id)?,
            CartAction::List => commands::cart::list(&ctx),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { sku } => commands::cart::wishlist_add(&mut ctx, &sku).await?,
            WishlistAction::Remove { sku } => commands::cart::wishlist_remove(&mut ctx, &sku)?,
            WishlistAction::List => commands::cart::wishlist_list(&ctx),
        },
        Commands::Order { action } => match action {
            OrderAction::Submit(args) => commands::order::submit(&mut ctx, &args).await?,
            OrderAction::Status { order_id } => commands::order::status(&ctx, &order_id).await?,
            OrderAction::Fulfillment { order_id } => {
                commands::order::fulfillment(&ctx, &order_id).await?;
            }
        },
        Commands::Contact(args) => commands::contact::send(&mut ctx, &args).await?,
        Commands::Page(args) => commands::page::assemble(&mut ctx, &args).await?,
    }

    ctx.flush_notifications();
    Ok(())
}
