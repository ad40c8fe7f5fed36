//! Page assembly command.

use std::path::PathBuf;

use bharat_storefront::StorefrontError;
use bharat_storefront::components::{ComponentLoader, Page};
use bharat_storefront::storage::StorageError;

use super::{Context, print_line};

/// Arguments for `bharat page`.
#[derive(Debug, clap::Args)]
pub struct PageArgs {
    /// HTML shell with `navbar-placeholder`, `footer-placeholder` and
    /// `products-grid` elements
    pub file: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Leave the navbar and footer placeholders alone
    #[arg(long)]
    pub skip_components: bool,
}

/// Fill an HTML shell with shared components, the product grid, the product
/// count and the cart badge.
///
/// # Errors
///
/// Returns an error if the files cannot be read or written or the grid
/// fails to render. Component failures only log.
pub async fn assemble(ctx: &mut Context, args: &PageArgs) -> Result<(), StorefrontError> {
    let html = std::fs::read_to_string(&args.file).map_err(|source| StorageError::Io {
        path: args.file.clone(),
        source,
    })?;
    let mut page = Page::new(html);

    if !args.skip_components {
        let loader = ComponentLoader::new(&ctx.config)?;
        let loaded = loader.initialize_components(&mut page).await;
        tracing::info!(loaded, "Components injected");
    }

    ctx.storefront.initialize().await;
    ctx.storefront.load_dynamic_products().await;
    ctx.storefront.apply_to(&mut page)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, page.html()).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Page written");
        }
        None => print_line(page.html()),
    }
    Ok(())
}
