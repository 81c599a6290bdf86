pub mod check;
pub mod config;
pub mod run;
pub mod simulate;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use lumen_core::PageSpec;

/// Page from `path`, or the built-in sample page
pub fn load_page(path: Option<&Path>) -> Result<PageSpec> {
    match path {
        Some(path) => {
            info!("Loading page from {}", path.display());
            PageSpec::load(path).with_context(|| format!("loading page {}", path.display()))
        }
        None => {
            info!("No page given, using the sample page");
            Ok(PageSpec::sample()?)
        }
    }
}
