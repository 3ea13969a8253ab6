//! CLI error types.

use sitemap_config::ConfigError;
use sitemap_core::SitemapError;

use crate::input::InputError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    Sitemap(#[from] SitemapError),
}
