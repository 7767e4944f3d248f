#[cfg(feature = "cli")]
pub mod cli;
pub mod site_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use site_config::{PageConfig, ServerConfig, SiteConfig, SiteSection};
