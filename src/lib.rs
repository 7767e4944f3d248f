pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::fragment_store::{FragmentSet, LocalFragmentStore};
pub use crate::adapters::site_writer::LocalSiteWriter;
pub use crate::config::SiteConfig;
pub use crate::core::{
    compose::compose, composer::PageComposer, export::export_site, template::Template,
};
pub use crate::domain::model::{Fragment, Page};
pub use crate::domain::ports::{FragmentLookup, PageWriter};
pub use crate::utils::error::{MissingFragmentError, Result, SiteError};
