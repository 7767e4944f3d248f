// Adapters layer: concrete implementations of the domain ports backed by the local filesystem.

pub mod fragment_store;
pub mod site_writer;
