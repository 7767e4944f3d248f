use crate::domain::model::Fragment;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves a fragment by name. Implementations are read-only after construction.
pub trait FragmentLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Option<&Fragment>;
}

impl<L: FragmentLookup + ?Sized> FragmentLookup for &L {
    fn lookup(&self, name: &str) -> Option<&Fragment> {
        (**self).lookup(name)
    }
}

impl<L: FragmentLookup + ?Sized> FragmentLookup for Arc<L> {
    fn lookup(&self, name: &str) -> Option<&Fragment> {
        (**self).lookup(name)
    }
}

/// Destination for rendered pages during a static export.
pub trait PageWriter {
    fn write_page(&self, route: &str, data: &[u8]) -> Result<PathBuf>;
}
