pub mod compose;
pub mod composer;
pub mod export;
pub mod template;

pub use crate::domain::model::{Fragment, Page};
pub use crate::domain::ports::{FragmentLookup, PageWriter};
pub use crate::utils::error::{MissingFragmentError, Result};
