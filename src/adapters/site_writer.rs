use crate::domain::ports::PageWriter;
use crate::utils::error::{Result, SiteError};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalSiteWriter {
    base_path: PathBuf,
}

impl LocalSiteWriter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 路由對應的輸出路徑；以 `/` 結尾的路由寫成 `index.html`
    pub fn path_for(&self, route: &str) -> Result<PathBuf> {
        let relative = route.trim_start_matches('/');
        if relative.split('/').any(|segment| segment == "..") {
            return Err(SiteError::InvalidConfigValueError {
                field: "pages.route".to_string(),
                value: route.to_string(),
                reason: "Route cannot contain '..' segments".to_string(),
            });
        }

        let mut path = self.base_path.join(relative);
        if relative.is_empty() || relative.ends_with('/') {
            path.push("index.html");
        }
        Ok(path)
    }
}

impl PageWriter for LocalSiteWriter {
    fn write_page(&self, route: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.path_for(route)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path)
    }
}
