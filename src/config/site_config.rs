use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteSection,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pages: Vec<PageConfig>,
    /// 相對路徑的基準目錄（設定檔所在目錄）
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    pub name: String,
    pub fragment_dir: String,
    pub template_dir: Option<String>,
    /// 根路徑 `/` 要顯示的頁面路由
    pub index: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub route: String,
    pub template: String,
    pub content_type: Option<String>,
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置，相對路徑以檔案所在目錄為準
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(SiteError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// 從 TOML 字串解析配置，相對路徑以目前工作目錄為準
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_ROOT})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn fragment_dir(&self) -> PathBuf {
        self.resolve_path(&self.site.fragment_dir)
    }

    pub fn template_path(&self, page: &PageConfig) -> PathBuf {
        match &self.site.template_dir {
            Some(dir) => self.resolve_path(dir).join(&page.template),
            None => self.resolve_path(&page.template),
        }
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind_address", &self.server.bind_address)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("site.name", &self.site.name)?;
        validation::validate_path("site.fragment_dir", &self.site.fragment_dir)?;
        if let Some(dir) = &self.site.template_dir {
            validation::validate_path("site.template_dir", dir)?;
        }
        self.bind_address()?;

        if self.pages.is_empty() {
            return Err(SiteError::MissingConfigError {
                field: "pages".to_string(),
            });
        }

        for page in &self.pages {
            validation::validate_route("pages.route", &page.route)?;
            validation::validate_path("pages.template", &page.template)?;
            if let Some(content_type) = &page.content_type {
                validation::validate_non_empty_string("pages.content_type", content_type)?;
            }
        }
        validation::validate_unique_routes("pages.route", self.pages.iter().map(|p| p.route.as_str()))?;

        if let Some(index) = &self.site.index {
            if !self.pages.iter().any(|page| &page.route == index) {
                return Err(SiteError::InvalidConfigValueError {
                    field: "site.index".to_string(),
                    value: index.clone(),
                    reason: "Index must name a declared page route".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
