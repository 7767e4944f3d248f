use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "page-composer")]
#[command(about = "Compose HTML pages from named fragments and serve them")]
pub struct CliConfig {
    #[arg(long, short, default_value = "site.toml", help = "Path to the site configuration file")]
    pub config: PathBuf,

    #[arg(long, help = "Override server.bind_address from the site configuration")]
    pub bind: Option<String>,

    #[arg(long, help = "Check every page for unresolved fragments and exit")]
    pub check: bool,

    #[arg(long, help = "Write every composed page under this directory and exit")]
    pub render_to: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("config", &self.config.to_string_lossy())?;
        if let Some(bind) = &self.bind {
            validation::validate_socket_addr("bind", bind)?;
        }
        if let Some(dir) = &self.render_to {
            validation::validate_path("render_to", &dir.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::parse_from(["page-composer"]);
        assert_eq!(config.config, PathBuf::from("site.toml"));
        assert!(config.bind.is_none());
        assert!(!config.check);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let config = CliConfig::parse_from([
            "page-composer",
            "--config",
            "demos/site/site.toml",
            "--bind",
            "0.0.0.0:3000",
            "--render-to",
            "public",
            "--json-logs",
        ]);
        assert_eq!(config.bind.as_deref(), Some("0.0.0.0:3000"));
        assert_eq!(config.render_to, Some(PathBuf::from("public")));
        assert!(config.json_logs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_bind_fails_validation() {
        let config = CliConfig::parse_from(["page-composer", "--bind", "not-an-addr"]);
        assert!(config.validate().is_err());
    }
}
