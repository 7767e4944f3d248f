use clap::Parser;
use page_composer::utils::{logger, validation::Validate};
use page_composer::{export_site, server, CliConfig, LocalSiteWriter, PageComposer, SiteConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting page-composer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Invalid command line: {}", e);
        std::process::exit(1);
    }

    let mut site = SiteConfig::from_file(&cli.config)?;
    if let Some(bind) = &cli.bind {
        site.server.bind_address = bind.clone();
    }

    // 驗證配置
    if let Err(e) = site.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let composer = PageComposer::from_site_config(&site)?;

    let unresolved = composer.check();
    for missing in &unresolved {
        tracing::warn!(
            "⚠️ Page {} references missing fragment '{}'",
            missing.route,
            missing.name
        );
    }

    if cli.check {
        if unresolved.is_empty() {
            tracing::info!("✅ All pages resolve");
            return Ok(());
        }
        tracing::error!("❌ {} unresolved fragment references", unresolved.len());
        std::process::exit(2);
    }

    if let Some(out_dir) = &cli.render_to {
        let writer = LocalSiteWriter::new(out_dir);
        let written = export_site(&composer, &writer)?;
        tracing::info!(
            "✅ Exported {} pages to {}",
            written.len(),
            out_dir.display()
        );
        return Ok(());
    }

    let addr = site.bind_address()?;
    server::serve(addr, Arc::new(composer)).await?;

    Ok(())
}
