use crate::core::composer::PageComposer;
use crate::domain::ports::{FragmentLookup, PageWriter};
use crate::utils::error::Result;
use std::path::PathBuf;

/// 將每個頁面組合後寫出；任何一頁失敗即停止。
pub fn export_site<L, W>(composer: &PageComposer<L>, writer: &W) -> Result<Vec<PathBuf>>
where
    L: FragmentLookup,
    W: PageWriter + ?Sized,
{
    let mut written = Vec::new();

    for route in composer.routes() {
        let output = composer.render(route)?;
        let path = writer.write_page(route, &output)?;
        tracing::info!("📝 Wrote {} ({} bytes) to {}", route, output.len(), path.display());
        written.push(path);
    }

    Ok(written)
}
