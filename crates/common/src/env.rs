//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(assets_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(assets_dir).await.is_err() {
        warn!(%assets_dir, "assets directory not found; uploaded images may 404");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}
