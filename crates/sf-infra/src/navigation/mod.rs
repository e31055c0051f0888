use async_trait::async_trait;
use tracing::info;

use sf_core::ports::NavigationPort;

/// Navigation adapter for shells without a real browser: records the
/// redirect in the log and returns.
pub struct LoggingNavigator;

#[async_trait]
impl NavigationPort for LoggingNavigator {
    async fn redirect(&self, url: &str) -> anyhow::Result<()> {
        info!(url, "redirecting");
        Ok(())
    }
}
