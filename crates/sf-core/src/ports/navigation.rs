use async_trait::async_trait;

/// External redirect target for the success screen.
///
/// One-way side effect; the wizard cannot inspect the result afterwards.
#[async_trait]
pub trait NavigationPort: Send + Sync {
    async fn redirect(&self, url: &str) -> anyhow::Result<()>;
}
