use async_trait::async_trait;

/// Receives one logical clock tick per second.
///
/// Implemented by the orchestrator; driven by a real interval timer in
/// production and called directly in tests, so countdowns are testable
/// without wall-time.
#[async_trait]
pub trait TickSinkPort: Send + Sync {
    async fn tick(&self) -> anyhow::Result<()>;
}
