use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

use sf_core::ports::TickSinkPort;

/// Drives the wizard countdowns with one tick per second.
///
/// The background task lives until `stop` or drop.
pub struct WizardTicker {
    handle: tokio::task::AbortHandle,
}

impl WizardTicker {
    pub fn start(sink: Arc<dyn TickSinkPort>) -> Self {
        let task = tokio::spawn(async move {
            let mut clock = interval(Duration::from_secs(1));
            // The first tick of `interval` completes immediately; the
            // countdowns expect a full second before the first decrement.
            clock.tick().await;
            clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                clock.tick().await;
                if let Err(err) = sink.tick().await {
                    warn!(error = %err, "tick delivery failed");
                }
            }
        });
        debug!("wizard ticker started");
        Self {
            handle: task.abort_handle(),
        }
    }

    pub fn stop(&self) {
        self.handle.abort();
        debug!("wizard ticker stopped");
    }
}

impl Drop for WizardTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    /// Forwards every tick into a channel so tests can await delivery
    /// instead of guessing how far the spawned task has been polled.
    struct ChannelSink {
        tx: mpsc::UnboundedSender<()>,
    }

    #[async_trait]
    impl TickSinkPort for ChannelSink {
        async fn tick(&self) -> anyhow::Result<()> {
            self.tx.send(())?;
            Ok(())
        }
    }

    fn channel_ticker() -> (WizardTicker, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = WizardTicker::start(Arc::new(ChannelSink { tx }));
        (ticker, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn delivers_one_tick_per_second() {
        let start = Instant::now();
        let (ticker, mut rx) = channel_ticker();

        for expected_secs in 1..=3 {
            rx.recv().await.expect("tick delivered");
            assert_eq!(start.elapsed(), Duration::from_secs(expected_secs));
        }

        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_delivery() {
        let (ticker, mut rx) = channel_ticker();

        rx.recv().await.expect("first tick delivered");
        ticker.stop();

        // The aborted task drops its sink, closing the channel; a stopped
        // ticker can never deliver again.
        assert!(rx.recv().await.is_none());
    }
}
