use crate::dashboard::{Dashboard, TickOutcome};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub type SharedDashboard = Arc<Mutex<Dashboard>>;

pub trait TickSink: Send + Sync + 'static {
    fn on_tick(&self, outcome: &TickOutcome);
}

pub struct NoopSink;

impl TickSink for NoopSink {
    fn on_tick(&self, _outcome: &TickOutcome) {}
}

/// Owns the periodic update task. Stopping or dropping the handle aborts the
/// task, so no tick lands after teardown.
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Must be called from within a tokio runtime.
    pub fn spawn(dashboard: SharedDashboard, period: Duration, sink: impl TickSink) -> Self {
        let period = period.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let outcome = match dashboard.lock() {
                    Ok(mut guard) => guard.tick(),
                    Err(_) => {
                        tracing::error!("dashboard lock poisoned, stopping ticker");
                        return;
                    }
                };
                sink.on_tick(&outcome);
            }
        });
        tracing::debug!(period_ms = period.as_millis() as u64, "ticker started");
        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[derive(Default, Clone)]
    struct CountSink {
        seen: Arc<Mutex<usize>>,
    }

    impl TickSink for CountSink {
        fn on_tick(&self, _outcome: &TickOutcome) {
            if let Ok(mut guard) = self.seen.lock() {
                *guard += 1;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let dashboard = Arc::new(Mutex::new(Dashboard::mount(DashboardConfig {
            seed: Some(1),
            ..DashboardConfig::default()
        })));
        let sink = CountSink::default();
        let ticker = Ticker::spawn(dashboard, Duration::from_secs(10), sink.clone());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(*sink.seen.lock().expect("lock"), 0);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(*sink.seen.lock().expect("lock"), 3);
        assert!(ticker.is_running());
        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_clamped_instead_of_panicking() {
        let dashboard = Arc::new(Mutex::new(Dashboard::mount(DashboardConfig {
            seed: Some(2),
            ..DashboardConfig::default()
        })));
        let sink = CountSink::default();
        let ticker = Ticker::spawn(dashboard, Duration::ZERO, sink.clone());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(ticker.is_running());
        assert!(*sink.seen.lock().expect("lock") > 0);
        ticker.stop();
    }
}
