use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Instant, Sleep, sleep_until};

/// Fixed-period tick source re-armed by the caller after each tick completes.
///
/// The period is measured from the end of one tick to the start of the next, so a slow tick
/// pushes later ticks back instead of bunching them up. The first tick is due immediately.
pub struct TickScheduler {
    period: Duration,
    sleep: Pin<Box<Sleep>>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            sleep: Box::pin(sleep_until(Instant::now())),
        }
    }

    /// Waits until the next tick is due. Cancel-safe, so it can sit in a `select!` arm.
    pub async fn wait(&mut self) {
        self.sleep.as_mut().await;
    }

    /// Schedules the next tick one period from now.
    pub fn rearm(&mut self) {
        let deadline = Instant::now() + self.period;
        self.sleep.as_mut().reset(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn when_created_then_first_tick_is_immediate() {
        let mut ticker = TickScheduler::new(Duration::from_millis(250));
        let started = Instant::now();

        ticker.wait().await;

        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn when_rearmed_then_next_tick_waits_one_period() {
        let period = Duration::from_millis(250);
        let mut ticker = TickScheduler::new(period);
        ticker.wait().await;

        ticker.rearm();
        let started = Instant::now();
        ticker.wait().await;

        assert!(started.elapsed() >= period);
        assert!(started.elapsed() < period * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn when_tick_work_is_slow_then_period_counts_from_rearm() {
        let period = Duration::from_millis(250);
        let mut ticker = TickScheduler::new(period);
        let started = Instant::now();
        ticker.wait().await;

        // Simulate a tick whose work takes longer than the period itself.
        tokio::time::sleep(Duration::from_millis(400)).await;
        ticker.rearm();
        ticker.wait().await;

        assert!(started.elapsed() >= Duration::from_millis(650));
    }
}
