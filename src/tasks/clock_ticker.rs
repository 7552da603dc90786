//! Periodic clock sampling task

use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, trace};

use crate::state::{ClockHandle, Sample};

/// Background task that samples one clock at its profile's refresh rate.
///
/// Sampling a stopped clock is a no-op, so the ticker runs for the lifetime of
/// the server.
pub async fn clock_ticker_task(clock: ClockHandle) {
    info!(
        "Starting {} clock ticker every {:?}",
        clock.role(),
        clock.refresh_interval()
    );

    let mut ticker = interval(clock.refresh_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        match clock.tick() {
            Ok(Sample::Running) => trace!("{} clock sampled", clock.role()),
            Ok(Sample::Expired) => info!("{} clock reached zero", clock.role()),
            Ok(Sample::Idle) => {}
            Err(e) => error!("Failed to sample {} clock: {}", clock.role(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;
    use crate::state::ClockProfile;

    #[tokio::test]
    async fn ticker_drives_clock_to_expiry() {
        let clock = ClockHandle::new(ClockProfile::shot(Duration::from_millis(60), 50));
        let ticker = tokio::spawn(clock_ticker_task(clock.clone()));

        clock.start().unwrap();
        timeout(Duration::from_secs(2), clock.expiry().expired())
            .await
            .expect("clock should expire");
        tokio::time::sleep(Duration::from_millis(100)).await;
        ticker.abort();

        let snapshot = clock.snapshot().unwrap();
        assert_eq!(snapshot.remaining_seconds, 0.0);
        assert!(!snapshot.running);
        assert_eq!(clock.expiry().fired_count(), 1);
    }
}
