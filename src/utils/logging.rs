//! Logging setup and launch-loop throughput reporting

use log::info;
use std::time::Instant;

/// Initialize env_logger; RUST_LOG controls verbosity.
pub fn setup_logging() {
    let _ = env_logger::try_init();
}

/// Rolling throughput meter for the launch loop. Logs at most once per
/// reporting interval to keep long runs quiet.
pub struct Throughput {
    started: Instant,
    last_report: Instant,
    keys_total: u64,
    interval_secs: u64,
}

impl Throughput {
    pub fn new(interval_secs: u64) -> Self {
        let now = Instant::now();
        Throughput {
            started: now,
            last_report: now,
            keys_total: 0,
            interval_secs,
        }
    }

    pub fn keys_total(&self) -> u64 {
        self.keys_total
    }

    /// Account one launch; logs the running rate when the interval expires.
    pub fn record(&mut self, keys: u64) {
        self.keys_total += keys;
        if self.last_report.elapsed().as_secs() >= self.interval_secs {
            let elapsed = self.started.elapsed().as_secs_f64();
            let rate = self.keys_total as f64 / elapsed.max(1e-9);
            info!(
                "{} keys walked, {:.2} Mkey/s",
                self.keys_total,
                rate / 1_000_000.0
            );
            self.last_report = Instant::now();
        }
    }
}
