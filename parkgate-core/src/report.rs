//! Periodic sensor-state reporting

/// Default interval between unsolicited state reports
pub const DEFAULT_REPORT_INTERVAL_MS: u32 = 1000;

/// Fires once every time more than `interval_ms` has elapsed since the
/// previous report
///
/// Edges do not restart the clock; the host gets a periodic report even
/// right after an edge report.
#[derive(Debug, Clone)]
pub struct PeriodicReporter {
    interval_ms: u32,
    last_ms: u32,
}

impl PeriodicReporter {
    pub fn new(interval_ms: u32, now_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: now_ms,
        }
    }

    /// Returns `true` when a report is due, restarting the clock at `now_ms`
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) > self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_strictly_after_interval() {
        let mut r = PeriodicReporter::new(1000, 0);
        assert!(!r.poll(500));
        assert!(!r.poll(1000));
        assert!(r.poll(1001));
        assert!(!r.poll(1500));
        assert!(!r.poll(2001));
        assert!(r.poll(2002));
    }

    #[test]
    fn test_late_poll_fires_once() {
        let mut r = PeriodicReporter::new(1000, 0);
        assert!(r.poll(5000));
        assert!(!r.poll(5001));
    }

    #[test]
    fn test_wrapping_clock() {
        let mut r = PeriodicReporter::new(1000, u32::MAX - 100);
        assert!(!r.poll(899));
        assert!(r.poll(900));
    }
}
