//! Sensor debouncing
//!
//! Raw samples are polled from the control loop. A new level only becomes
//! the stable state after it has been held for strictly longer than the
//! window. All timestamps are a wrapping 32-bit millisecond counter.

/// Default debounce window
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// A change of the stable state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edge {
    /// New stable value
    pub stable: bool,
    /// Poll time at which the change was accepted
    pub at_ms: u32,
}

/// Debounced view of a binary sensor
#[derive(Debug, Clone)]
pub struct Debouncer {
    stable: bool,
    last_raw: bool,
    last_change_ms: u32,
    window_ms: u32,
}

impl Debouncer {
    /// Start from an initial sample, which is taken as already stable
    pub fn new(initial: bool, now_ms: u32, window_ms: u32) -> Self {
        Self {
            stable: initial,
            last_raw: initial,
            last_change_ms: now_ms,
            window_ms,
        }
    }

    /// Current stable state
    pub fn stable(&self) -> bool {
        self.stable
    }

    /// Most recent raw sample
    pub fn last_raw(&self) -> bool {
        self.last_raw
    }

    /// Time of the last raw transition
    pub fn last_change_ms(&self) -> u32 {
        self.last_change_ms
    }

    /// Feed one raw sample
    ///
    /// Returns an [`Edge`] when the stable state changes.
    pub fn poll(&mut self, raw: bool, now_ms: u32) -> Option<Edge> {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_change_ms = now_ms;
        }

        let held_ms = now_ms.wrapping_sub(self.last_change_ms);
        if held_ms > self.window_ms && raw != self.stable {
            self.stable = raw;
            return Some(Edge {
                stable: raw,
                at_ms: now_ms,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_edge_without_change() {
        let mut d = Debouncer::new(false, 0, 50);
        for t in 0..500 {
            assert_eq!(d.poll(false, t), None);
        }
        assert!(!d.stable());
    }

    #[test]
    fn test_edge_after_window() {
        let mut d = Debouncer::new(false, 0, 50);
        assert_eq!(d.poll(true, 100), None);
        // Exactly the window is not enough
        assert_eq!(d.poll(true, 150), None);
        assert_eq!(
            d.poll(true, 151),
            Some(Edge {
                stable: true,
                at_ms: 151
            })
        );
        assert!(d.stable());
        assert_eq!(d.poll(true, 500), None);
    }

    #[test]
    fn test_glitch_is_ignored() {
        let mut d = Debouncer::new(false, 0, 50);
        d.poll(true, 10);
        d.poll(true, 40);
        d.poll(false, 45);
        for t in 46..200 {
            assert_eq!(d.poll(false, t), None);
        }
        assert!(!d.stable());
    }

    #[test]
    fn test_glitch_restarts_window() {
        let mut d = Debouncer::new(false, 0, 50);
        d.poll(true, 0);
        d.poll(false, 30);
        d.poll(true, 31);
        assert_eq!(d.poll(true, 81), None);
        assert!(d.poll(true, 82).is_some());
    }

    #[test]
    fn test_wrapping_clock() {
        let start = u32::MAX - 20;
        let mut d = Debouncer::new(false, start, 50);
        d.poll(true, start);
        assert_eq!(d.poll(true, start.wrapping_add(50)), None);
        assert!(d.poll(true, start.wrapping_add(51)).is_some());
    }

    proptest! {
        #[test]
        fn prop_fast_oscillation_never_edges(
            window in 1u32..200,
            period_pct in 1u32..=100,
            duration in 0u32..2000,
            initial in any::<bool>(),
        ) {
            let period = (window * period_pct / 100).max(1);
            let mut d = Debouncer::new(initial, 0, window);
            for t in 0..duration {
                // Toggle every `period` ms, starting with a change at t = 0
                let raw = if (t / period) % 2 == 0 { !initial } else { initial };
                prop_assert_eq!(d.poll(raw, t), None);
            }
            prop_assert_eq!(d.stable(), initial);
        }

        #[test]
        fn prop_held_level_edges_once(
            window in 0u32..200,
            extra in 1u32..500,
            start in any::<u32>(),
        ) {
            let mut d = Debouncer::new(false, start, window);
            let mut edges = 0;
            for step in 0..=(window + extra) {
                if d.poll(true, start.wrapping_add(step)).is_some() {
                    edges += 1;
                }
            }
            prop_assert_eq!(edges, 1);
            prop_assert!(d.stable());
        }
    }
}
