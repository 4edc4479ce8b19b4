//! Leak debouncer.
//!
//! The foil sensor is wired with a 1 MΩ pull-up, so liquid contact pulls
//! the node toward ground and the raw reading drops. A single noisy sample
//! must not raise the alarm: a leak is only confirmed after
//! `confirm_count` consecutive below-threshold readings, and any reading at
//! or above the threshold resets the count outright — there is no partial
//! decay.

/// Debounced leak decision for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeakStatus {
    /// Reading is dry, or below-threshold readings have not yet persisted
    /// long enough to confirm.
    Dry,
    /// The required number of consecutive below-threshold readings was
    /// reached.
    Confirmed,
}

/// Stateful consecutive-confirmation filter over raw foil readings.
pub struct LeakDebouncer {
    confirm_count: u32,
    consecutive: u32,
}

impl LeakDebouncer {
    pub fn new(confirm_count: u32) -> Self {
        Self {
            confirm_count,
            consecutive: 0,
        }
    }

    /// Feed one raw reading against the current threshold.
    pub fn update(&mut self, raw: u16, threshold: u16) -> LeakStatus {
        if raw < threshold {
            self.consecutive = self.consecutive.saturating_add(1);
        } else {
            self.consecutive = 0;
        }

        if self.consecutive >= self.confirm_count {
            LeakStatus::Confirmed
        } else {
            LeakStatus::Dry
        }
    }

    /// Consecutive below-threshold readings so far. A value in
    /// `1..confirm_count` is the "checking" window — diagnostic only, the
    /// indicators still show dry.
    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    /// Confirmations required.
    pub fn confirm_count(&self) -> u32 {
        self.confirm_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u16 = 52_000;

    #[test]
    fn confirms_only_after_three_consecutive() {
        let mut d = LeakDebouncer::new(3);
        assert_eq!(d.update(40_000, T), LeakStatus::Dry);
        assert_eq!(d.update(40_000, T), LeakStatus::Dry);
        assert_eq!(d.update(40_000, T), LeakStatus::Confirmed);
        assert_eq!(d.update(40_000, T), LeakStatus::Confirmed);
    }

    #[test]
    fn dry_reading_resets_immediately() {
        let mut d = LeakDebouncer::new(3);
        d.update(40_000, T);
        d.update(40_000, T);
        d.update(40_000, T);
        assert_eq!(d.update(60_000, T), LeakStatus::Dry);
        assert_eq!(d.consecutive(), 0);
        // Counting starts over from scratch.
        assert_eq!(d.update(40_000, T), LeakStatus::Dry);
    }

    #[test]
    fn reading_at_threshold_counts_as_dry() {
        let mut d = LeakDebouncer::new(1);
        assert_eq!(d.update(T, T), LeakStatus::Dry);
        assert_eq!(d.update(T - 1, T), LeakStatus::Confirmed);
    }

    #[test]
    fn checking_window_is_visible_via_consecutive() {
        let mut d = LeakDebouncer::new(3);
        d.update(40_000, T);
        assert_eq!(d.consecutive(), 1);
        d.update(40_000, T);
        assert_eq!(d.consecutive(), 2);
    }
}
