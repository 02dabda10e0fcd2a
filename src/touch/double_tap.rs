/// Passive window check across sequential taps. Holds no timer.
#[derive(Clone, Copy, Debug)]
pub struct DoubleTapDetector {
    window_ms: u64,
    last_tap_ms: Option<u64>,
    // The last tap already completed a double tap and cannot open another.
    last_paired: bool,
}

impl DoubleTapDetector {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_tap_ms: None,
            last_paired: false,
        }
    }

    /// Records a tap at `now_ms` and reports whether it completes a double
    /// tap. The timestamp is updated on every tap; a tap that completed a
    /// double tap does not pair with the next one.
    pub fn register_tap(&mut self, now_ms: u64) -> bool {
        let is_double = !self.last_paired
            && self
                .last_tap_ms
                .is_some_and(|last| now_ms.saturating_sub(last) < self.window_ms);
        self.last_tap_ms = Some(now_ms);
        self.last_paired = is_double;
        is_double
    }

    pub fn last_tap_ms(&self) -> Option<u64> {
        self.last_tap_ms
    }

    pub fn clear(&mut self) {
        self.last_tap_ms = None;
        self.last_paired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tap_never_pairs() {
        let mut detector = DoubleTapDetector::new(500);
        assert!(!detector.register_tap(0));
        assert_eq!(detector.last_tap_ms(), Some(0));
    }

    #[test]
    fn second_tap_inside_window_pairs() {
        let mut detector = DoubleTapDetector::new(500);
        assert!(!detector.register_tap(1_000));
        assert!(detector.register_tap(1_499));
    }

    #[test]
    fn tap_at_window_edge_does_not_pair() {
        let mut detector = DoubleTapDetector::new(500);
        assert!(!detector.register_tap(1_000));
        assert!(!detector.register_tap(1_500));
    }

    #[test]
    fn late_tap_restarts_the_window() {
        let mut detector = DoubleTapDetector::new(500);
        assert!(!detector.register_tap(0));
        assert!(!detector.register_tap(900));
        assert!(detector.register_tap(1_100));
    }

    #[test]
    fn three_quick_taps_pair_once() {
        let mut detector = DoubleTapDetector::new(500);
        let paired: Vec<bool> = [0, 150, 300]
            .into_iter()
            .map(|ms| detector.register_tap(ms))
            .collect();
        assert_eq!(paired, vec![false, true, false]);
        assert_eq!(detector.last_tap_ms(), Some(300));
    }

    #[test]
    fn fourth_quick_tap_pairs_with_third() {
        let mut detector = DoubleTapDetector::new(500);
        let paired: Vec<bool> = [0, 150, 300, 450]
            .into_iter()
            .map(|ms| detector.register_tap(ms))
            .collect();
        assert_eq!(paired, vec![false, true, false, true]);
    }
}
