use std::time::{Duration, Instant};

/// Where the coordinator is between a trigger and the end of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Scheduled,
    Rendering,
}

/// Leading-edge debounce.
///
/// The first event of a burst passes immediately. Any event arriving while the
/// window is open is absorbed and pushes the window out again, so a burst whose
/// events are less than `window` apart yields exactly one pass. Nothing fires
/// when the window closes.
#[derive(Debug, Clone)]
pub struct LeadingDebounce {
    window: Duration,
    quiet_until: Option<Instant>,
    absorbed: usize,
}

impl LeadingDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            quiet_until: None,
            absorbed: 0,
        }
    }

    /// Record an event at `now`; true when it should trigger a pass.
    pub fn admit(&mut self, now: Instant) -> bool {
        let open = self.is_open(now);
        self.quiet_until = Some(now + self.window);
        if open {
            self.absorbed += 1;
        } else {
            self.absorbed = 0;
        }
        !open
    }

    pub fn is_open(&self, now: Instant) -> bool {
        self.quiet_until.is_some_and(|until| now < until)
    }

    /// Events swallowed by the current burst
    pub const fn absorbed(&self) -> usize {
        self.absorbed
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    pub fn reset(&mut self) {
        self.quiet_until = None;
        self.absorbed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(50);

    #[test]
    fn first_event_fires_immediately() {
        let mut debounce = LeadingDebounce::new(WINDOW);
        assert!(debounce.admit(Instant::now()));
    }

    #[test]
    fn burst_collapses_to_one_pass() {
        let mut debounce = LeadingDebounce::new(WINDOW);
        let start = Instant::now();
        let fired = (0..10)
            .map(|i| debounce.admit(start + Duration::from_millis(i * 30)))
            .filter(|fired| *fired)
            .count();
        assert_eq!(fired, 1);
        assert_eq!(debounce.absorbed(), 9);
    }

    #[test]
    fn window_extends_with_each_absorbed_event() {
        let mut debounce = LeadingDebounce::new(WINDOW);
        let start = Instant::now();
        assert!(debounce.admit(start));
        assert!(!debounce.admit(start + Duration::from_millis(40)));
        // 80ms after the first event, but only 40ms after the last one
        assert!(!debounce.admit(start + Duration::from_millis(80)));
        assert!(debounce.is_open(start + Duration::from_millis(100)));
        assert!(!debounce.is_open(start + Duration::from_millis(130)));
    }

    #[test]
    fn quiet_gap_starts_a_new_burst() {
        let mut debounce = LeadingDebounce::new(WINDOW);
        let start = Instant::now();
        assert!(debounce.admit(start));
        assert!(debounce.admit(start + Duration::from_millis(50)));
        assert_eq!(debounce.absorbed(), 0);
    }

    #[test]
    fn reset_closes_the_window() {
        let mut debounce = LeadingDebounce::new(WINDOW);
        let start = Instant::now();
        debounce.admit(start);
        debounce.reset();
        assert!(debounce.admit(start + Duration::from_millis(1)));
    }
}
