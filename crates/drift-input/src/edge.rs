//! Rising-edge latch for controls that must not repeat while held.

/// Down-tracking latch that fires once per press of a held signal.
///
/// Unlike [`InputSource::just_pressed`](crate::InputSource::just_pressed) it
/// works from the held state alone, and a press that arrives while firing is
/// not allowed stays armed until it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    down: bool,
}

impl EdgeTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` on the first call where `held && allowed` since the
    /// signal was last released.
    pub fn fire(&mut self, held: bool, allowed: bool) -> bool {
        let fired = held && allowed && !self.down;
        if fired {
            self.down = true;
        }
        if !held {
            self.down = false;
        }
        fired
    }

    /// Shorthand for [`fire`](Self::fire) with no suppression.
    pub fn rising(&mut self, held: bool) -> bool {
        self.fire(held, true)
    }

    #[must_use]
    pub fn is_down(&self) -> bool {
        self.down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_while_held() {
        let mut edge = EdgeTrigger::new();
        assert!(edge.rising(true));
        for _ in 0..10 {
            assert!(!edge.rising(true));
        }
        assert!(!edge.rising(false));
        assert!(edge.rising(true));
    }

    #[test]
    fn test_suppressed_press_fires_when_allowed() {
        let mut edge = EdgeTrigger::new();
        assert!(!edge.fire(true, false));
        assert!(!edge.is_down());
        assert!(edge.fire(true, true));
        assert!(!edge.fire(true, true));
    }

    #[test]
    fn test_release_rearms() {
        let mut edge = EdgeTrigger::new();
        edge.rising(true);
        edge.rising(false);
        assert!(!edge.is_down());
    }
}
