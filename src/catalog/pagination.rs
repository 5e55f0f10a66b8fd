//! Breakpoint-aware "load more" pagination.
//!
//! Each breakpoint owns its own visible-count counter. Switching breakpoint
//! changes which counter governs the slice but resets neither; both reset
//! together whenever the filtered list's content changes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Desktop,
    Mobile,
}

impl Breakpoint {
    pub fn default_count(self) -> usize {
        match self {
            Breakpoint::Desktop => 25,
            Breakpoint::Mobile => 10,
        }
    }

    pub fn increment(self) -> usize {
        // Same as the defaults today, kept separate on purpose
        self.default_count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    desktop: usize,
    mobile: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Pager::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Pager {
            desktop: Breakpoint::Desktop.default_count(),
            mobile: Breakpoint::Mobile.default_count(),
        }
    }

    pub fn visible_count(&self, breakpoint: Breakpoint) -> usize {
        match breakpoint {
            Breakpoint::Desktop => self.desktop,
            Breakpoint::Mobile => self.mobile,
        }
    }

    fn counter_mut(&mut self, breakpoint: Breakpoint) -> &mut usize {
        match breakpoint {
            Breakpoint::Desktop => &mut self.desktop,
            Breakpoint::Mobile => &mut self.mobile,
        }
    }

    /// The currently rendered slice: the first `visible_count` items. A
    /// corrupted counter (zero) falls back to the breakpoint default so a
    /// non-empty list never renders as empty.
    pub fn displayed<'a, T>(&self, items: &'a [T], breakpoint: Breakpoint) -> &'a [T] {
        let mut count = self.visible_count(breakpoint);
        if count == 0 {
            count = breakpoint.default_count();
        }
        &items[..count.min(items.len())]
    }

    /// Grow the active breakpoint's counter by its increment, capped at the
    /// list length. Never decreases the counter.
    pub fn load_more(&mut self, breakpoint: Breakpoint, total: usize) {
        let counter = self.counter_mut(breakpoint);
        let current = if *counter == 0 {
            breakpoint.default_count()
        } else {
            *counter
        };
        *counter = (current + breakpoint.increment()).min(total).max(current);
    }

    /// Reset both counters to their defaults. Called when the filtered
    /// list's content changes so stale over-fetch state can't leak into a
    /// new filter.
    pub fn reset(&mut self) {
        *self = Pager::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_counts() {
        let pager = Pager::new();
        assert_eq!(pager.visible_count(Breakpoint::Desktop), 25);
        assert_eq!(pager.visible_count(Breakpoint::Mobile), 10);
    }

    #[test]
    fn test_displayed_slices_to_visible_count() {
        let items: Vec<u32> = (0..40).collect();
        let pager = Pager::new();
        assert_eq!(pager.displayed(&items, Breakpoint::Desktop).len(), 25);
        assert_eq!(pager.displayed(&items, Breakpoint::Mobile).len(), 10);

        let short = vec![1, 2, 3];
        assert_eq!(pager.displayed(&short, Breakpoint::Mobile).len(), 3);
    }

    #[test]
    fn test_load_more_caps_at_total() {
        // 12 items on mobile: one press lands on 12, not 20
        let mut pager = Pager::new();
        pager.load_more(Breakpoint::Mobile, 12);
        assert_eq!(pager.visible_count(Breakpoint::Mobile), 12);
    }

    #[test]
    fn test_load_more_never_decreases() {
        let mut pager = Pager::new();
        pager.load_more(Breakpoint::Desktop, 100);
        assert_eq!(pager.visible_count(Breakpoint::Desktop), 50);
        // total below the current counter must not shrink it
        pager.load_more(Breakpoint::Desktop, 30);
        assert_eq!(pager.visible_count(Breakpoint::Desktop), 50);
    }

    #[test]
    fn test_breakpoint_switch_keeps_counters() {
        let mut pager = Pager::new();
        pager.load_more(Breakpoint::Mobile, 100);
        assert_eq!(pager.visible_count(Breakpoint::Mobile), 20);
        // reading the desktop counter doesn't disturb the mobile one
        assert_eq!(pager.visible_count(Breakpoint::Desktop), 25);
        assert_eq!(pager.visible_count(Breakpoint::Mobile), 20);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut pager = Pager::new();
        pager.load_more(Breakpoint::Desktop, 100);
        pager.load_more(Breakpoint::Mobile, 100);
        pager.reset();
        assert_eq!(pager, Pager::new());
    }
}
