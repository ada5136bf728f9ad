//! Pinning: hold a section at the viewport top while its trigger is active.

/// Layout math for one pinned section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinSpacer {
    natural_top: f32,
    start: f32,
    length: f32,
}

impl PinSpacer {
    /// `natural_top` is the section's page offset without pinning, `start` the
    /// scroll offset where pinning begins and `length` how long it lasts.
    pub fn new(natural_top: f32, start: f32, length: f32) -> Self {
        Self {
            natural_top,
            start,
            length: length.max(0.0),
        }
    }

    /// Extra page height added below the section.
    pub fn spacing(&self) -> f32 {
        self.length
    }

    pub fn range(&self) -> (f32, f32) {
        (self.start, self.start + self.length)
    }

    pub fn is_pinned(&self, scroll: f32) -> bool {
        scroll >= self.start && scroll <= self.start + self.length
    }

    /// Top of the section in viewport px at the given scroll offset.
    pub fn viewport_top(&self, scroll: f32) -> f32 {
        if scroll < self.start {
            self.natural_top - scroll
        } else if scroll <= self.start + self.length {
            self.natural_top - self.start
        } else {
            self.natural_top - scroll + self.length
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_section_holds_then_releases() {
        let pin = PinSpacer::new(1200.0, 1200.0, 5000.0);
        assert_eq!(pin.viewport_top(0.0), 1200.0);
        assert_eq!(pin.viewport_top(1000.0), 200.0);
        assert_eq!(pin.viewport_top(1200.0), 0.0);
        assert_eq!(pin.viewport_top(4000.0), 0.0);
        assert_eq!(pin.viewport_top(6200.0), 0.0);
        assert_eq!(pin.viewport_top(6300.0), -100.0);
        assert!(pin.is_pinned(3000.0));
        assert!(!pin.is_pinned(7000.0));
        assert_eq!(pin.spacing(), 5000.0);
        assert_eq!(pin.range(), (1200.0, 6200.0));
    }
}
