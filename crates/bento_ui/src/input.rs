//! Pointer input.
//!
//! The pointer position is the only state shared between cards. It is
//! published once per pointer-move event into a [`PointerFeed`]; every
//! consumer holds its own [`PointerSubscription`] and recomputes from the
//! latest value when it sees a new version.

use crate::layout::Point;

/// Latest pointer position, stamped with a publish counter.
#[derive(Debug, Clone, Default)]
pub struct PointerFeed {
    /// Last published position, `None` once the pointer left the window.
    position: Option<Point>,
    /// Bumped on every publish.
    version: u64,
}

impl PointerFeed {
    /// Creates a feed with no position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new pointer position (viewport coordinates).
    pub fn publish(&mut self, x: f32, y: f32) {
        self.position = Some(Point::new(x, y));
        self.version += 1;
    }

    /// Publishes that the pointer left the window.
    pub fn publish_exit(&mut self) {
        self.position = None;
        self.version += 1;
    }

    /// Returns the latest position.
    #[must_use]
    pub fn latest(&self) -> Option<Point> {
        self.position
    }

    /// Returns the publish counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Creates a subscription that has seen everything published so far.
    #[must_use]
    pub fn subscribe(&self) -> PointerSubscription {
        PointerSubscription { seen: self.version }
    }
}

/// What a subscriber observed since its last poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerUpdate {
    /// The pointer moved to this position.
    Moved(Point),
    /// The pointer left the window.
    Exited,
}

/// A consumer's read cursor into a [`PointerFeed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSubscription {
    seen: u64,
}

impl PointerSubscription {
    /// Returns the latest update if anything was published since the last poll.
    ///
    /// Intermediate positions are skipped: only the newest one matters.
    pub fn poll(&mut self, feed: &PointerFeed) -> Option<PointerUpdate> {
        if feed.version == self.seen {
            return None;
        }
        self.seen = feed.version;
        Some(match feed.position {
            Some(point) => PointerUpdate::Moved(point),
            None => PointerUpdate::Exited,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_sees_only_new_positions() {
        let mut feed = PointerFeed::new();
        feed.publish(1.0, 1.0);

        let mut sub = feed.subscribe();
        assert_eq!(sub.poll(&feed), None);

        feed.publish(2.0, 3.0);
        feed.publish(4.0, 5.0);
        assert_eq!(sub.poll(&feed), Some(PointerUpdate::Moved(Point::new(4.0, 5.0))));
        assert_eq!(sub.poll(&feed), None);
    }

    #[test]
    fn test_independent_subscribers() {
        let mut feed = PointerFeed::new();
        let mut a = feed.subscribe();
        let mut b = feed.subscribe();

        feed.publish(10.0, 10.0);
        assert!(a.poll(&feed).is_some());

        feed.publish_exit();
        assert_eq!(a.poll(&feed), Some(PointerUpdate::Exited));
        assert_eq!(b.poll(&feed), Some(PointerUpdate::Exited));
        assert_eq!(feed.latest(), None);
    }
}
