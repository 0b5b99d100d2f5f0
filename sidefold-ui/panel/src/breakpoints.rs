use std::collections::{BTreeMap, BTreeSet};

/// Handle of a breakpoint-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Breakpoint service consumed by the responsive watcher.
///
/// Change notifications carry no payload: subscribers re-query
/// [`BreakpointSource::is_active`] when notified.
pub trait BreakpointSource {
    /// Return whether the named breakpoint matches the current viewport.
    fn is_active(&self, name: &str) -> bool;

    /// Subscribe `subscriber` to change notifications. A first notification
    /// is queued right away.
    fn subscribe(&mut self, subscriber: &str) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Drain queued notifications as subscriber names, in queue order and
    /// without duplicates.
    fn take_notifications(&mut self) -> Vec<String>;
}

/// A named viewport width range, `min_width <= width < max_width`.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoint {
    name: String,
    min_width: Option<f32>,
    max_width: Option<f32>,
}

impl Breakpoint {
    pub fn new(
        name: impl Into<String>,
        min_width: Option<f32>,
        max_width: Option<f32>,
    ) -> Self {
        Self {
            name: name.into(),
            min_width,
            max_width,
        }
    }

    pub fn matches(&self, width: f32) -> bool {
        self.min_width.is_none_or(|min| width >= min)
            && self.max_width.is_none_or(|max| width < max)
    }
}

/// Width-driven breakpoint set with a subscriber notification queue.
#[derive(Debug)]
pub struct BreakpointSet {
    breakpoints: Vec<Breakpoint>,
    width: Option<f32>,
    active: BTreeSet<String>,
    subscribers: BTreeMap<SubscriptionId, String>,
    queue: Vec<String>,
    next_id: u64,
}

impl BreakpointSet {
    pub fn new(breakpoints: Vec<Breakpoint>) -> Self {
        Self {
            breakpoints,
            width: None,
            active: BTreeSet::new(),
            subscribers: BTreeMap::new(),
            queue: Vec::new(),
            next_id: 0,
        }
    }

    /// Material layout breakpoints (`xs` .. `xl`, `lt-*`, `gt-*`).
    pub fn material() -> Self {
        const SM: f32 = 600.0;
        const MD: f32 = 960.0;
        const LG: f32 = 1280.0;
        const XL: f32 = 1920.0;

        Self::new(vec![
            Breakpoint::new("xs", None, Some(SM)),
            Breakpoint::new("sm", Some(SM), Some(MD)),
            Breakpoint::new("md", Some(MD), Some(LG)),
            Breakpoint::new("lg", Some(LG), Some(XL)),
            Breakpoint::new("xl", Some(XL), None),
            Breakpoint::new("lt-sm", None, Some(SM)),
            Breakpoint::new("lt-md", None, Some(MD)),
            Breakpoint::new("lt-lg", None, Some(LG)),
            Breakpoint::new("lt-xl", None, Some(XL)),
            Breakpoint::new("gt-xs", Some(SM), None),
            Breakpoint::new("gt-sm", Some(MD), None),
            Breakpoint::new("gt-md", Some(LG), None),
            Breakpoint::new("gt-lg", Some(XL), None),
        ])
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// Return the names of the currently matching breakpoints.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }

    /// Update the viewport width. When any breakpoint flips, every
    /// subscriber is notified. Returns whether a flip happened.
    pub fn set_viewport_width(&mut self, width: f32) -> bool {
        self.width = Some(width);
        let active: BTreeSet<String> = self
            .breakpoints
            .iter()
            .filter(|bp| bp.matches(width))
            .map(|bp| bp.name.clone())
            .collect();

        if active == self.active {
            return false;
        }

        log::debug!(
            "breakpoints changed at width {width}: {:?}",
            active.iter().collect::<Vec<_>>()
        );
        self.active = active;
        let names: Vec<String> = self.subscribers.values().cloned().collect();
        for name in names {
            self.enqueue(name);
        }
        true
    }

    fn enqueue(&mut self, subscriber: String) {
        if !self.queue.contains(&subscriber) {
            self.queue.push(subscriber);
        }
    }
}

impl Default for BreakpointSet {
    fn default() -> Self {
        Self::material()
    }
}

impl BreakpointSource for BreakpointSet {
    fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    fn subscribe(&mut self, subscriber: &str) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.insert(id, subscriber.to_string());
        self.enqueue(subscriber.to_string());
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let Some(name) = self.subscribers.remove(&id) else {
            return;
        };
        if !self.subscribers.values().any(|other| *other == name) {
            self.queue.retain(|queued| *queued != name);
        }
    }

    fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.queue)
    }
}

/// Subscriptions owned by one panel, released together.
#[derive(Debug, Default)]
pub struct SubscriptionGroup {
    ids: Vec<SubscriptionId>,
}

impl SubscriptionGroup {
    pub fn push(&mut self, id: SubscriptionId) {
        self.ids.push(id);
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Unsubscribe every handle in the group.
    pub fn release(&mut self, source: &mut dyn BreakpointSource) {
        for id in self.ids.drain(..) {
            source.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BreakpointSet, BreakpointSource, SubscriptionGroup};

    #[test]
    fn given_material_set_when_width_changes_then_ranges_match() {
        let mut set = BreakpointSet::material();
        assert_eq!(set.width(), None);

        set.set_viewport_width(1280.0);
        assert_eq!(set.width(), Some(1280.0));
        assert!(set.is_active("gt-md"));
        assert!(set.is_active("lg"));
        assert!(!set.is_active("md"));
        assert!(!set.is_active("lt-lg"));

        set.set_viewport_width(1279.0);
        assert!(!set.is_active("gt-md"));
        assert!(set.is_active("md"));
        assert!(set.is_active("lt-lg"));
    }

    #[test]
    fn given_unknown_breakpoint_when_queried_then_it_never_matches() {
        let mut set = BreakpointSet::material();
        set.set_viewport_width(4000.0);

        assert!(!set.is_active("huge"));
    }

    #[test]
    fn given_subscriber_when_subscribed_then_first_notification_is_queued() {
        let mut set = BreakpointSet::material();

        let _id = set.subscribe("navbar");

        assert_eq!(set.take_notifications(), vec![String::from("navbar")]);
        assert!(set.take_notifications().is_empty());
    }

    #[test]
    fn given_width_within_same_ranges_when_updated_then_no_notification() {
        let mut set = BreakpointSet::material();
        set.set_viewport_width(1300.0);
        let _id = set.subscribe("navbar");
        let _ = set.take_notifications();

        assert!(!set.set_viewport_width(1500.0));
        assert!(set.take_notifications().is_empty());

        assert!(set.set_viewport_width(1000.0));
        assert_eq!(set.take_notifications(), vec![String::from("navbar")]);
    }

    #[test]
    fn given_group_when_released_then_subscribers_stop_receiving() {
        let mut set = BreakpointSet::material();
        let mut group = SubscriptionGroup::default();
        group.push(set.subscribe("navbar"));

        group.release(&mut set);

        assert!(group.is_empty());
        assert!(set.take_notifications().is_empty());
        set.set_viewport_width(500.0);
        assert!(set.take_notifications().is_empty());
    }
}
