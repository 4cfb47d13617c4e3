//! Synchronous in-process publish/subscribe channel.
//!
//! Components receive the channel explicitly rather than reaching for a
//! global bus. [`EventChannel::publish`] runs every subscriber, in the order
//! they subscribed, before it returns, so a published event is visible on the
//! very next render.

use std::fmt;

/// Handle returned by [`EventChannel::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Box<dyn FnMut(&T) + Send>;

/// A named topic with an ordered list of subscribers.
pub struct EventChannel<T> {
    topic: &'static str,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler<T>)>,
}

impl<T> EventChannel<T> {
    /// Create a channel with no subscribers.
    #[must_use]
    pub const fn new(topic: &'static str) -> Self {
        Self {
            topic,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Register a handler. It stays subscribed until [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        tracing::debug!(topic = self.topic, subscription = id.0, "subscribed");
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        let removed = self.subscribers.len() != before;
        if removed {
            tracing::debug!(topic = self.topic, subscription = id.0, "unsubscribed");
        }
        removed
    }

    /// Deliver `event` to every subscriber and return how many received it.
    pub fn publish(&mut self, event: &T) -> usize {
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
        let delivered = self.subscribers.len();
        tracing::debug!(topic = self.topic, delivered, "published");
        delivered
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("topic", &self.topic)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let mut channel = EventChannel::<u32>::new("numbers");
        assert_eq!(channel.publish(&7), 0);
    }

    #[test]
    fn test_delivers_in_subscription_order_before_returning() {
        let mut channel = EventChannel::<u32>::new("numbers");
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&log);
        channel.subscribe(move |n| first.lock().unwrap().push(format!("first:{n}")));
        let second = Arc::clone(&log);
        channel.subscribe(move |n| second.lock().unwrap().push(format!("second:{n}")));

        assert_eq!(channel.publish(&1), 2);
        assert_eq!(*log.lock().unwrap(), vec!["first:1", "second:1"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut channel = EventChannel::<u32>::new("numbers");
        let seen = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&seen);
        let id = channel.subscribe(move |n| *counter.lock().unwrap() += n);

        channel.publish(&2);
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.publish(&5);

        assert_eq!(*seen.lock().unwrap(), 2);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_debug_hides_handlers() {
        let channel = EventChannel::<u32>::new("numbers");
        assert!(format!("{channel:?}").contains("numbers"));
    }
}
