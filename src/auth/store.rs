//! In-memory holder of the current authentication state.
//!
//! `SessionStore` is the single source of truth for "is a user logged in".
//! It holds the latest [`AccessData`] (or `None`) and notifies registered
//! observers synchronously, in subscription order, whenever the value is
//! replaced. The host UI subscribes to drive navigation and nav-bar state.

use std::sync::{Arc, Mutex};

use crate::models::AccessData;

type Subscriber = Arc<dyn Fn(Option<&AccessData>) + Send + Sync>;

/// Handle returned by [`SessionStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner {
    current: Option<AccessData>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

/// Observable session state.
/// Clone is cheap - the state is shared behind an Arc.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                current: None,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Replace the current value and notify every subscriber with it,
    /// synchronously and in subscription order.
    pub fn publish(&self, value: Option<AccessData>) {
        // Snapshot subscribers outside the lock so callbacks can re-enter
        // the store without deadlocking.
        let (value, subscribers) = {
            let mut inner = self.inner.lock().expect("session store lock poisoned");
            inner.current = value;
            let subscribers: Vec<Subscriber> =
                inner.subscribers.iter().map(|(_, s)| s.clone()).collect();
            (inner.current.clone(), subscribers)
        };

        for subscriber in subscribers {
            subscriber(value.as_ref());
        }
    }

    /// Latest published value, `None` until the first successful login
    /// or restore.
    pub fn current(&self) -> Option<AccessData> {
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .current
            .clone()
    }

    /// True iff a user is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .current
            .is_some()
    }

    /// Register an observer called on every publish. Does not fire with
    /// the current value at registration time.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Option<&AccessData>) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().expect("session store lock poisoned");
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(callback)));
        id
    }

    /// Remove a previously registered observer. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.inner.lock().expect("session store lock poisoned");
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn sample_access_data() -> AccessData {
        AccessData {
            access_token: "a.b.c".to_string(),
            user: User {
                id: 1,
                name: "Ada".to_string(),
                surname: None,
                email: "ada@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_starts_unauthenticated() {
        let store = SessionStore::new();
        assert!(store.current().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_publish_updates_current() {
        let store = SessionStore::new();
        store.publish(Some(sample_access_data()));
        assert!(store.is_authenticated());
        assert_eq!(store.current().unwrap().user.name, "Ada");

        store.publish(None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_subscribers_fire_in_subscription_order() {
        let store = SessionStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            store.subscribe(move |_| order.lock().unwrap().push(tag));
        }

        store.publish(Some(sample_access_data()));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_subscriber_sees_published_value() {
        let store = SessionStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        store.subscribe(move |value| {
            seen_clone.lock().unwrap().push(value.is_some());
        });

        store.publish(Some(sample_access_data()));
        store.publish(None);
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = SessionStore::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        let id = store.subscribe(move |_| *count_clone.lock().unwrap() += 1);

        store.publish(None);
        store.unsubscribe(id);
        store.publish(None);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_subscriber_may_reenter_store() {
        let store = SessionStore::new();
        let observed = Arc::new(Mutex::new(None));
        let store_clone = store.clone();
        let observed_clone = observed.clone();
        store.subscribe(move |_| {
            // Reading back from inside a callback must not deadlock
            *observed_clone.lock().unwrap() = Some(store_clone.is_authenticated());
        });

        store.publish(Some(sample_access_data()));
        assert_eq!(*observed.lock().unwrap(), Some(true));
    }
}
