//! Observable slot for the last known authenticated session.
//!
//! A single-writer-many-reader value cell: `set` overwrites
//! unconditionally (last write wins, no merge, no version check) and
//! synchronously notifies every current subscriber exactly once per call.
//! Nothing is persisted; a restart starts empty and
//! [`AuthClient::restore_session`](crate::client::AuthClient::restore_session)
//! repopulates it.

use std::sync::{Arc, Mutex, Weak};

use crate::models::Session;

type Observer = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

struct Inner {
    current: Option<Session>,
    observers: Vec<(u64, Observer)>,
    next_id: u64,
}

/// The one mutable slot shared by every endpoint group of a client.
///
/// Notifications run on whichever thread called `set`, after the internal
/// lock is released, so an observer may call back into the holder.
pub struct SessionHolder {
    inner: Arc<Mutex<Inner>>,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                current: None,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Copy of the current value, `None` when signed out
    pub fn get(&self) -> Option<Session> {
        self.inner.lock().unwrap().current.clone()
    }

    /// Overwrite the slot and notify all subscribers with the new value.
    ///
    /// Each call produces exactly one notification per subscriber, even
    /// when the value is unchanged (an empty-to-empty transition still
    /// tells observers "you are signed out now").
    pub fn set(&self, session: Option<Session>) {
        let (value, observers) = {
            let mut inner = self.inner.lock().unwrap();
            inner.current = session;
            (inner.current.clone(), inner.observers.clone())
        };
        for (_, observer) in observers {
            observer(value.as_ref());
        }
    }

    /// Shorthand for `set(None)`
    pub fn clear(&self) {
        self.set(None);
    }

    /// Register an observer called on every subsequent `set`.
    ///
    /// The returned handle unsubscribes when dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for SessionHolder {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle tying an observer's lifetime to its registration
pub struct Subscription {
    id: u64,
    inner: Weak<Mutex<Inner>>,
}

impl Subscription {
    /// Explicit unsubscribe; equivalent to dropping the handle
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap();
            inner.observers.retain(|(id, _)| *id != self.id);
        }
    }
}
