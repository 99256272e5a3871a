//! Browser history and navigation observers.
//!
//! A page subscribes to pop-state notifications when it mounts and drops
//! its [`Subscription`] when it unmounts. Pushing a new entry does not
//! notify subscribers, only moving through existing entries does.

use std::sync::{Arc, Mutex, Weak, mpsc};

use crate::location::Location;

/// Session history of the page.
pub trait History {
    /// Current location.
    fn location(&self) -> Location;

    /// Push a new entry and make it current, without notifying subscribers.
    fn push_state(&mut self, href: &str);

    /// Attach a navigation observer.
    ///
    /// The observer stays attached until the returned [`Subscription`] is
    /// dropped or detached.
    fn subscribe(&mut self) -> (LocationReceiver, Subscription);
}

/// Receiver for pop-state notifications.
pub struct LocationReceiver {
    rx: mpsc::Receiver<Location>,
}

impl LocationReceiver {
    /// Wrap a channel receiver.
    pub fn new(rx: mpsc::Receiver<Location>) -> Self {
        Self { rx }
    }

    /// Try to receive a notification without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<Location> {
        self.rx.try_recv().ok()
    }

    /// Drain all pending notifications.
    pub fn drain(&self) -> Vec<Location> {
        self.rx.try_iter().collect()
    }
}

type Observers = Mutex<Vec<(u64, mpsc::Sender<Location>)>>;

/// Handle that keeps a navigation observer attached.
///
/// Dropping the handle detaches the observer.
pub struct Subscription {
    id: u64,
    observers: Weak<Observers>,
}

impl Subscription {
    /// Detach the observer now.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade()
            && let Ok(mut observers) = observers.lock()
        {
            observers.retain(|(id, _)| *id != self.id);
        }
    }
}

/// In-process history with back and forward navigation.
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
    observers: Arc<Observers>,
    next_id: u64,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`.
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![Location::parse(initial)],
            index: 0,
            observers: Arc::new(Mutex::new(Vec::new())),
            next_id: 0,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history has no entries. Never true.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.observers.lock().map_or(0, |o| o.len())
    }

    /// Go back one entry. Returns `false` at the first entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.notify();
        true
    }

    /// Go forward one entry. Returns `false` at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        self.notify();
        true
    }

    fn notify(&self) {
        let location = self.entries[self.index].clone();
        if let Ok(mut observers) = self.observers.lock() {
            observers.retain(|(_, tx)| tx.send(location.clone()).is_ok());
        }
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        self.entries[self.index].clone()
    }

    fn push_state(&mut self, href: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(Location::parse(href));
        self.index = self.entries.len() - 1;
    }

    fn subscribe(&mut self) -> (LocationReceiver, Subscription) {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id;
        self.next_id += 1;
        if let Ok(mut observers) = self.observers.lock() {
            observers.push((id, tx));
        }
        (
            LocationReceiver::new(rx),
            Subscription {
                id,
                observers: Arc::downgrade(&self.observers),
            },
        )
    }
}
