use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Observer = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`ObserverHub::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(u64);

#[derive(Default)]
struct HubState {
    next_id: u64,
    observers: Vec<(ObserverToken, Observer)>,
}

/// Registry of callbacks notified on every theme change.
///
/// Clones share the same subscriber list. Notification works on a snapshot
/// taken before the first callback runs, so a callback may subscribe or
/// unsubscribe (itself included) without disturbing the ongoing round.
#[derive(Clone, Default)]
pub struct ObserverHub {
    inner: Arc<Mutex<HubState>>,
}

impl ObserverHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, observer: F) -> ObserverToken
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut state = self.state();
        let token = ObserverToken(state.next_id);
        state.next_id += 1;
        state.observers.push((token, Arc::new(observer)));
        token
    }

    /// Returns `false` if the token was not subscribed.
    pub fn unsubscribe(&self, token: ObserverToken) -> bool {
        let mut state = self.state();
        let before = state.observers.len();
        state.observers.retain(|(existing, _)| *existing != token);
        state.observers.len() != before
    }

    /// Invoke every subscriber in subscription order.
    pub fn notify_all(&self) {
        let snapshot: Vec<Observer> = self
            .state()
            .observers
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        log::debug!("Notifying {} theme observers", snapshot.len());
        for observer in snapshot {
            observer();
        }
    }

    pub fn len(&self) -> usize {
        self.state().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().observers.is_empty()
    }

    fn state(&self) -> MutexGuard<'_, HubState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notifies_in_subscription_order() {
        let hub = ObserverHub::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second"] {
            let calls = Arc::clone(&calls);
            hub.subscribe(move || calls.lock().unwrap().push(label));
        }

        hub.notify_all();
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let hub = ObserverHub::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let token = hub.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        hub.notify_all();
        assert!(hub.unsubscribe(token));
        assert!(!hub.unsubscribe(token));
        hub.notify_all();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(hub.is_empty());
    }

    #[test]
    fn test_unsubscribe_during_notification() {
        let hub = ObserverHub::new();
        let count = Arc::new(AtomicUsize::new(0));
        let token_slot = Arc::new(Mutex::new(None::<ObserverToken>));

        let remover = hub.clone();
        let slot = Arc::clone(&token_slot);
        let self_removing = hub.subscribe(move || {
            if let Some(token) = *slot.lock().unwrap() {
                remover.unsubscribe(token);
            }
        });
        *token_slot.lock().unwrap() = Some(self_removing);

        let counter = Arc::clone(&count);
        hub.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        hub.notify_all();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(hub.len(), 1);

        hub.notify_all();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
