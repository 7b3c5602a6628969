use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

pub struct Subscribers<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Clone for Subscribers<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T: 'static> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Rc::new(listener)));
            id
        };

        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry
                        .borrow_mut()
                        .listeners
                        .retain(|(listener_id, _)| *listener_id != id);
                }
            })),
        }
    }

    /// Listeners run in subscription order, with the list unborrowed so they
    /// may subscribe or unsubscribe while being notified.
    pub fn notify(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(value);
        }
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn listeners_run_in_subscription_order() {
        let subscribers = Subscribers::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = seen.clone();
            subscribers.subscribe(move |value| seen.borrow_mut().push(("first", *value)))
        };
        let second = {
            let seen = seen.clone();
            subscribers.subscribe(move |value| seen.borrow_mut().push(("second", *value)))
        };

        subscribers.notify(&7);

        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
        drop((first, second));
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let subscribers = Subscribers::<()>::new();
        let calls = Rc::new(Cell::new(0));

        let subscription = {
            let calls = calls.clone();
            subscribers.subscribe(move |_| calls.set(calls.get() + 1))
        };
        subscribers.notify(&());
        drop(subscription);
        subscribers.notify(&());

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn listener_may_subscribe_during_notify() {
        let subscribers = Subscribers::<()>::new();
        let late = Rc::new(RefCell::new(Vec::new()));
        let late_calls = Rc::new(Cell::new(0));

        let _subscription = {
            let handle = subscribers.clone();
            let late = late.clone();
            let late_calls = late_calls.clone();
            subscribers.subscribe(move |_| {
                if late.borrow().is_empty() {
                    let late_calls = late_calls.clone();
                    late.borrow_mut()
                        .push(handle.subscribe(move |_| late_calls.set(late_calls.get() + 1)));
                }
            })
        };

        subscribers.notify(&());
        assert_eq!(late_calls.get(), 0);

        subscribers.notify(&());
        assert_eq!(late_calls.get(), 1);
    }
}
