// Observer registry - Synchronous change notification for a project

use std::fmt;

/// Handle returned by attach, used to detach later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(&str) + Send>;

/// Callbacks invoked in registration order on every project mutation
///
/// Callbacks only receive the change description. They run while the
/// mutation is finishing and must not try to edit the project themselves.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(ObserverId, Callback)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&str) + Send + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not attached
    pub fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, description: &str) {
        for (_, callback) in &mut self.observers {
            callback(description);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_notify_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        for name in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            registry.attach(move |description| {
                log.lock().unwrap().push(format!("{name}: {description}"));
            });
        }

        registry.notify("Add clip to track 0");

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "first: Add clip to track 0",
                "second: Add clip to track 0",
                "third: Add clip to track 0",
            ]
        );
    }

    #[test]
    fn test_detach() {
        let count = Arc::new(Mutex::new(0));
        let mut registry = ObserverRegistry::new();

        let counter = Arc::clone(&count);
        let id = registry.attach(move |_| *counter.lock().unwrap() += 1);
        registry.notify("one");

        assert!(registry.detach(id));
        assert!(!registry.detach(id));
        registry.notify("two");

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(registry.is_empty());
    }
}
