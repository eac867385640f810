//! Change notification for projects.

use std::fmt;
use std::rc::Rc;

use super::{Project, PropertyName};

/// Receives a callback after each project property change.
///
/// Observers see the project read-only. Cascading deletions arrive as
/// separate notifications, one per removed item.
pub trait ProjectObserver {
    fn project_property_changed(&self, project: &Project, property: PropertyName);
}

/// Handle returned when registering an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Registered observers in registration order.
pub(crate) struct ObserverRegistry<T: ?Sized> {
    next_id: u64,
    entries: Vec<(ObserverId, Rc<T>)>,
}

impl<T: ?Sized> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: ?Sized> ObserverRegistry<T> {
    pub(crate) fn register(&mut self, observer: Rc<T>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Observers to notify, skipping `silent`.
    pub(crate) fn targets(&self, silent: Option<ObserverId>) -> impl Iterator<Item = &Rc<T>> + '_ {
        self.entries
            .iter()
            .filter(move |(id, _)| Some(*id) != silent)
            .map(|(_, observer)| observer)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T: ?Sized> fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.entries.len())
            .finish()
    }
}
