//! Observers (players) as seen by the visibility evaluator

use crate::world::Location;
use rustc_hash::FxHashSet;

/// A world participant against whom visibility is evaluated
pub trait Observer {
    fn observer_id(&self) -> &str;
    fn location(&self) -> &Location;
    fn has_permission(&self, permission: &str) -> bool;
}

/// Owned copy of an observer's state, safe to send between threads
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverSnapshot {
    pub id: String,
    pub location: Location,
    pub permissions: FxHashSet<String>,
}

impl ObserverSnapshot {
    pub fn new(id: &str, location: Location) -> Self {
        Self {
            id: id.to_string(),
            location,
            permissions: FxHashSet::default(),
        }
    }

    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permissions.insert(permission.to_string());
        self
    }
}

impl Observer for ObserverSnapshot {
    fn observer_id(&self) -> &str {
        &self.id
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
