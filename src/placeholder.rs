//! Placeholder substitution
//!
//! Hologram lines may contain `%name%` tokens that are expanded right before
//! they reach a render handle. The resolver is injected into the registry,
//! and passing no resolver disables substitution entirely.

use crate::host::Observer;
use dashmap::DashMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref TOKEN_PATTERN: Regex = Regex::new(r"%([A-Za-z0-9_]+)%").expect("valid token pattern");
}

/// Token expanded to the observer id
pub const OBSERVER_TOKEN: &str = "observer";
/// Token expanded to the observer's world
pub const OBSERVER_WORLD_TOKEN: &str = "observer_world";

/// Pure string transform applied to line text
pub trait PlaceholderResolver: Send + Sync {
    fn substitute(&self, observer: Option<&dyn Observer>, text: &str) -> String;
}

/// Resolver backed by a table of global values plus observer built-ins
#[derive(Default)]
pub struct MapPlaceholders {
    values: DashMap<String, String>,
}

impl MapPlaceholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of `%name%`
    pub fn set(&self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    pub fn remove(&self, name: &str) {
        self.values.remove(name);
    }

    fn lookup(&self, observer: Option<&dyn Observer>, name: &str) -> Option<String> {
        match (name, observer) {
            (OBSERVER_TOKEN, Some(o)) => Some(o.observer_id().to_string()),
            (OBSERVER_WORLD_TOKEN, Some(o)) => Some(o.location().world.clone()),
            _ => self.values.get(name).map(|v| v.clone()),
        }
    }
}

impl PlaceholderResolver for MapPlaceholders {
    fn substitute(&self, observer: Option<&dyn Observer>, text: &str) -> String {
        if !text.contains('%') {
            return text.to_string();
        }

        TOKEN_PATTERN
            .replace_all(text, |caps: &Captures| {
                self.lookup(observer, &caps[1])
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ObserverSnapshot;
    use crate::world::location;

    #[test]
    fn test_global_tokens() {
        let placeholders = MapPlaceholders::new();
        placeholders.set("online", "12");
        assert_eq!(placeholders.substitute(None, "Online: %online%"), "Online: 12");
        assert_eq!(placeholders.substitute(None, "%unknown% stays"), "%unknown% stays");
        assert_eq!(placeholders.substitute(None, "100% plain"), "100% plain");
    }

    #[test]
    fn test_observer_tokens() {
        let placeholders = MapPlaceholders::new();
        let steve = ObserverSnapshot::new("steve", location("nether", 0.0, 0.0, 0.0));
        assert_eq!(
            placeholders.substitute(Some(&steve as &dyn Observer), "Hi %observer% in %observer_world%"),
            "Hi steve in nether"
        );
        assert_eq!(placeholders.substitute(None, "Hi %observer%"), "Hi %observer%");
    }
}
