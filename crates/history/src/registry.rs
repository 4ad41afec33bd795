//! The allow-list of action types that produce history records.

use indexmap::IndexSet;

/// Action types eligible for history tracking. Anything not registered
/// bypasses history entirely.
#[derive(Debug, Clone, Default)]
pub struct UndoActionRegistry {
    tags: IndexSet<String>,
}

impl UndoActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers each non-empty tag. Registering a tag twice is harmless.
    pub fn add<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            let tag = tag.into();
            if !tag.is_empty() {
                self.tags.insert(tag);
            }
        }
    }

    pub fn has(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Registered tags in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for UndoActionRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.add(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_skips_empty() {
        let mut registry = UndoActionRegistry::new();
        registry.add(["widget/move", "", "widget/add"]);
        registry.add(vec![String::from("widget/move")]);
        assert_eq!(registry.len(), 2);
        assert!(registry.has("widget/move"));
        assert!(registry.has("widget/add"));
        assert!(!registry.has(""));
        assert!(!registry.has("ui/hover"));
    }

    #[test]
    fn iter_keeps_registration_order() {
        let registry: UndoActionRegistry = ["b", "a", "c", "a"].into_iter().collect();
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }
}
