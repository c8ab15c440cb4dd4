//! Ordered sink registry
//!
//! Every registration gets a fresh [`SinkId`], so a sink that was removed and
//! then registered again is a different registry entry.

use super::sink::Sink;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a registered sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SinkId(u64);

impl SinkId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink#{}", self.0)
    }
}

pub(crate) struct RegisteredSink {
    pub(crate) id: SinkId,
    pub(crate) sink: Box<dyn Sink>,
}

/// Sinks in insertion order
#[derive(Default)]
pub(crate) struct Registry {
    sinks: Vec<RegisteredSink>,
    next_id: u64,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, sink: Box<dyn Sink>) -> SinkId {
        let id = SinkId(self.next_id);
        self.next_id += 1;
        self.sinks.push(RegisteredSink { id, sink });
        id
    }

    /// Replace all sinks, skipping `None` items
    pub(crate) fn replace<I>(&mut self, sinks: I) -> Vec<SinkId>
    where
        I: IntoIterator,
        I::Item: Into<Option<Box<dyn Sink>>>,
    {
        self.sinks.clear();
        sinks
            .into_iter()
            .filter_map(Into::into)
            .map(|sink| self.insert(sink))
            .collect()
    }

    pub(crate) fn remove(&mut self, id: SinkId) -> Option<Box<dyn Sink>> {
        let index = self.sinks.iter().position(|r| r.id == id)?;
        Some(self.sinks.remove(index).sink)
    }

    /// Remove every sink whose id is in `ids`, keeping the order of the rest
    pub(crate) fn remove_all(&mut self, ids: &[SinkId]) -> Vec<RegisteredSink> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.sinks)
            .into_iter()
            .partition(|r| ids.contains(&r.id));
        self.sinks = kept;
        removed
    }

    pub(crate) fn clear(&mut self) -> Vec<Box<dyn Sink>> {
        self.sinks.drain(..).map(|r| r.sink).collect()
    }

    pub(crate) fn get_mut(&mut self, id: SinkId) -> Option<&mut Box<dyn Sink>> {
        self.sinks.iter_mut().find(|r| r.id == id).map(|r| &mut r.sink)
    }

    pub(crate) fn contains(&self, id: SinkId) -> bool {
        self.sinks.iter().any(|r| r.id == id)
    }

    pub(crate) fn ids(&self) -> Vec<SinkId> {
        self.sinks.iter().map(|r| r.id).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.sinks.len()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, RegisteredSink> {
        self.sinks.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogEntry, Result, SinkFilter};

    struct NamedSink {
        name: &'static str,
        filter: SinkFilter,
    }

    impl NamedSink {
        fn boxed(name: &'static str) -> Box<dyn Sink> {
            Box::new(Self {
                name,
                filter: SinkFilter::default(),
            })
        }
    }

    impl Sink for NamedSink {
        fn write(&mut self, _entry: &LogEntry) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            self.name
        }

        fn filter(&self) -> &SinkFilter {
            &self.filter
        }

        fn filter_mut(&mut self) -> &mut SinkFilter {
            &mut self.filter
        }
    }

    fn names(registry: &mut Registry) -> Vec<String> {
        registry.iter_mut().map(|r| r.sink.name().to_string()).collect()
    }

    #[test]
    fn test_insertion_order_and_fresh_ids() {
        let mut registry = Registry::new();
        let a = registry.insert(NamedSink::boxed("a"));
        let b = registry.insert(NamedSink::boxed("b"));
        assert_ne!(a, b);
        assert_eq!(names(&mut registry), ["a", "b"]);

        let removed = registry.remove(a).expect("registered");
        let a2 = registry.insert(removed);
        assert_ne!(a, a2);
        assert!(!registry.contains(a));
        assert_eq!(names(&mut registry), ["b", "a"]);
    }

    #[test]
    fn test_replace_skips_none() {
        let mut registry = Registry::new();
        registry.insert(NamedSink::boxed("old"));

        let ids = registry.replace(vec![
            Some(NamedSink::boxed("x")),
            None,
            Some(NamedSink::boxed("y")),
            None,
        ]);

        assert_eq!(ids.len(), 2);
        assert_eq!(registry.len(), 2);
        assert_eq!(names(&mut registry), ["x", "y"]);
    }

    #[test]
    fn test_remove_all_keeps_order() {
        let mut registry = Registry::new();
        let a = registry.insert(NamedSink::boxed("a"));
        registry.insert(NamedSink::boxed("b"));
        let c = registry.insert(NamedSink::boxed("c"));
        registry.insert(NamedSink::boxed("d"));

        let removed = registry.remove_all(&[c, a]);
        assert_eq!(removed.len(), 2);
        assert_eq!(names(&mut registry), ["b", "d"]);
    }
}
