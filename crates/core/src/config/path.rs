//! Dot-path resolution over the configuration tree.
//!
//! Both lookups are total: a missing segment, a segment that walks into a
//! string, or an empty path yields `None`, never a panic.

use std::collections::BTreeMap;

use super::ConfigNode;

/// Resolve `path` (e.g. `text.hero.title`) to the node it names.
pub fn resolve_value<'a>(
    root: &'a BTreeMap<String, ConfigNode>,
    path: &str,
) -> Option<&'a ConfigNode> {
    if path.is_empty() {
        return None;
    }
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_map()?.get(segment)?;
    }
    Some(current)
}

/// Write handle to an existing entry: the final key and the value it holds
/// inside its parent map.
#[derive(Debug)]
pub struct Slot<'a> {
    key: String,
    node: &'a mut ConfigNode,
}

impl<'a> Slot<'a> {
    /// Final path segment.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn current(&self) -> &ConfigNode {
        self.node
    }

    pub fn current_mut(&mut self) -> &mut ConfigNode {
        self.node
    }

    /// Replace the entry's value, returning the previous one.
    pub fn set(&mut self, value: ConfigNode) -> ConfigNode {
        std::mem::replace(self.node, value)
    }

    pub fn into_mut(self) -> &'a mut ConfigNode {
        self.node
    }
}

/// Resolve `path` to a write handle. The parent chain must exist and be maps,
/// and the final key must already be present.
pub fn resolve_ref<'a>(
    root: &'a mut BTreeMap<String, ConfigNode>,
    path: &str,
) -> Option<Slot<'a>> {
    if path.is_empty() {
        return None;
    }
    let (parents, key) = match path.rsplit_once('.') {
        Some((parents, key)) => (Some(parents), key),
        None => (None, path),
    };

    let mut container = root;
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            container = container.get_mut(segment)?.as_map_mut()?;
        }
    }

    let node = container.get_mut(key)?;
    Some(Slot {
        key: key.to_string(),
        node,
    })
}
