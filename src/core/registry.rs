//! State registry: the catalog of registered states and their parent links.
//!
//! The registry is populated once during machine construction and is
//! immutable afterwards. Validation resolves every parent reference,
//! rejects cycles, and memoises the root-to-state ancestor path for each
//! identifier so later lookups are a single map read.

use super::id::StateId;
use crate::builder::error::BuildError;
use std::collections::{HashMap, HashSet};

#[derive(Debug)]
struct Entry<Id> {
    parent: Option<Id>,
}

/// Catalog mapping each registered identifier to its position in the
/// state tree.
///
/// A registry goes through two phases: `register` calls record the raw
/// parent links, then a single [`validate`](Registry::validate) pass
/// checks the tree shape and computes ancestor paths. [`ancestors`]
/// and [`depth`] only return data after validation.
///
/// [`ancestors`]: Registry::ancestors
/// [`depth`]: Registry::depth
///
/// # Example
///
/// ```rust
/// use arbor::core::{Registry, StateId};
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum Id { Root, Child }
///
/// impl StateId for Id {
///     fn label(&self) -> &str {
///         match self {
///             Self::Root => "Root",
///             Self::Child => "Child",
///         }
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.register(Id::Root, None).unwrap();
/// registry.register(Id::Child, Some(Id::Root)).unwrap();
/// registry.validate().unwrap();
///
/// assert_eq!(registry.ancestors(Id::Child), Some(&[Id::Root, Id::Child][..]));
/// assert_eq!(registry.depth(Id::Child), Some(1));
/// ```
#[derive(Debug)]
pub struct Registry<Id: StateId> {
    entries: HashMap<Id, Entry<Id>>,
    paths: HashMap<Id, Vec<Id>>,
}

impl<Id: StateId> Default for Registry<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: StateId> Registry<Id> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            paths: HashMap::new(),
        }
    }

    /// Record a state and its optional parent link.
    ///
    /// The parent does not have to be registered yet; dangling links are
    /// caught by [`validate`](Registry::validate).
    pub fn register(&mut self, id: Id, parent: Option<Id>) -> Result<(), BuildError> {
        if self.entries.contains_key(&id) {
            return Err(BuildError::DuplicateState {
                label: id.label().to_string(),
            });
        }
        self.entries.insert(id, Entry { parent });
        Ok(())
    }

    /// Check the tree shape and memoise ancestor paths.
    ///
    /// Every parent reference must resolve to a registered state and the
    /// parent relation must be acyclic. Called once, before the registry
    /// is first used for lookups.
    pub fn validate(&mut self) -> Result<(), BuildError> {
        let ids: Vec<Id> = self.entries.keys().copied().collect();
        for &id in &ids {
            let mut path = vec![id];
            let mut seen = HashSet::from([id]);
            let mut cursor = id;
            while let Some(parent) = self.entries.get(&cursor).and_then(|e| e.parent) {
                if !self.entries.contains_key(&parent) {
                    return Err(BuildError::UnknownParent {
                        state: cursor.label().to_string(),
                        parent: parent.label().to_string(),
                    });
                }
                if !seen.insert(parent) {
                    return Err(BuildError::CycleDetected {
                        label: id.label().to_string(),
                    });
                }
                path.push(parent);
                cursor = parent;
            }
            path.reverse();
            self.paths.insert(id, path);
        }
        Ok(())
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: Id) -> bool {
        self.entries.contains_key(&id)
    }

    /// The registered parent of `id`, if any.
    pub fn parent(&self, id: Id) -> Option<Id> {
        self.entries.get(&id).and_then(|e| e.parent)
    }

    /// The root-to-`id` ancestor path, inclusive of `id` itself.
    ///
    /// Returns `None` for unregistered identifiers (and before
    /// validation).
    pub fn ancestors(&self, id: Id) -> Option<&[Id]> {
        self.paths.get(&id).map(Vec::as_slice)
    }

    /// Depth of `id` in the tree: 0 for roots.
    pub fn depth(&self, id: Id) -> Option<usize> {
        self.paths.get(&id).map(|p| p.len() - 1)
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no states are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
