//! Core StateId trait for state identifiers.
//!
//! Every state in a machine is named by a value of a closed, user-defined
//! enumeration. The framework only requires that identifiers are cheap to
//! copy, comparable, hashable, and carry a human-readable label.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// Identifiers are plain values drawn from a closed enumeration. They are
/// used as keys into the state registry and as the currency of transition
/// requests, so they must be `Copy`, totally comparable, and hashable.
///
/// The label mapping is used for logging and error messages only; the
/// framework never branches on it.
///
/// The [`state_id_enum!`](crate::state_id_enum) macro generates both the
/// enum and this impl for the common case.
///
/// # Example
///
/// ```rust
/// use arbor::core::StateId;
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum WatchId {
///     Root,
///     ShowTime,
///     SetTime,
/// }
///
/// impl StateId for WatchId {
///     fn label(&self) -> &str {
///         match self {
///             Self::Root => "Root",
///             Self::ShowTime => "ShowTime",
///             Self::SetTime => "SetTime",
///         }
///     }
/// }
///
/// assert_eq!(WatchId::ShowTime.label(), "ShowTime");
/// ```
pub trait StateId: Copy + Eq + Hash + Debug + 'static {
    /// Get the identifier's label for display/logging.
    fn label(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    enum TestId {
        Alpha,
        Beta,
    }

    impl StateId for TestId {
        fn label(&self) -> &str {
            match self {
                Self::Alpha => "Alpha",
                Self::Beta => "Beta",
            }
        }
    }

    #[test]
    fn label_returns_correct_value() {
        assert_eq!(TestId::Alpha.label(), "Alpha");
        assert_eq!(TestId::Beta.label(), "Beta");
    }

    #[test]
    fn ids_are_comparable_and_hashable() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(TestId::Alpha);
        set.insert(TestId::Alpha);
        set.insert(TestId::Beta);

        assert_eq!(set.len(), 2);
        assert_ne!(TestId::Alpha, TestId::Beta);
    }
}
