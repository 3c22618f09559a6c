//! Transition planning: which states to exit and which to enter.

use super::FsmError;
use crate::core::{Registry, StateId};

/// The exit/entry suffixes computed for one transition.
///
/// `exit_count` leaf-most instances are destroyed in reverse entry
/// order, then `enter_path` is constructed root-side-first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPlan<Id> {
    /// Number of leaf-most instances to destroy.
    pub exit_count: usize,
    /// Identifiers to construct, in root-to-leaf order.
    pub enter_path: Vec<Id>,
}

/// Plan the transition from leaf `from` to target `to`.
///
/// The ancestor paths of both states are compared; only the divergent
/// suffixes are unwound and re-entered, so states above the least common
/// ancestor are untouched. A target equal to the source, or a target
/// that is an ancestor of the source, is torn down and re-entered so the
/// entry effect fires once per arrival.
///
/// # Example
///
/// ```rust
/// use arbor::core::{Registry, StateId};
/// use arbor::machine::plan;
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum Id { A, B, C }
///
/// impl StateId for Id {
///     fn label(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///             Self::C => "C",
///         }
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.register(Id::A, None).unwrap();
/// registry.register(Id::B, None).unwrap();
/// registry.register(Id::C, Some(Id::A)).unwrap();
/// registry.validate().unwrap();
///
/// // From the leaf C (chain A, C) over to the other root B:
/// let plan = plan(&registry, Id::C, Id::B).unwrap();
/// assert_eq!(plan.exit_count, 2);
/// assert_eq!(plan.enter_path, vec![Id::B]);
/// ```
pub fn plan<Id: StateId>(
    registry: &Registry<Id>,
    from: Id,
    to: Id,
) -> Result<TransitionPlan<Id>, FsmError> {
    let from_path = registry
        .ancestors(from)
        .ok_or_else(|| FsmError::unknown_state(from.label()))?;
    let to_path = registry
        .ancestors(to)
        .ok_or_else(|| FsmError::unknown_state(to.label()))?;

    let common = from_path
        .iter()
        .zip(to_path.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut exit_count = from_path.len() - common;
    let mut enter_path: Vec<Id> = to_path[common..].to_vec();

    // An empty entry path means the target is the source itself or one
    // of its ancestors, still on the chain after the exits. It is exited
    // too and re-entered.
    if enter_path.is_empty() {
        exit_count += 1;
        enter_path.push(to);
    }

    Ok(TransitionPlan {
        exit_count,
        enter_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    enum TestId {
        R1,
        R2,
        A,
        B,
        C,
        Unregistered,
    }

    impl StateId for TestId {
        fn label(&self) -> &str {
            match self {
                Self::R1 => "R1",
                Self::R2 => "R2",
                Self::A => "A",
                Self::B => "B",
                Self::C => "C",
                Self::Unregistered => "Unregistered",
            }
        }
    }

    // R1 -> A -> B
    //         -> C
    // R2
    fn registry() -> Registry<TestId> {
        let mut registry = Registry::new();
        registry.register(TestId::R1, None).unwrap();
        registry.register(TestId::R2, None).unwrap();
        registry.register(TestId::A, Some(TestId::R1)).unwrap();
        registry.register(TestId::B, Some(TestId::A)).unwrap();
        registry.register(TestId::C, Some(TestId::A)).unwrap();
        registry.validate().unwrap();
        registry
    }

    #[test]
    fn self_transition_exits_and_reenters_once() {
        let plan = plan(&registry(), TestId::B, TestId::B).unwrap();

        assert_eq!(plan.exit_count, 1);
        assert_eq!(plan.enter_path, vec![TestId::B]);
    }

    #[test]
    fn descendant_transition_exits_nothing() {
        let plan = plan(&registry(), TestId::R1, TestId::B).unwrap();

        assert_eq!(plan.exit_count, 0);
        assert_eq!(plan.enter_path, vec![TestId::A, TestId::B]);
    }

    #[test]
    fn ancestor_transition_reenters_the_target() {
        // From chain [R1, A, B] up to A: B and A exit, A re-enters.
        let plan = plan(&registry(), TestId::B, TestId::A).unwrap();

        assert_eq!(plan.exit_count, 2);
        assert_eq!(plan.enter_path, vec![TestId::A]);
    }

    #[test]
    fn sibling_transition_pivots_at_the_common_ancestor() {
        let plan = plan(&registry(), TestId::B, TestId::C).unwrap();

        assert_eq!(plan.exit_count, 1);
        assert_eq!(plan.enter_path, vec![TestId::C]);
    }

    #[test]
    fn unrelated_branches_unwind_to_the_roots() {
        let plan = plan(&registry(), TestId::B, TestId::R2).unwrap();

        assert_eq!(plan.exit_count, 3);
        assert_eq!(plan.enter_path, vec![TestId::R2]);
    }

    #[test]
    fn applying_a_plan_yields_the_target_ancestor_path() {
        let registry = registry();
        let pairs = [
            (TestId::B, TestId::C),
            (TestId::B, TestId::R2),
            (TestId::R1, TestId::B),
            (TestId::C, TestId::C),
            (TestId::B, TestId::R1),
        ];

        for (from, to) in pairs {
            let plan = plan(&registry, from, to).unwrap();
            let mut chain = registry.ancestors(from).unwrap().to_vec();
            chain.truncate(chain.len() - plan.exit_count);
            chain.extend(plan.enter_path.iter().copied());
            assert_eq!(chain, registry.ancestors(to).unwrap());
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let registry = registry();

        let result = plan(&registry, TestId::B, TestId::Unregistered);
        assert!(matches!(result, Err(FsmError::UnknownState { .. })));

        let result = plan(&registry, TestId::Unregistered, TestId::B);
        assert!(matches!(result, Err(FsmError::UnknownState { .. })));
    }
}
