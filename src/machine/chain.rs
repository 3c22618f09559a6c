//! The active chain: currently entered state instances, root to leaf.

use super::state::State;
use super::FsmDescription;
use crate::core::StateId;
use tracing::debug;

/// Ordered sequence of entered state instances.
///
/// Index 0 is the root-most ancestor, the last index is the leaf. The
/// identifier sequence always equals the ancestor path of its leaf.
/// Dropping the chain destroys every instance leaf-first, which is what
/// makes machine teardown run exit effects in reverse entry order.
pub(crate) struct ActiveChain<D: FsmDescription> {
    ids: Vec<D::Id>,
    nodes: Vec<Box<dyn State<D>>>,
}

impl<D: FsmDescription> ActiveChain<D> {
    pub(crate) fn new() -> Self {
        Self {
            ids: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub(crate) fn leaf_id(&self) -> Option<D::Id> {
        self.ids.last().copied()
    }

    /// Identifier sequence, root to leaf.
    pub(crate) fn ids(&self) -> &[D::Id] {
        &self.ids
    }

    /// Append a freshly constructed instance at the leaf end. The entry
    /// effect has already run in the factory.
    pub(crate) fn push(&mut self, id: D::Id, node: Box<dyn State<D>>) {
        self.ids.push(id);
        self.nodes.push(node);
    }

    /// Destroy the leaf instance (running its exit effect) and remove it.
    pub(crate) fn pop_leaf(&mut self) -> Option<D::Id> {
        let id = self.ids.pop()?;
        let node = self.nodes.pop();
        debug!("exit state '{}'", id.label());
        drop(node);
        Some(id)
    }

    pub(crate) fn node_at_mut<'a>(&'a mut self, index: usize) -> Option<&'a mut (dyn State<D> + 'a)> {
        self.nodes.get_mut(index).map(|node| node.as_mut() as &mut (dyn State<D> + 'a))
    }
}

impl<D: FsmDescription> Drop for ActiveChain<D> {
    fn drop(&mut self) {
        while self.pop_leaf().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildError, Registrar};
    use crate::machine::EventOutcome;
    use crate::state_id_enum;
    use std::cell::RefCell;
    use std::rc::Rc;

    state_id_enum! {
        enum PairId {
            Outer,
            Inner,
        }
    }

    struct Pair;

    impl FsmDescription for Pair {
        type Id = PairId;
        type Event = ();
        type Data = ();

        fn setup(_registrar: &mut Registrar<Self>) -> Result<(), BuildError> {
            Ok(())
        }
    }

    struct Tracked {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl State<Pair> for Tracked {
        fn event(&mut self, _ev: &()) -> EventOutcome {
            EventOutcome::Propagate
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("drop {}", self.name));
        }
    }

    #[test]
    fn push_and_pop_track_the_leaf() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain: ActiveChain<Pair> = ActiveChain::new();

        chain.push(
            PairId::Outer,
            Box::new(Tracked {
                name: "outer",
                log: Rc::clone(&log),
            }),
        );
        chain.push(
            PairId::Inner,
            Box::new(Tracked {
                name: "inner",
                log: Rc::clone(&log),
            }),
        );

        assert_eq!(chain.leaf_id(), Some(PairId::Inner));
        assert_eq!(chain.ids(), &[PairId::Outer, PairId::Inner]);

        assert_eq!(chain.pop_leaf(), Some(PairId::Inner));
        assert_eq!(chain.leaf_id(), Some(PairId::Outer));
        assert_eq!(*log.borrow(), ["drop inner"]);
    }

    #[test]
    fn drop_destroys_leaf_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut chain: ActiveChain<Pair> = ActiveChain::new();
            chain.push(
                PairId::Outer,
                Box::new(Tracked {
                    name: "outer",
                    log: Rc::clone(&log),
                }),
            );
            chain.push(
                PairId::Inner,
                Box::new(Tracked {
                    name: "inner",
                    log: Rc::clone(&log),
                }),
            );
        }

        assert_eq!(*log.borrow(), ["drop inner", "drop outer"]);
    }
}
