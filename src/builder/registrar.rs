//! Registrar: the one-shot surface through which a description
//! registers its state tree.

use super::error::BuildError;
use crate::core::Registry;
use crate::machine::{FsmDescription, FsmError, State, StateContext};
use std::collections::HashMap;

/// Factory closure constructing one state instance.
///
/// Invoking the factory *is* the state's entry effect; it runs exactly
/// when the identifier joins the active chain.
pub type StateFactory<D> =
    Box<dyn Fn(StateContext<D>) -> Result<Box<dyn State<D>>, FsmError>>;

/// Collects state registrations during machine construction.
///
/// The machine hands a registrar to
/// [`FsmDescription::setup`](crate::machine::FsmDescription::setup);
/// each state is registered exactly once, as a root with
/// [`add_state`](Registrar::add_state) or below a parent with
/// [`add_substate`](Registrar::add_substate). No other mutation of the
/// registry is possible afterwards.
pub struct Registrar<D: FsmDescription> {
    registry: Registry<D::Id>,
    factories: HashMap<D::Id, StateFactory<D>>,
}

impl<D: FsmDescription> Registrar<D> {
    pub(crate) fn new() -> Self {
        Self {
            registry: Registry::new(),
            factories: HashMap::new(),
        }
    }

    /// Register a root state.
    pub fn add_state<S, F>(&mut self, id: D::Id, factory: F) -> Result<(), BuildError>
    where
        S: State<D> + 'static,
        F: Fn(StateContext<D>) -> Result<S, FsmError> + 'static,
    {
        self.add(id, None, factory)
    }

    /// Register a state below `parent`. Whenever the state is active its
    /// parent is active too, entered first.
    pub fn add_substate<S, F>(
        &mut self,
        id: D::Id,
        parent: D::Id,
        factory: F,
    ) -> Result<(), BuildError>
    where
        S: State<D> + 'static,
        F: Fn(StateContext<D>) -> Result<S, FsmError> + 'static,
    {
        self.add(id, Some(parent), factory)
    }

    fn add<S, F>(
        &mut self,
        id: D::Id,
        parent: Option<D::Id>,
        factory: F,
    ) -> Result<(), BuildError>
    where
        S: State<D> + 'static,
        F: Fn(StateContext<D>) -> Result<S, FsmError> + 'static,
    {
        self.registry.register(id, parent)?;
        self.factories.insert(
            id,
            Box::new(move |ctx| factory(ctx).map(|state| Box::new(state) as Box<dyn State<D>>)),
        );
        Ok(())
    }

    /// Validate the collected tree and hand its pieces to the machine.
    pub(crate) fn finish(
        self,
    ) -> Result<(Registry<D::Id>, HashMap<D::Id, StateFactory<D>>), BuildError> {
        let mut registry = self.registry;
        registry.validate()?;
        Ok((registry, self.factories))
    }
}
