//! The capability every state instance provides.

use super::FsmDescription;

/// Outcome of delivering one event to one state.
///
/// `Consumed` stops the ancestor walk for the current event;
/// `Propagate` hands the event to the next state up the active chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event was handled; do not deliver it to ancestor states.
    Consumed,
    /// The event was not (fully) handled; ancestors see it next.
    Propagate,
}

/// Trait for state instances.
///
/// A state's *entry effect* is its factory (registered with the
/// [`Registrar`](crate::builder::Registrar)); its *exit effect* is its
/// [`Drop`] impl, which runs exactly when the instance leaves the active
/// chain. The instance owns its per-state data for precisely that
/// interval, so scoped resources are released deterministically.
///
/// States that need to reach the machine - to mutate the user FSM data,
/// request a transition, or post an event - keep the
/// [`StateContext`](crate::machine::StateContext) handed to their factory.
///
/// Requesting a transition from inside `event` stages it; the machine
/// applies it after the ancestor walk for the current event finishes.
pub trait State<D: FsmDescription> {
    /// Deliver one event to this state.
    fn event(&mut self, ev: &D::Event) -> EventOutcome;
}
