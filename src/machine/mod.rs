//! The runtime shell: active chain, planner, dispatcher, and facade.
//!
//! Everything that actually constructs, feeds, and tears down state
//! instances lives here. The pure catalog it operates on lives in
//! [`crate::core`].

pub mod context;
pub mod error;
pub mod machine;
pub mod planner;
pub mod state;

pub(crate) mod chain;
pub(crate) mod mailbox;

pub use context::StateContext;
pub use error::FsmError;
pub use machine::Machine;
pub use planner::{plan, TransitionPlan};
pub use state::{EventOutcome, State};

use crate::builder::{BuildError, Registrar};
use crate::core::StateId;
use std::fmt::Debug;

/// The description type tying together everything one machine needs.
///
/// A description names the identifier enumeration, the event type, the
/// user FSM data record shared with every state, and the setup routine
/// that registers the state tree. It is never instantiated; the machine
/// only uses its associated items.
///
/// Events are cloned into the pending queue, so `Event: Clone`.
///
/// # Example
///
/// ```rust
/// use arbor::builder::{BuildError, Registrar};
/// use arbor::machine::{EventOutcome, FsmDescription, State, StateContext};
/// use arbor::state_id_enum;
///
/// state_id_enum! {
///     enum DoorId {
///         Closed,
///     }
/// }
///
/// struct Door;
///
/// impl FsmDescription for Door {
///     type Id = DoorId;
///     type Event = ();
///     type Data = ();
///
///     fn setup(reg: &mut Registrar<Self>) -> Result<(), BuildError> {
///         reg.add_state(DoorId::Closed, |ctx| Ok(Closed { _ctx: ctx }))?;
///         Ok(())
///     }
/// }
///
/// struct Closed {
///     _ctx: StateContext<Door>,
/// }
///
/// impl State<Door> for Closed {
///     fn event(&mut self, _ev: &()) -> EventOutcome {
///         EventOutcome::Propagate
///     }
/// }
/// ```
pub trait FsmDescription: Sized + 'static {
    /// The closed identifier enumeration naming every state.
    type Id: StateId;
    /// The event type delivered to state handlers.
    type Event: Clone + Debug;
    /// User FSM data shared with every state through its context.
    type Data;

    /// Register the state tree. Called once, during machine
    /// construction; the registry is immutable afterwards.
    fn setup(registrar: &mut Registrar<Self>) -> Result<(), BuildError>;
}
