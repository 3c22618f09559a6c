//! Arbor: a hierarchical state machine library
//!
//! Arbor lets an application declare a tree of states, attach entry and
//! exit effects to each state, dispatch events down the active-state
//! chain, and perform transitions that unwind and re-enter exactly the
//! divergent suffix of the tree.
//!
//! # Core Concepts
//!
//! - **State tree**: states are registered once, each optionally below a
//!   parent; whenever a state is active its ancestors are active too
//! - **Active chain**: the ordered sequence of entered state instances,
//!   root to leaf; each instance owns its per-state data for exactly the
//!   interval it is on the chain
//! - **Events**: delivered leaf-first and walked up the ancestor chain
//!   until a handler consumes them
//! - **Transitions**: planned against the least common ancestor, so
//!   exits run leaf-first and entries root-first, and shared ancestors
//!   are left untouched
//!
//! # Example
//!
//! ```rust
//! use arbor::builder::{BuildError, Registrar};
//! use arbor::machine::{EventOutcome, FsmDescription, Machine, State, StateContext};
//! use arbor::state_id_enum;
//!
//! state_id_enum! {
//!     enum PlayerId {
//!         Stopped,
//!         Playing,
//!         Paused,
//!     }
//! }
//!
//! #[derive(Clone, Debug)]
//! enum Key {
//!     Play,
//!     Pause,
//!     Stop,
//! }
//!
//! #[derive(Default)]
//! struct Counters {
//!     tracks_started: u32,
//! }
//!
//! struct Player;
//!
//! impl FsmDescription for Player {
//!     type Id = PlayerId;
//!     type Event = Key;
//!     type Data = Counters;
//!
//!     fn setup(reg: &mut Registrar<Self>) -> Result<(), BuildError> {
//!         reg.add_state(PlayerId::Stopped, |ctx| Ok(Stopped { ctx }))?;
//!         reg.add_state(PlayerId::Playing, |ctx| {
//!             ctx.data_mut().tracks_started += 1;
//!             Ok(Playing { ctx })
//!         })?;
//!         // Pausing keeps the track loaded: Paused nests inside Playing.
//!         reg.add_substate(PlayerId::Paused, PlayerId::Playing, |ctx| Ok(Paused { ctx }))?;
//!         Ok(())
//!     }
//! }
//!
//! struct Stopped {
//!     ctx: StateContext<Player>,
//! }
//!
//! impl State<Player> for Stopped {
//!     fn event(&mut self, ev: &Key) -> EventOutcome {
//!         if let Key::Play = ev {
//!             let _ = self.ctx.transition(PlayerId::Playing);
//!         }
//!         EventOutcome::Consumed
//!     }
//! }
//!
//! struct Playing {
//!     ctx: StateContext<Player>,
//! }
//!
//! impl State<Player> for Playing {
//!     fn event(&mut self, ev: &Key) -> EventOutcome {
//!         match ev {
//!             Key::Pause => {
//!                 let _ = self.ctx.transition(PlayerId::Paused);
//!                 EventOutcome::Consumed
//!             }
//!             Key::Stop => {
//!                 let _ = self.ctx.transition(PlayerId::Stopped);
//!                 EventOutcome::Consumed
//!             }
//!             _ => EventOutcome::Propagate,
//!         }
//!     }
//! }
//!
//! struct Paused {
//!     ctx: StateContext<Player>,
//! }
//!
//! impl State<Player> for Paused {
//!     fn event(&mut self, ev: &Key) -> EventOutcome {
//!         if let Key::Play = ev {
//!             let _ = self.ctx.transition(PlayerId::Playing);
//!             return EventOutcome::Consumed;
//!         }
//!         // Stop falls through to the Playing ancestor.
//!         EventOutcome::Propagate
//!     }
//! }
//!
//! let mut player = Machine::<Player>::new(Counters::default()).unwrap();
//! player.set_start(PlayerId::Stopped).unwrap();
//!
//! player.post(Key::Play).unwrap();
//! player.post(Key::Pause).unwrap();
//! assert_eq!(player.active_ids(), &[PlayerId::Playing, PlayerId::Paused]);
//!
//! // Paused does not handle Stop; its Playing ancestor does.
//! player.post(Key::Stop).unwrap();
//! assert_eq!(player.current_leaf_id().unwrap(), PlayerId::Stopped);
//! assert_eq!(player.data().tracks_started, 1);
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, Registrar};
pub use core::{Registry, StateId, TransitionHistory, TransitionRecord};
pub use machine::{
    EventOutcome, FsmDescription, FsmError, Machine, State, StateContext, TransitionPlan,
};
