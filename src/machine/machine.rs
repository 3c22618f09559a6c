//! The machine facade: owns the active chain and drives dispatch.

use super::chain::ActiveChain;
use super::context::StateContext;
use super::mailbox::Mailbox;
use super::planner::plan;
use super::state::EventOutcome;
use super::{FsmDescription, FsmError};
use crate::builder::{Registrar, StateFactory};
use crate::core::{Registry, StateId, TransitionHistory, TransitionRecord};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// A running hierarchical state machine.
///
/// The machine is built from an [`FsmDescription`], started exactly once
/// with [`set_start`](Machine::set_start), fed events through
/// [`post`](Machine::post), and discarded. Discarding it destroys every
/// instance on the active chain in reverse entry order.
///
/// The machine is single-threaded and cooperative: one producer feeds
/// events, handlers run to completion, and transitions requested from
/// inside a handler are applied after the handler's ancestor walk
/// finishes. It is not `Send`.
///
/// # Example
///
/// ```rust
/// use arbor::builder::{BuildError, Registrar};
/// use arbor::machine::{EventOutcome, FsmDescription, Machine, State, StateContext};
/// use arbor::state_id_enum;
///
/// state_id_enum! {
///     enum LampId {
///         Off,
///         On,
///     }
/// }
///
/// #[derive(Clone, Debug)]
/// struct Toggle;
///
/// #[derive(Default)]
/// struct LampData {
///     switch_count: u32,
/// }
///
/// struct Lamp;
///
/// impl FsmDescription for Lamp {
///     type Id = LampId;
///     type Event = Toggle;
///     type Data = LampData;
///
///     fn setup(reg: &mut Registrar<Self>) -> Result<(), BuildError> {
///         reg.add_state(LampId::Off, |ctx| Ok(Off { ctx }))?;
///         reg.add_state(LampId::On, |ctx| {
///             ctx.data_mut().switch_count += 1;
///             Ok(On { ctx })
///         })?;
///         Ok(())
///     }
/// }
///
/// struct Off {
///     ctx: StateContext<Lamp>,
/// }
///
/// impl State<Lamp> for Off {
///     fn event(&mut self, _ev: &Toggle) -> EventOutcome {
///         let _ = self.ctx.transition(LampId::On);
///         EventOutcome::Consumed
///     }
/// }
///
/// struct On {
///     ctx: StateContext<Lamp>,
/// }
///
/// impl State<Lamp> for On {
///     fn event(&mut self, _ev: &Toggle) -> EventOutcome {
///         let _ = self.ctx.transition(LampId::Off);
///         EventOutcome::Consumed
///     }
/// }
///
/// let mut lamp = Machine::<Lamp>::new(LampData::default()).unwrap();
/// lamp.set_start(LampId::Off).unwrap();
/// lamp.post(Toggle).unwrap();
///
/// assert_eq!(lamp.current_leaf_id().unwrap(), LampId::On);
/// assert_eq!(lamp.data().switch_count, 1);
/// ```
pub struct Machine<D: FsmDescription> {
    registry: Rc<Registry<D::Id>>,
    factories: HashMap<D::Id, StateFactory<D>>,
    chain: ActiveChain<D>,
    mailbox: Rc<RefCell<Mailbox<D>>>,
    data: Rc<RefCell<D::Data>>,
    history: TransitionHistory,
    started: bool,
}

impl<D: FsmDescription> Machine<D> {
    /// Build a machine by running the description's setup routine.
    ///
    /// The state tree is validated once here: duplicate registrations,
    /// dangling parent links, and parent cycles are all rejected before
    /// a machine value exists.
    pub fn new(data: D::Data) -> Result<Self, crate::builder::BuildError> {
        let mut registrar = Registrar::new();
        D::setup(&mut registrar)?;
        let (registry, factories) = registrar.finish()?;
        Ok(Self {
            registry: Rc::new(registry),
            factories,
            chain: ActiveChain::new(),
            mailbox: Rc::new(RefCell::new(Mailbox::new())),
            data: Rc::new(RefCell::new(data)),
            history: TransitionHistory::new(),
            started: false,
        })
    }

    /// Enter the start state, constructing its full ancestor chain
    /// root-first.
    ///
    /// Exactly-once: a second call fails with `AlreadyStarted`. If entry
    /// of any ancestor fails the partially entered chain is unwound and
    /// the machine is left unstarted. Transitions requested and events
    /// posted by the entered factories are settled and drained before
    /// this returns.
    pub fn set_start(&mut self, id: D::Id) -> Result<(), FsmError> {
        if self.started {
            return Err(FsmError::AlreadyStarted);
        }
        let path = self
            .registry
            .ancestors(id)
            .ok_or_else(|| FsmError::unknown_state(id.label()))?
            .to_vec();
        self.enter_path(&path)?;
        self.started = true;
        debug!("machine started at '{}'", id.label());
        self.settle()?;
        self.pump()
    }

    /// Post an event.
    ///
    /// The event is appended to the pending queue; unless a dispatch is
    /// already in progress, the queue is drained in FIFO order before
    /// this returns. Events posted before the machine is started stay
    /// queued and are drained by `set_start`.
    pub fn post(&mut self, ev: D::Event) -> Result<(), FsmError> {
        self.mailbox.borrow_mut().post(ev);
        if self.started {
            self.pump()
        } else {
            Ok(())
        }
    }

    /// Identifier of the deepest active state.
    pub fn current_leaf_id(&self) -> Result<D::Id, FsmError> {
        self.chain.leaf_id().ok_or(FsmError::NotStarted)
    }

    /// Identifier sequence of the active chain, root to leaf.
    pub fn active_ids(&self) -> &[D::Id] {
        self.chain.ids()
    }

    /// Borrow the user FSM data.
    pub fn data(&self) -> Ref<'_, D::Data> {
        self.data.borrow()
    }

    /// Mutably borrow the user FSM data.
    pub fn data_mut(&self) -> RefMut<'_, D::Data> {
        self.data.borrow_mut()
    }

    /// Diagnostic log of every transition applied so far.
    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    fn new_context(&self) -> StateContext<D> {
        StateContext::new(
            Rc::clone(&self.registry),
            Rc::clone(&self.mailbox),
            Rc::clone(&self.data),
        )
    }

    /// Construct and push each state in `path`, root-side-first.
    ///
    /// On a factory error the states entered by this call are unwound
    /// leaf-first and any transition staged by the failed suffix is
    /// discarded, leaving the chain consistent at the prior prefix.
    fn enter_path(&mut self, path: &[D::Id]) -> Result<(), FsmError> {
        for (entered, &id) in path.iter().enumerate() {
            let ctx = self.new_context();
            let built = match self.factories.get(&id) {
                Some(factory) => factory(ctx),
                None => Err(FsmError::unknown_state(id.label())),
            };
            match built {
                Ok(node) => {
                    debug!("enter state '{}'", id.label());
                    debug_assert_eq!(self.registry.parent(id), self.chain.leaf_id());
                    self.chain.push(id, node);
                }
                Err(err) => {
                    warn!(
                        "entry of '{}' failed, unwinding {} state(s): {}",
                        id.label(),
                        entered,
                        err
                    );
                    for _ in 0..entered {
                        self.chain.pop_leaf();
                    }
                    self.mailbox.borrow_mut().clear_staged();
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Apply staged transitions until none remain.
    ///
    /// A factory may stage a follow-up transition; it is applied only
    /// after the current entry sequence completes. Unbounded follow-up
    /// cycles are the user's configuration error and are not detected.
    fn settle(&mut self) -> Result<(), FsmError> {
        loop {
            let staged = self.mailbox.borrow_mut().take_staged();
            let Some(to) = staged else { return Ok(()) };
            let from = self.chain.leaf_id().ok_or(FsmError::NotStarted)?;

            let plan = plan(&self.registry, from, to)?;
            debug!(
                "transition '{}' -> '{}' ({} exits, {} entries)",
                from.label(),
                to.label(),
                plan.exit_count,
                plan.enter_path.len()
            );
            for _ in 0..plan.exit_count {
                self.chain.pop_leaf();
            }
            self.enter_path(&plan.enter_path)?;
            self.history = self
                .history
                .record(TransitionRecord::new(from.label(), to.label()));
        }
    }

    /// Deliver one event: snapshot the chain, walk leaf to root, stop on
    /// consumption or a staged transition, then settle.
    fn dispatch(&mut self, ev: D::Event) -> Result<(), FsmError> {
        let snapshot: Vec<D::Id> = self.chain.ids().to_vec();
        for level in (0..snapshot.len()).rev() {
            trace!("deliver event to '{}'", snapshot[level].label());
            let Some(node) = self.chain.node_at_mut(level) else {
                break;
            };
            if node.event(&ev) == EventOutcome::Consumed {
                break;
            }
            if self.mailbox.borrow().has_staged() {
                break;
            }
        }
        self.settle()
    }

    /// Drain the pending queue unless a drain is already running.
    fn pump(&mut self) -> Result<(), FsmError> {
        if !self.mailbox.borrow_mut().begin_dispatch() {
            return Ok(());
        }
        let mut result = Ok(());
        loop {
            let next = self.mailbox.borrow_mut().pop_event();
            let Some(ev) = next else { break };
            if let Err(err) = self.dispatch(ev) {
                result = Err(err);
                break;
            }
        }
        self.mailbox.borrow_mut().end_dispatch();
        result
    }
}
