//! The context handed to every state factory.

use super::mailbox::Mailbox;
use super::{FsmDescription, FsmError};
use crate::core::{Registry, StateId};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use tracing::warn;

/// Per-state handle onto the owning machine.
///
/// Each factory receives a fresh context; states that need to reach the
/// machine later store it. The context grants shared access to the user
/// FSM data, lets the state request transitions and post events, but
/// never exposes the active chain itself.
///
/// All handles point at the same single-threaded machine, so data
/// borrows follow the usual `RefCell` discipline: do not hold a borrow
/// from [`data`](StateContext::data) across a call that borrows again.
pub struct StateContext<D: FsmDescription> {
    registry: Rc<Registry<D::Id>>,
    mailbox: Rc<RefCell<Mailbox<D>>>,
    data: Rc<RefCell<D::Data>>,
}

impl<D: FsmDescription> Clone for StateContext<D> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
            mailbox: Rc::clone(&self.mailbox),
            data: Rc::clone(&self.data),
        }
    }
}

impl<D: FsmDescription> StateContext<D> {
    pub(crate) fn new(
        registry: Rc<Registry<D::Id>>,
        mailbox: Rc<RefCell<Mailbox<D>>>,
        data: Rc<RefCell<D::Data>>,
    ) -> Self {
        Self {
            registry,
            mailbox,
            data,
        }
    }

    /// Borrow the user FSM data.
    pub fn data(&self) -> Ref<'_, D::Data> {
        self.data.borrow()
    }

    /// Mutably borrow the user FSM data.
    pub fn data_mut(&self) -> RefMut<'_, D::Data> {
        self.data.borrow_mut()
    }

    /// Request a transition to `to`.
    ///
    /// The request is staged and applied by the machine once the current
    /// ancestor walk (or entry sequence) finishes; at most one request
    /// per event is honoured and the last one wins. An unregistered
    /// target is rejected here and nothing is staged.
    pub fn transition(&self, to: D::Id) -> Result<(), FsmError> {
        if !self.registry.contains(to) {
            warn!("transition request to unknown state '{}'", to.label());
            return Err(FsmError::unknown_state(to.label()));
        }
        self.mailbox.borrow_mut().stage_transition(to);
        Ok(())
    }

    /// Post an event to the machine's queue.
    ///
    /// The event is only enqueued; it is dispatched after the current
    /// event (and any transitions it staged) completes, in FIFO order.
    pub fn post(&self, ev: D::Event) {
        self.mailbox.borrow_mut().post(ev);
    }
}
