//! Pending-event queue and staged-transition slot.

use super::FsmDescription;
use std::collections::VecDeque;

/// Shared mutable dispatch bookkeeping.
///
/// One mailbox exists per machine, behind an `Rc<RefCell<..>>` shared
/// with every [`StateContext`](super::StateContext). States only ever
/// enqueue into it; draining is the machine's job, serialised by the
/// dispatch-in-progress flag.
pub(crate) struct Mailbox<D: FsmDescription> {
    events: VecDeque<D::Event>,
    staged: Option<D::Id>,
    dispatching: bool,
}

impl<D: FsmDescription> Mailbox<D> {
    pub(crate) fn new() -> Self {
        Self {
            events: VecDeque::new(),
            staged: None,
            dispatching: false,
        }
    }

    /// Append an event to the FIFO queue.
    pub(crate) fn post(&mut self, ev: D::Event) {
        self.events.push_back(ev);
    }

    pub(crate) fn pop_event(&mut self) -> Option<D::Event> {
        self.events.pop_front()
    }

    /// Stage a transition target. The last request before the machine
    /// settles wins.
    pub(crate) fn stage_transition(&mut self, to: D::Id) {
        self.staged = Some(to);
    }

    pub(crate) fn take_staged(&mut self) -> Option<D::Id> {
        self.staged.take()
    }

    pub(crate) fn has_staged(&self) -> bool {
        self.staged.is_some()
    }

    pub(crate) fn clear_staged(&mut self) {
        self.staged = None;
    }

    /// Raise the dispatch-in-progress flag. Returns `false` if a drain
    /// is already running, in which case the caller must not drain.
    pub(crate) fn begin_dispatch(&mut self) -> bool {
        if self.dispatching {
            return false;
        }
        self.dispatching = true;
        true
    }

    pub(crate) fn end_dispatch(&mut self) {
        self.dispatching = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildError, Registrar};
    use crate::machine::FsmDescription;
    use crate::state_id_enum;

    state_id_enum! {
        enum MiniId {
            Only,
        }
    }

    struct Mini;

    impl FsmDescription for Mini {
        type Id = MiniId;
        type Event = u32;
        type Data = ();

        fn setup(_registrar: &mut Registrar<Self>) -> Result<(), BuildError> {
            Ok(())
        }
    }

    #[test]
    fn events_drain_in_fifo_order() {
        let mut mailbox: Mailbox<Mini> = Mailbox::new();
        mailbox.post(1);
        mailbox.post(2);
        mailbox.post(3);

        assert_eq!(mailbox.pop_event(), Some(1));
        assert_eq!(mailbox.pop_event(), Some(2));
        assert_eq!(mailbox.pop_event(), Some(3));
        assert_eq!(mailbox.pop_event(), None);
    }

    #[test]
    fn last_staged_transition_wins() {
        let mut mailbox: Mailbox<Mini> = Mailbox::new();
        mailbox.stage_transition(MiniId::Only);
        mailbox.stage_transition(MiniId::Only);

        assert!(mailbox.has_staged());
        assert_eq!(mailbox.take_staged(), Some(MiniId::Only));
        assert!(!mailbox.has_staged());
        assert_eq!(mailbox.take_staged(), None);
    }

    #[test]
    fn dispatch_flag_excludes_reentrant_drains() {
        let mut mailbox: Mailbox<Mini> = Mailbox::new();

        assert!(mailbox.begin_dispatch());
        assert!(!mailbox.begin_dispatch());
        mailbox.end_dispatch();
        assert!(mailbox.begin_dispatch());
    }
}
