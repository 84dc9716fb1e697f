use std::{cell::Cell, rc::Rc};
use yew::prelude::*;

/// Counter bumped to re-run effects that fetch data, e.g. after a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Revision(pub u64);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, (): ()) -> Rc<Self> {
        Rc::new(Revision(self.0.wrapping_add(1)))
    }
}

#[hook]
pub fn use_revision() -> UseReducerHandle<Revision> {
    use_reducer_eq(Revision::default)
}

/// Lets only the most recently started request apply its response.
///
/// Every [`RequestGuard::begin`] invalidates the tickets handed out before,
/// so a slow response to an outdated selection is dropped instead of
/// overwriting the current one.
#[derive(Clone, Debug, Default)]
pub struct RequestGuard {
    latest: Rc<Cell<u64>>,
}

impl RequestGuard {
    pub fn begin(&self) -> Ticket {
        let generation = self.latest.get().wrapping_add(1);
        self.latest.set(generation);
        Ticket {
            latest: self.latest.clone(),
            generation,
        }
    }

    /// Drops every outstanding ticket without starting a request.
    pub fn invalidate(&self) {
        let _ = self.begin();
    }
}

#[derive(Clone, Debug)]
pub struct Ticket {
    latest: Rc<Cell<u64>>,
    generation: u64,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.latest.get() == self.generation
    }
}

#[hook]
pub fn use_request_guard() -> RequestGuard {
    (*use_memo((), |()| RequestGuard::default())).clone()
}
