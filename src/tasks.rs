use std::cell::Cell;
use std::rc::Rc;

/// Per-component request counter. A response may only be applied while its
/// ticket is still the latest one issued; newer requests and unmounting both
/// retire older tickets.
#[derive(Clone, Debug, Default)]
pub struct RequestGeneration {
    current: Rc<Cell<u64>>,
}

impl PartialEq for RequestGeneration {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.current, &other.current)
    }
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        RequestTicket {
            generation: next,
            current: Rc::clone(&self.current),
        }
    }

    /// Retire every outstanding ticket.
    pub fn invalidate(&self) {
        self.current.set(self.current.get().wrapping_add(1));
    }
}

#[derive(Clone, Debug)]
pub struct RequestTicket {
    generation: u64,
    current: Rc<Cell<u64>>,
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.current.get() == self.generation
    }
}
