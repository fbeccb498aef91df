use std::cell::Cell;
use std::rc::Rc;

/// Shared counter for drop-tracking tests. Each probe created from it bumps
/// the count exactly once, when the probe is dropped.
#[derive(Clone, Debug, Default)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> DropProbe {
        DropProbe(self.0.clone())
    }

    pub fn dropped(&self) -> usize {
        self.0.get()
    }
}

/// An element whose destruction is observable through its [`DropCounter`].
#[derive(Debug)]
pub struct DropProbe(Rc<Cell<usize>>);

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
