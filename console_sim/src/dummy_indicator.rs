use std::cell::Cell;

use vein_control::bsp::indicator::Indicator;

/// Indicator which resides in memory, for simulation
pub struct DummyIndicator {
    on: Cell<bool>,
}

impl DummyIndicator {
    pub fn create() -> Self {
        DummyIndicator {
            on: Cell::new(false),
        }
    }
}

impl Indicator for DummyIndicator {
    fn set_on(&self, on: bool) {
        self.on.set(on);
    }

    fn is_on(&self) -> bool {
        self.on.get()
    }
}
