use std::cell::Cell;

use vein_control::bsp::led::Led;

/// PWM channel which resides in memory, for simulation
pub struct DummyLed {
    duty: Cell<u32>,
}

impl DummyLed {
    /// Factory function to create a dummy LED
    pub fn create(duty: u32) -> Self {
        DummyLed {
            duty: Cell::new(duty),
        }
    }
}

impl Led for DummyLed {
    fn set(&self, duty: u32) {
        self.duty.set(duty);
    }

    fn get(&self) -> u32 {
        self.duty.get()
    }
}
