use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use vein_control::bsp::indicator::Indicator;

use crate::hal::digital::v2::OutputPin;

/// Indicator LED driven high when on
pub struct GpioIndicator<P>
where
    P: OutputPin<Error = Infallible>,
{
    pin: RefCell<P>,
    state: Cell<bool>,
}

impl<P> GpioIndicator<P>
where
    P: OutputPin<Error = Infallible>,
{
    pub(crate) fn create(pin: P) -> Self {
        let indicator = GpioIndicator {
            pin: RefCell::new(pin),
            state: Cell::new(true),
        };
        indicator.set_on(false);
        indicator
    }
}

impl<P> Indicator for GpioIndicator<P>
where
    P: OutputPin<Error = Infallible>,
{
    fn set_on(&self, on: bool) {
        self.state.set(on);
        let mut pin = self.pin.borrow_mut();
        let result = if on { pin.set_high() } else { pin.set_low() };
        if let Err(never) = result {
            match never {}
        }
    }

    fn is_on(&self) -> bool {
        self.state.get()
    }
}
