use crate::hal::digital::v2::InputPin;
use vein_control::bsp::pin::Pin;

/// Push-button between the pin and the ground, the pin has its pull-up enabled
pub struct PullUpButton<INPUT: InputPin> {
    pub(crate) pin: INPUT,
}

impl<INPUT: InputPin> Pin for PullUpButton<INPUT> {
    fn is_down(&self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }
}
