use no_std_compat::cell::Cell;

use crate::bsp::pin::Pin;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Select,
    Up,
    Down,
}

/// Debounced press of a button, reported once per physical press
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent {
    pub button: Button,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Released,
    Pressed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    Released,
    /// Pin is down, but not for long enough to tell a press from contact bounce
    Settling { held_ms: u32 },
    /// Press was reported, the pin has to go up before the next one
    AwaitingRelease,
}

/// Button which remembers how long it has been held down.
///
/// [poll] is called once per control tick and never blocks: both the settle
/// interval and the wait for release are tracked across ticks.
pub struct Debouncer<P: Pin> {
    button: Button,
    pin: P,
    settle_ms: u32,
    phase: Cell<Phase>,
}

impl<P: Pin> Debouncer<P> {
    pub fn new(button: Button, pin: P, settle_ms: u32) -> Self {
        Debouncer {
            button,
            pin,
            settle_ms,
            phase: Cell::new(Phase::Released),
        }
    }

    /// Samples the pin. [elapsed_ms] is the time since the previous poll.
    ///
    /// Only contact seen by consecutive samples counts towards the settle time,
    /// so a press is reported once the pin has been observed down for `settle_ms`.
    pub fn poll(&self, elapsed_ms: u32) -> Option<PressEvent> {
        let pin_down = self.pin.is_down();
        let (phase, event) = match (self.phase.get(), pin_down) {
            (_, false) => (Phase::Released, None),
            // the pin may have gone down right before this sample
            (Phase::Released, true) => self.settle(0),
            (Phase::Settling { held_ms }, true) => self.settle(held_ms.saturating_add(elapsed_ms)),
            (Phase::AwaitingRelease, true) => (Phase::AwaitingRelease, None),
        };
        self.phase.set(phase);
        event
    }

    fn settle(&self, held_ms: u32) -> (Phase, Option<PressEvent>) {
        if held_ms >= self.settle_ms {
            (
                Phase::AwaitingRelease,
                Some(PressEvent {
                    button: self.button,
                }),
            )
        } else {
            (Phase::Settling { held_ms }, None)
        }
    }

    pub fn state(&self) -> ButtonState {
        match self.phase.get() {
            Phase::AwaitingRelease => ButtonState::Pressed,
            _ => ButtonState::Released,
        }
    }
}

/// The three buttons of the device, polled in a fixed order
pub struct ButtonPanel<S: Pin, U: Pin, D: Pin> {
    select: Debouncer<S>,
    up: Debouncer<U>,
    down: Debouncer<D>,
}

impl<S: Pin, U: Pin, D: Pin> ButtonPanel<S, U, D> {
    pub fn new(select_pin: S, up_pin: U, down_pin: D, settle_ms: u32) -> Self {
        ButtonPanel {
            select: Debouncer::new(Button::Select, select_pin, settle_ms),
            up: Debouncer::new(Button::Up, up_pin, settle_ms),
            down: Debouncer::new(Button::Down, down_pin, settle_ms),
        }
    }

    /// At most one event per button, in the order Select, Up, Down
    pub fn poll(&self, elapsed_ms: u32) -> [Option<PressEvent>; 3] {
        [
            self.select.poll(elapsed_ms),
            self.up.poll(elapsed_ms),
            self.down.poll(elapsed_ms),
        ]
    }

    pub fn state(&self, button: Button) -> ButtonState {
        match button {
            Button::Select => self.select.state(),
            Button::Up => self.up.state(),
            Button::Down => self.down.state(),
        }
    }
}
