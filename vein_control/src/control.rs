use log::{debug, info};
use no_std_compat::cell::Cell;

use crate::bsp::indicator::Indicator;
use crate::bsp::led::Led;
use crate::bsp::pin::Pin;
use crate::config::Config;
use crate::debounce::{Button, ButtonPanel, ButtonState, PressEvent};
use crate::duty::duty_commands;
use crate::state::{Channel, DeviceState, Transition};

/// Outputs belonging to one color: the PWM driven LED and its indicator
#[derive(Clone, Copy)]
pub struct ChannelOutput<'a> {
    pub led: &'a dyn Led,
    pub indicator: &'a dyn Indicator,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Indicators blink to acknowledge power-up, buttons are ignored
    Booting { elapsed_ms: u32 },
    Running,
}

/// Control logic evaluates button states and changes the light intensity.
///
/// [config] must pass [Config::validate], the built-in profiles do.
pub struct VeinControl<'a, S: Pin, U: Pin, D: Pin> {
    config: Config,
    buttons: ButtonPanel<S, U, D>,
    red: ChannelOutput<'a>,
    orange: ChannelOutput<'a>,
    state: Cell<DeviceState>,
    phase: Cell<Phase>,
}

impl<'a, S: Pin, U: Pin, D: Pin> VeinControl<'a, S, U, D> {
    pub fn new(
        config: Config,
        select_pin: S,
        up_pin: U,
        down_pin: D,
        red: ChannelOutput<'a>,
        orange: ChannelOutput<'a>,
    ) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config {:?}", config);
        VeinControl {
            config,
            buttons: ButtonPanel::new(select_pin, up_pin, down_pin, config.settle_ms),
            red,
            orange,
            state: Cell::new(DeviceState::boot(&config)),
            phase: Cell::new(Phase::Booting { elapsed_ms: 0 }),
        }
    }

    /// Resets to the boot defaults and starts the power-up blink
    pub fn start(&self) {
        self.state.set(DeviceState::boot(&self.config));
        self.red.led.set(0);
        self.orange.led.set(0);
        if self.config.boot_duration_ms() == 0 {
            self.enter_running();
        } else {
            self.phase.set(Phase::Booting { elapsed_ms: 0 });
            self.show_blink(true);
        }
    }

    /// One iteration of the control loop. [elapsed_ms] is the time since the previous tick.
    pub fn tick(&self, elapsed_ms: u32) {
        match self.phase.get() {
            Phase::Booting { elapsed_ms: booted } => {
                let booted = booted.saturating_add(elapsed_ms);
                if booted >= self.config.boot_duration_ms() {
                    self.enter_running();
                } else {
                    self.phase.set(Phase::Booting { elapsed_ms: booted });
                    self.show_blink((booted / self.config.boot_blink_ms) % 2 == 0);
                }
            }
            Phase::Running => {
                for event in self.buttons.poll(elapsed_ms).iter().flatten() {
                    self.on_pressed(*event);
                }
                self.drive_leds();
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn state(&self) -> DeviceState {
        self.state.get()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn button_state(&self, button: Button) -> ButtonState {
        self.buttons.state(button)
    }

    fn enter_running(&self) {
        self.phase.set(Phase::Running);
        let state = self.state.get();
        self.show_channel(state.active());
        self.drive_leds();
        info!(
            "ready, {:?} active, levels red {} orange {}",
            state.active(),
            state.level(Channel::Red),
            state.level(Channel::Orange)
        );
    }

    fn on_pressed(&self, event: PressEvent) {
        let mut state = self.state.get();
        let transition = state.apply(event, &self.config);
        self.state.set(state);

        match transition {
            Transition::ChannelSelected(channel) => {
                self.show_channel(channel);
                debug!("{:?} selected", channel);
            }
            Transition::LevelChanged { channel, level } => {
                debug!("{:?} level {}", channel, level);
            }
            Transition::AtBound { channel, level } => {
                debug!("{:?} level stays at {}", channel, level);
            }
        }
    }

    fn output(&self, channel: Channel) -> &ChannelOutput<'a> {
        match channel {
            Channel::Red => &self.red,
            Channel::Orange => &self.orange,
        }
    }

    fn show_channel(&self, active: Channel) {
        self.red.indicator.set_on(active == Channel::Red);
        self.orange.indicator.set_on(active == Channel::Orange);
    }

    fn show_blink(&self, on: bool) {
        self.red.indicator.set_on(on);
        self.orange.indicator.set_on(on);
    }

    fn drive_leds(&self) {
        for command in duty_commands(&self.state.get(), &self.config).iter() {
            let led = self.output(command.channel).led;
            if led.get() != command.duty {
                led.set(command.duty);
            }
        }
    }
}
