//! In-memory board for the control tests

#![allow(dead_code)]

use std::cell::Cell;

use vein_control::bsp::indicator::Indicator;
use vein_control::bsp::led::Led;
use vein_control::bsp::pin::Pin;
use vein_control::config::Config;
use vein_control::control::{ChannelOutput, VeinControl};
use vein_control::debounce::Button;
use vein_control::state::{Channel, DeviceState};

/// How long a regular click keeps the button down
pub const CLICK_MS: u32 = 60;

pub struct TestPin<'a> {
    pub is_down: &'a Cell<bool>,
}

impl<'a> Pin for TestPin<'a> {
    /// returns true if pin is tied to the ground
    fn is_down(&self) -> bool {
        self.is_down.get()
    }
}

/// Led which resides in memory, for simulation or testing
#[derive(Default)]
pub struct TestLed {
    pub duty: Cell<u32>,
    pub writes: Cell<u32>,
}

impl Led for TestLed {
    fn set(&self, duty: u32) {
        self.duty.set(duty);
        self.writes.set(self.writes.get() + 1);
    }

    fn get(&self) -> u32 {
        self.duty.get()
    }
}

#[derive(Default)]
pub struct TestIndicator {
    pub on: Cell<bool>,
    /// Counts off -> on changes
    pub switched_on: Cell<u32>,
}

impl Indicator for TestIndicator {
    fn set_on(&self, on: bool) {
        if on && !self.on.get() {
            self.switched_on.set(self.switched_on.get() + 1);
        }
        self.on.set(on);
    }

    fn is_on(&self) -> bool {
        self.on.get()
    }
}

#[derive(Default)]
pub struct Hardware {
    pub select: Cell<bool>,
    pub up: Cell<bool>,
    pub down: Cell<bool>,
    pub red_led: TestLed,
    pub orange_led: TestLed,
    pub red_indicator: TestIndicator,
    pub orange_indicator: TestIndicator,
}

pub type TestControl<'a> = VeinControl<'a, TestPin<'a>, TestPin<'a>, TestPin<'a>>;

impl Hardware {
    pub fn control(&self, config: Config) -> TestControl<'_> {
        VeinControl::new(
            config,
            TestPin {
                is_down: &self.select,
            },
            TestPin { is_down: &self.up },
            TestPin {
                is_down: &self.down,
            },
            ChannelOutput {
                led: &self.red_led,
                indicator: &self.red_indicator,
            },
            ChannelOutput {
                led: &self.orange_led,
                indicator: &self.orange_indicator,
            },
        )
    }

    pub fn pin(&self, button: Button) -> &Cell<bool> {
        match button {
            Button::Select => &self.select,
            Button::Up => &self.up,
            Button::Down => &self.down,
        }
    }

    pub fn duty(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Red => self.red_led.get(),
            Channel::Orange => self.orange_led.get(),
        }
    }

    /// (red, orange)
    pub fn indicators(&self) -> (bool, bool) {
        (self.red_indicator.is_on(), self.orange_indicator.is_on())
    }
}

pub struct Bench<'a> {
    pub hw: &'a Hardware,
    pub control: &'a TestControl<'a>,
}

impl<'a> Bench<'a> {
    /// Runs the control loop for [time] milliseconds, one tick per `tick_ms`
    pub fn advance_time(&self, time: u32) {
        let tick = self.control.config().tick_ms;
        for _ in 0..(time / tick) {
            self.control.tick(tick);
        }
    }

    pub fn press(&self, button: Button) {
        self.hw.pin(button).set(true);
    }

    pub fn release(&self, button: Button) {
        self.hw.pin(button).set(false);
    }

    /// Keeps the button down for [hold_ms] and lets the loop see the release
    pub fn hold(&self, button: Button, hold_ms: u32) {
        self.press(button);
        self.advance_time(hold_ms);
        self.release(button);
        self.advance_time(self.control.config().tick_ms);
    }

    pub fn click(&self, button: Button) {
        self.hold(button, CLICK_MS);
    }

    pub fn clicks(&self, button: Button, times: usize) {
        for _ in 0..times {
            self.click(button);
        }
    }

    pub fn state(&self) -> DeviceState {
        self.control.state()
    }

    pub fn duty(&self, channel: Channel) -> u32 {
        self.hw.duty(channel)
    }
}

/// Boots the control with [config] and hands it to [block] once the boot blink is over
pub fn with_bench(config: Config, block: &dyn Fn(&Bench<'_>)) {
    let hw = Hardware::default();
    let control = hw.control(config);
    control.start();
    let bench = Bench {
        hw: &hw,
        control: &control,
    };
    bench.advance_time(config.boot_duration_ms());
    block(&bench);
}
