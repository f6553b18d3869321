use crate::hal;
use core::cell::{Cell, RefCell};
use vein_control::bsp::led::Led;

/// Timer channel driving one of the LEDs. The control works in the `[0, duty_max]`
/// domain of the config, this is the only place which knows the timer resolution.
pub struct PwmLed<PWM: hal::PwmPin<Duty = u16>> {
    pwm_ch: RefCell<PWM>,
    duty_max: u32,
    timer_max: u16,
    state: Cell<u32>,
}

impl<PWM: hal::PwmPin<Duty = u16>> PwmLed<PWM> {
    pub(crate) fn create(pwm_ch: PWM, duty_max: u32) -> Self {
        let timer_max = pwm_ch.get_max_duty();

        let led = PwmLed {
            pwm_ch: RefCell::new(pwm_ch),
            duty_max,
            timer_max,
            state: Cell::new(0),
        };

        led.pwm_ch.borrow_mut().set_duty(0);
        led.pwm_ch.borrow_mut().enable();

        led
    }
}

/// Scales [duty] from `[0, duty_max]` onto the timer's `[0, timer_max]`
fn timer_duty(duty: u32, duty_max: u32, timer_max: u16) -> u16 {
    let duty = duty.min(duty_max) as u64;
    (duty * timer_max as u64 / duty_max as u64) as u16
}

impl<PWM: hal::PwmPin<Duty = u16>> Led for PwmLed<PWM> {
    fn set(&self, duty: u32) {
        self.state.set(duty);
        let duty_cycle = timer_duty(duty, self.duty_max, self.timer_max);
        self.pwm_ch.borrow_mut().set_duty(duty_cycle);
    }

    fn get(&self) -> u32 {
        self.state.get()
    }
}
