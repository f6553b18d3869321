#![no_std]
#![no_main]

extern crate cortex_m;
extern crate cortex_m_rt as rt;
extern crate jlink_rtt;
extern crate nb;
extern crate panic_halt;
extern crate stm32g0xx_hal as stm_hal;

use core::fmt::Write;

use nb::block;
use rt::{entry, exception, ExceptionFrame};
use stm_hal::prelude::*;
use stm_hal::{hal, stm32};

use vein_control::bsp::led::Led;
use vein_control::config::Config;
use vein_control::control::{ChannelOutput, VeinControl};
use vein_control::state::Channel;

use crate::button::PullUpButton;
use crate::indicator::GpioIndicator;
use crate::pwm_led::PwmLed;

mod button;
mod indicator;
mod pwm_led;

const CONFIG: Config = Config::VEIN_FINDER;
const STATUS_PERIOD_MS: u32 = 2000;

#[entry]
fn main() -> ! {
    // https://github.com/stm32-rs/stm32g0xx-hal
    let dp = stm32::Peripherals::take().expect("cannot take peripherals");
    let mut rcc = dp.RCC.constrain();

    let gpioa = dp.GPIOA.split(&mut rcc);
    let gpiob = dp.GPIOB.split(&mut rcc);

    // buttons, tied to the ground when pressed
    let select = gpioa.pa0;
    let up = gpiob.pb4;
    let down = gpioa.pa1;

    // PWM outputs
    let d13 = gpiob.pb3;
    let d9 = gpioa.pa8;

    // indicators
    let d3 = gpiob.pb1;
    let d5 = gpioa.pa9;

    let mut watchdog = dp.IWDG.constrain();
    watchdog.start(2000.ms());

    let mut timer = dp.TIM17.timer(&mut rcc);
    // 16 Khz is not very efficient, but also is not audible
    let pwm = dp.TIM1.pwm(16000.hz(), &mut rcc);
    let red_led = PwmLed::create(pwm.bind_pin(d13), CONFIG.duty_max);
    let orange_led = PwmLed::create(pwm.bind_pin(d9), CONFIG.duty_max);

    let red_indicator = GpioIndicator::create(d3.into_push_pull_output());
    let orange_indicator = GpioIndicator::create(d5.into_push_pull_output());

    let control = VeinControl::new(
        CONFIG,
        PullUpButton {
            pin: select.into_pull_up_input(),
        },
        PullUpButton {
            pin: up.into_pull_up_input(),
        },
        PullUpButton {
            pin: down.into_pull_up_input(),
        },
        ChannelOutput {
            led: &red_led,
            indicator: &red_indicator,
        },
        ChannelOutput {
            led: &orange_led,
            indicator: &orange_indicator,
        },
    );

    control.start();

    let mut output = jlink_rtt::NonBlockingOutput::new();
    let mut since_status = 0;
    loop {
        timer.start(CONFIG.tick_ms.ms());
        block!(timer.wait()).ok();
        watchdog.feed();

        control.tick(CONFIG.tick_ms);

        since_status += CONFIG.tick_ms;
        if since_status >= STATUS_PERIOD_MS {
            let state = control.state();
            let _ = writeln!(
                output,
                "{:?} r: {} ({}) o: {} ({})",
                state.active(),
                state.level(Channel::Red),
                red_led.get(),
                state.level(Channel::Orange),
                orange_led.get(),
            );
            since_status = 0;
        }
    }
}

#[exception]
fn HardFault(_ef: &ExceptionFrame) -> ! {
    panic!("");
}
