use crate::config::Config;
use crate::state::{Channel, DeviceState};

/// Duty to apply to one PWM channel, in the `[0, duty_max]` domain
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCommand {
    pub channel: Channel,
    pub duty: u32,
}

/// Levels are evenly spaced by [Config::duty_step]. The top level always gets the full
/// [Config::duty_max], even when it is not a multiple of the number of levels.
pub fn level_to_duty(level: u8, config: &Config) -> u32 {
    if level >= config.max_level {
        config.duty_max
    } else {
        level as u32 * config.duty_step()
    }
}

/// Only the active channel is lit, the other one is forced off whatever its level is.
pub fn duty_commands(state: &DeviceState, config: &Config) -> [DutyCommand; 2] {
    let command = |channel: Channel| DutyCommand {
        channel,
        duty: if state.active() == channel {
            level_to_duty(state.level(channel), config)
        } else {
            0
        },
    };
    [command(Channel::Red), command(Channel::Orange)]
}

#[cfg(test)]
mod test {
    use crate::config::Config;
    use crate::debounce::{Button, PressEvent};
    use crate::duty::{duty_commands, level_to_duty, DutyCommand};
    use crate::state::{Channel, DeviceState};

    #[test]
    fn six_levels_on_8_bit_pwm() {
        let duties: Vec<u32> = (0..=5)
            .map(|level| level_to_duty(level, &Config::VEIN_FINDER))
            .collect();
        assert_eq!(duties, [0, 51, 102, 153, 204, 255]);
    }

    #[test]
    fn three_levels_on_8_bit_pwm() {
        let duties: Vec<u32> = (1..=3)
            .map(|level| level_to_duty(level, &Config::BENCH))
            .collect();
        assert_eq!(duties, [85, 170, 255]);
    }

    #[test]
    fn top_level_reaches_full_scale_on_10_bit_pwm() {
        let config = Config {
            duty_max: 1023,
            ..Config::VEIN_FINDER
        };
        assert_eq!(level_to_duty(4, &config), 816);
        assert_eq!(level_to_duty(5, &config), 1023);
    }

    #[test]
    fn inactive_channel_is_off() {
        let config = Config::VEIN_FINDER;
        let mut state = DeviceState::boot(&config);
        assert_eq!(
            duty_commands(&state, &config),
            [
                DutyCommand {
                    channel: Channel::Red,
                    duty: 255
                },
                DutyCommand {
                    channel: Channel::Orange,
                    duty: 0
                },
            ]
        );

        state.apply(
            PressEvent {
                button: Button::Select,
            },
            &config,
        );
        assert_eq!(
            duty_commands(&state, &config),
            [
                DutyCommand {
                    channel: Channel::Red,
                    duty: 0
                },
                DutyCommand {
                    channel: Channel::Orange,
                    duty: 255
                },
            ]
        );
    }
}
