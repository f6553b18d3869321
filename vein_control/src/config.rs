use core::fmt;

use crate::state::Channel;

/// Constants which differ between hardware revisions of the vein finder
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Lowest brightness level, Down presses stop here
    pub min_level: u8,
    /// Highest brightness level, mapped to [duty_max]
    pub max_level: u8,
    /// Level of both channels after power-up
    pub default_level: u8,
    /// Channel which is active after power-up
    pub default_channel: Channel,
    /// Full brightness in the duty domain of the PWM outputs
    pub duty_max: u32,
    /// How long a button must stay down before the press counts
    pub settle_ms: u32,
    /// Period of the control loop
    pub tick_ms: u32,
    pub boot_blinks: u8,
    /// Duration of each on and each off phase of the boot blink
    pub boot_blink_ms: u32,
}

impl Config {
    /// Six levels on an 8-bit PWM, both channels start at full brightness
    pub const VEIN_FINDER: Config = Config {
        min_level: 0,
        max_level: 5,
        default_level: 5,
        default_channel: Channel::Red,
        duty_max: 255,
        settle_ms: 30,
        tick_ms: 10,
        boot_blinks: 3,
        boot_blink_ms: 200,
    };

    /// Three levels, the LED never goes fully dark. Used on the bench board.
    pub const BENCH: Config = Config {
        min_level: 1,
        max_level: 3,
        default_level: 1,
        default_channel: Channel::Red,
        duty_max: 255,
        settle_ms: 50,
        tick_ms: 10,
        boot_blinks: 3,
        boot_blink_ms: 500,
    };

    pub const PROFILES: &'static [(&'static str, Config)] =
        &[("vein-finder", Config::VEIN_FINDER), ("bench", Config::BENCH)];

    /// Looks up one of [PROFILES] by name
    pub fn profile(name: &str) -> Option<Config> {
        Self::PROFILES
            .iter()
            .find(|(profile, _)| *profile == name)
            .map(|(_, config)| *config)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.min_level >= self.max_level || self.max_level < 3 {
            Err(ConfigError::LevelRange {
                min: self.min_level,
                max: self.max_level,
            })
        } else if self.default_level < self.min_level || self.default_level > self.max_level {
            Err(ConfigError::DefaultLevelOutOfRange {
                level: self.default_level,
            })
        } else if self.duty_max < self.max_level as u32 {
            Err(ConfigError::DutyResolutionTooLow {
                duty_max: self.duty_max,
            })
        } else if self.tick_ms == 0 {
            Err(ConfigError::ZeroTick)
        } else if self.boot_blinks > 0 && self.boot_blink_ms == 0 {
            Err(ConfigError::ZeroBlinkPeriod)
        } else {
            Ok(())
        }
    }

    /// Duty increment between two adjacent levels
    pub const fn duty_step(&self) -> u32 {
        self.duty_max / self.max_level as u32
    }

    /// Total length of the boot acknowledgement
    pub const fn boot_duration_ms(&self) -> u32 {
        self.boot_blinks as u32 * 2 * self.boot_blink_ms
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::VEIN_FINDER
    }
}

const _: () = assert!(Config::VEIN_FINDER.validate().is_ok());
const _: () = assert!(Config::BENCH.validate().is_ok());

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// min must be below max, and max must be at least 3
    LevelRange { min: u8, max: u8 },
    DefaultLevelOutOfRange { level: u8 },
    /// Fewer duty values than levels, adjacent levels would share a duty
    DutyResolutionTooLow { duty_max: u32 },
    ZeroTick,
    ZeroBlinkPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelRange { min, max } => {
                write!(f, "invalid level range [{}, {}]", min, max)
            }
            Self::DefaultLevelOutOfRange { level } => {
                write!(f, "default level {} is outside of the level range", level)
            }
            Self::DutyResolutionTooLow { duty_max } => {
                write!(f, "duty_max {} is lower than the number of levels", duty_max)
            }
            Self::ZeroTick => write!(f, "tick_ms must not be 0"),
            Self::ZeroBlinkPeriod => write!(f, "boot_blink_ms must not be 0"),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::{Config, ConfigError};

    #[test]
    fn profiles_are_valid() {
        for (name, config) in Config::PROFILES {
            assert_eq!(config.validate(), Ok(()), "profile {}", name);
        }
    }

    #[test]
    fn profiles_are_found_by_name() {
        assert_eq!(Config::profile("vein-finder"), Some(Config::VEIN_FINDER));
        assert_eq!(Config::profile("bench"), Some(Config::BENCH));
        assert_eq!(Config::profile("disco"), None);
    }

    #[test]
    fn duty_step_matches_the_firmware_constants() {
        assert_eq!(Config::VEIN_FINDER.duty_step(), 51);
        assert_eq!(Config::BENCH.duty_step(), 85);
    }

    #[test]
    fn boot_takes_three_blinks() {
        assert_eq!(Config::VEIN_FINDER.boot_duration_ms(), 1200);
        assert_eq!(Config::BENCH.boot_duration_ms(), 3000);
    }

    #[test]
    fn inverted_level_range_is_rejected() {
        let config = Config {
            min_level: 5,
            max_level: 0,
            ..Config::VEIN_FINDER
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::LevelRange { min: 5, max: 0 })
        );
    }

    #[test]
    fn less_than_three_levels_are_rejected() {
        let config = Config {
            max_level: 2,
            default_level: 2,
            ..Config::VEIN_FINDER
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::LevelRange { min: 0, max: 2 })
        );
    }

    #[test]
    fn default_level_must_be_in_range() {
        let config = Config {
            default_level: 0,
            ..Config::BENCH
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DefaultLevelOutOfRange { level: 0 })
        );
    }

    #[test]
    fn duty_resolution_must_cover_the_levels() {
        let config = Config {
            duty_max: 4,
            ..Config::VEIN_FINDER
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DutyResolutionTooLow { duty_max: 4 })
        );
    }

    #[test]
    fn timing_must_be_non_zero() {
        let no_tick = Config {
            tick_ms: 0,
            ..Config::VEIN_FINDER
        };
        assert_eq!(no_tick.validate(), Err(ConfigError::ZeroTick));

        let no_blink = Config {
            boot_blink_ms: 0,
            ..Config::VEIN_FINDER
        };
        assert_eq!(no_blink.validate(), Err(ConfigError::ZeroBlinkPeriod));

        let no_boot = Config {
            boot_blinks: 0,
            boot_blink_ms: 0,
            ..Config::VEIN_FINDER
        };
        assert_eq!(no_boot.validate(), Ok(()));
    }
}
