use crate::config::Config;
use crate::debounce::{Button, PressEvent};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Orange,
}

impl Channel {
    pub fn toggled(self) -> Channel {
        match self {
            Channel::Red => Channel::Orange,
            Channel::Orange => Channel::Red,
        }
    }
}

/// Outcome of a single press, reported back to the control loop
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    ChannelSelected(Channel),
    LevelChanged { channel: Channel, level: u8 },
    /// Level is already at its bound, the press was absorbed
    AtBound { channel: Channel, level: u8 },
}

/// Which channel is lit and how bright each channel is.
///
/// Levels stay within `[config.min_level, config.max_level]` of the config the state
/// was booted with, and a press only ever changes the level of the active channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    active: Channel,
    red_level: u8,
    orange_level: u8,
}

impl DeviceState {
    pub fn boot(config: &Config) -> Self {
        DeviceState {
            active: config.default_channel,
            red_level: config.default_level,
            orange_level: config.default_level,
        }
    }

    pub fn active(&self) -> Channel {
        self.active
    }

    pub fn level(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red_level,
            Channel::Orange => self.orange_level,
        }
    }

    fn level_mut(&mut self, channel: Channel) -> &mut u8 {
        match channel {
            Channel::Red => &mut self.red_level,
            Channel::Orange => &mut self.orange_level,
        }
    }

    pub fn apply(&mut self, event: PressEvent, config: &Config) -> Transition {
        let channel = self.active;
        match event.button {
            Button::Select => {
                self.active = channel.toggled();
                Transition::ChannelSelected(self.active)
            }
            Button::Up => {
                let level = self.level_mut(channel);
                if *level < config.max_level {
                    *level += 1;
                    Transition::LevelChanged {
                        channel,
                        level: *level,
                    }
                } else {
                    Transition::AtBound {
                        channel,
                        level: *level,
                    }
                }
            }
            Button::Down => {
                let level = self.level_mut(channel);
                if *level > config.min_level {
                    *level -= 1;
                    Transition::LevelChanged {
                        channel,
                        level: *level,
                    }
                } else {
                    Transition::AtBound {
                        channel,
                        level: *level,
                    }
                }
            }
        }
    }
}
